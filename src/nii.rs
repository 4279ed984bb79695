//! Functions for reading NIfTI-1 brain volumes from '.nii' and '.nii.gz' files.

use log::debug;
use ndarray::ArrayD;
use nifti::{IntoNdArray, NiftiObject, ReaderOptions};

use std::path::Path;

use crate::error::Result;


/// Read the voxel data of a NIfTI file as `f64`, with the scaling from the header applied.
///
/// Double precision keeps every positive value of a float64 volume positive, so thresholding does not lose voxels.
///
/// Files ending with ".gz" are GZip-decoded. The array has one axis per header dimension, in file order.
///
/// # Examples
///
/// ```no_run
/// let data = neurojaccard::read_nifti("/path/to/sub-01_vat_left.nii.gz").unwrap();
/// println!("Volume has shape {:?}.", data.shape());
/// ```
pub fn read_nifti<P: AsRef<Path>>(path: P) -> Result<ArrayD<f64>> {
    let obj = ReaderOptions::new().read_file(path.as_ref())?;
    debug!(
        "NIfTI header of '{}': dim={:?}, datatype={}",
        path.as_ref().display(),
        obj.header().dim,
        obj.header().datatype
    );
    let data = obj.into_volume().into_ndarray::<f64>()?;
    Ok(data)
}
