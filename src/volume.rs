//! Format-independent access to brain volumes.

use log::debug;
use ndarray::ArrayD;

use std::fmt;
use std::path::Path;

use crate::error::{NeurojaccardError, Result};
use crate::fs_mgh::read_mgh;
use crate::jaccard::MaskOverlap;
use crate::mask::{threshold, Mask};
use crate::nii::read_nifti;
use crate::traits::Binarize;
use crate::util::file_name_lowercase;


/// The file formats a volume can be read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VolumeFormat {
    /// NIfTI-1, in '.nii' or '.nii.gz' files.
    Nifti,
    /// FreeSurfer MGH, in '.mgh' or '.mgz' files.
    Mgh,
}

impl VolumeFormat {

    /// Determine the format from the file name. The check ignores case.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<VolumeFormat> {
        let name = file_name_lowercase(&path).unwrap_or_default();
        if name.ends_with(".nii") || name.ends_with(".nii.gz") {
            Ok(VolumeFormat::Nifti)
        } else if name.ends_with(".mgh") || name.ends_with(".mgz") || name.ends_with(".mgh.gz") {
            Ok(VolumeFormat::Mgh)
        } else {
            Err(NeurojaccardError::UnsupportedVolumeFormat(path.as_ref().to_path_buf()))
        }
    }
}

impl fmt::Display for VolumeFormat {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            VolumeFormat::Nifti => write!(f, "NIfTI"),
            VolumeFormat::Mgh => write!(f, "MGH"),
        }
    }
}


/// A brain volume with its voxel values converted to `f64`.
#[derive(Debug, Clone, PartialEq)]
pub struct Volume {
    pub format: VolumeFormat,
    pub data: ArrayD<f64>,
}

impl Volume {

    /// Read a volume, choosing the reader by file name. See [`VolumeFormat::from_path`].
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Volume> {
        let format = VolumeFormat::from_path(&path)?;
        let data = match format {
            VolumeFormat::Nifti => read_nifti(&path)?,
            VolumeFormat::Mgh => read_mgh(&path)?.voxel_data(),
        };
        debug!("Read {} volume '{}' with shape {:?}.", format, path.as_ref().display(), data.shape());
        Ok(Volume { format, data })
    }

    pub fn shape(&self) -> &[usize] {
        self.data.shape()
    }
}

impl Binarize for Volume {
    fn binarize(&self) -> Mask {
        threshold(&self.data)
    }
}

impl fmt::Display for Volume {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} volume with shape {:?}.", self.format, self.shape())
    }
}


/// Read a brain volume from a NIfTI or MGH file.
///
/// # Examples
///
/// ```no_run
/// let vol = neurojaccard::read_volume("/path/to/subjects_dir/subject1/mri/brainmask.mgz").unwrap();
/// println!("{}", vol);
/// ```
pub fn read_volume<P: AsRef<Path>>(path: P) -> Result<Volume> {
    Volume::from_file(path)
}


/// Compute the Jaccard index of the masks in two volume files.
///
/// Each volume is thresholded at zero (voxel values `> 0` are inside the mask) before the masks are compared.
///
/// # Examples
///
/// ```no_run
/// let score = neurojaccard::compare_mask_files("/path/to/vat_manual.nii.gz", "/path/to/vat_model.nii.gz").unwrap();
/// println!("{:.6}", score);
/// ```
pub fn compare_mask_files<P, Q>(path_a: P, path_b: Q) -> Result<f64>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let mask_a = read_volume(path_a)?.binarize();
    let mask_b = read_volume(path_b)?.binarize();

    let overlap = MaskOverlap::from_masks(&mask_a, &mask_b)?;
    debug!("{}", overlap);
    Ok(overlap.jaccard())
}
