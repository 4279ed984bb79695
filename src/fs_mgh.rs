//! Functions for managing FreeSurfer brain volumes in binary 'MGH' files.
//!
//! MGZ files are gzip-compressed MGH files. A volume mask produced by FreeSurfer (e.g. a
//! thresholded segmentation) is typically stored in this format.

use byteordered::ByteOrdered;
use flate2::bufread::GzDecoder;
use ndarray::{Array, Array4, ArrayD, ShapeBuilder};

use std::convert::TryFrom;
use std::fmt;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

use crate::error::{NeurojaccardError, Result};
use crate::mask::{threshold, Mask};
use crate::traits::Binarize;
use crate::util::is_compressed_mgh_file;

pub const MGH_VERSION: i32 = 1;

pub const MRI_UCHAR: i32 = 0;
pub const MRI_INT: i32 = 1;
pub const MRI_FLOAT: i32 = 3;
pub const MRI_SHORT: i32 = 4;

pub const MGH_DATA_START: u64 = 284; // The index in bytes where the data part starts in an MGH file.
const MGH_HEADER_USED_BYTES: u64 = 7 * 4 + 2; // version, 4 dims, dtype, dof: all i32. Then the i16 RAS flag.
const MGH_RAS_BYTES: u64 = 15 * 4; // delta, Mdc and Pxyz_c: 15 f32 values.

/// Models the header of a FreeSurfer MGH file containing a brain volume.
#[derive(Debug, Clone, PartialEq)]
pub struct FsMghHeader {
    pub mgh_format_version: i32,
    pub dim1len: i32,
    pub dim2len: i32,
    pub dim3len: i32,
    pub dim4len: i32, // aka "num_frames"
    pub dtype: i32,
    pub dof: i32,
    pub is_ras_good: i16,
    pub delta: [f32; 3],
    pub mdc_raw: [f32; 9],
    pub p_xyz_c: [f32; 3],
}

impl Default for FsMghHeader {
    fn default() -> FsMghHeader {
        FsMghHeader {
            mgh_format_version: MGH_VERSION,
            dim1len: 0,
            dim2len: 0,
            dim3len: 0,
            dim4len: 0,
            dtype: MRI_INT,
            dof: 0,
            is_ras_good: 0,
            delta: [0.; 3],
            mdc_raw: [0.; 9],
            p_xyz_c: [0.; 3],
        }
    }
}

/// The header of an MGH/MGZ file.
impl FsMghHeader {

    /// Read an MGH header from a file.
    /// If the file's name ends with ".mgz" or ".gz", the file is assumed to need GZip decoding.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<FsMghHeader> {
        let gz = is_compressed_mgh_file(&path);
        let mut file = BufReader::new(File::open(path)?);
        if gz {
            FsMghHeader::from_reader(&mut GzDecoder::new(file))
        } else {
            FsMghHeader::from_reader(&mut file)
        }
    }


    /// Read an MGH header from the given byte stream.
    /// It is assumed that the input is currently at the start of the
    /// header. After this returns, the header part that was actually used has been consumed,
    /// but the input is not yet at [`MGH_DATA_START`].
    pub fn from_reader<S>(input: &mut S) -> Result<FsMghHeader>
    where
        S: Read,
    {
        let mut hdr = FsMghHeader::default();

        let mut input = ByteOrdered::be(input);

        hdr.mgh_format_version = input.read_i32()?;

        if hdr.mgh_format_version != MGH_VERSION {
            return Err(NeurojaccardError::InvalidFsMghFormat);
        }

        hdr.dim1len = input.read_i32()?;
        hdr.dim2len = input.read_i32()?;
        hdr.dim3len = input.read_i32()?;
        hdr.dim4len = input.read_i32()?;

        if hdr.dim1len < 1 || hdr.dim2len < 1 || hdr.dim3len < 1 || hdr.dim4len < 1 {
            return Err(NeurojaccardError::InvalidFsMghFormat);
        }

        hdr.dtype = input.read_i32()?;
        hdr.dof = input.read_i32()?;

        hdr.is_ras_good = input.read_i16()?;

        if hdr.is_ras_good == 1 {
            for v in hdr.delta.iter_mut() { *v = input.read_f32()?; }
            for v in hdr.mdc_raw.iter_mut() { *v = input.read_f32()?; }
            for v in hdr.p_xyz_c.iter_mut() { *v = input.read_f32()?; }
        }
        Ok(hdr)
    }


    /// Number of header bytes consumed by [`FsMghHeader::from_reader`].
    fn num_bytes_read(&self) -> u64 {
        if self.is_ras_good == 1 {
            MGH_HEADER_USED_BYTES + MGH_RAS_BYTES
        } else {
            MGH_HEADER_USED_BYTES
        }
    }


    /// The volume dimensions, in voxels: width, height, depth, frames.
    pub fn dims(&self) -> [usize; 4] {
        [self.dim1len as usize, self.dim2len as usize, self.dim3len as usize, self.dim4len as usize]
    }


    /// The total number of voxel values over all frames, or `None` if a dimension is negative or the count overflows.
    pub fn num_voxels(&self) -> Option<usize> {
        [self.dim1len, self.dim2len, self.dim3len, self.dim4len]
            .iter()
            .try_fold(1usize, |acc, &d| usize::try_from(d).ok().and_then(|d| acc.checked_mul(d)))
    }


    /// Size in bytes of a single voxel value for the header's data type.
    pub fn bytes_per_voxel(&self) -> Result<usize> {
        match self.dtype {
            MRI_UCHAR => Ok(1),
            MRI_SHORT => Ok(2),
            MRI_INT | MRI_FLOAT => Ok(4),
            other => Err(NeurojaccardError::UnsupportedFsMghDataType(other)),
        }
    }
}


/// The voxel data of an MGH file, in the data type given by the header.
#[derive(Debug, Clone, PartialEq)]
pub enum FsMghData {
    Uchar(Array4<u8>),
    Int(Array4<i32>),
    Float(Array4<f32>),
    Short(Array4<i16>),
}

impl FsMghData {

    /// Convert the voxel values to `f64`, regardless of the stored data type. The conversion is lossless.
    pub fn to_f64(&self) -> Array4<f64> {
        match self {
            FsMghData::Uchar(data) => data.mapv(f64::from),
            FsMghData::Int(data) => data.mapv(f64::from),
            FsMghData::Float(data) => data.mapv(f64::from),
            FsMghData::Short(data) => data.mapv(f64::from),
        }
    }
}


/// Models a FreeSurfer MGH file.
#[derive(Debug, Clone, PartialEq)]
pub struct FsMgh {
    pub header: FsMghHeader,
    pub data: FsMghData,
}

impl FsMgh {

    /// Read an MGH or MGZ file.
    /// If the file's name ends with ".mgz" or ".gz", the file is assumed to need GZip decoding.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<FsMgh> {
        let gz = is_compressed_mgh_file(&path);
        let file = BufReader::new(File::open(path)?);
        if gz {
            FsMgh::from_reader(GzDecoder::new(file))
        } else {
            FsMgh::from_reader(file)
        }
    }


    /// Read an MGH volume from the given byte stream, which must be at the start of the header.
    ///
    /// Only forward reading is used, so this works with GZip streams.
    pub fn from_reader<S>(mut input: S) -> Result<FsMgh>
    where
        S: Read,
    {
        let hdr = FsMghHeader::from_reader(&mut input)?;

        let to_skip = MGH_DATA_START - hdr.num_bytes_read();
        let skipped = io::copy(&mut (&mut input).take(to_skip), &mut io::sink())?;
        if skipped != to_skip {
            return Err(NeurojaccardError::InvalidFsMghFormat);
        }

        let data = FsMgh::data_from_reader(input, &hdr)?;
        Ok(FsMgh { header: hdr, data })
    }


    /// Read the voxel data part. Values are stored big endian, with the first dimension varying fastest.
    ///
    /// The data size given by the header is checked for overflow, and the buffer only grows with the bytes actually read.
    fn data_from_reader<S>(input: S, hdr: &FsMghHeader) -> Result<FsMghData>
    where
        S: Read,
    {
        let num_voxels = hdr.num_voxels().ok_or(NeurojaccardError::InvalidFsMghFormat)?;
        let num_bytes = num_voxels
            .checked_mul(hdr.bytes_per_voxel()?)
            .ok_or(NeurojaccardError::InvalidFsMghFormat)?;

        let mut raw: Vec<u8> = Vec::new();
        input.take(num_bytes as u64).read_to_end(&mut raw)?;
        if raw.len() != num_bytes {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "MGH voxel data is truncated").into());
        }

        let shape = hdr.dims().f();
        if hdr.dtype == MRI_UCHAR {
            return Ok(FsMghData::Uchar(into_array4(raw, shape)?));
        }

        let mut values = ByteOrdered::be(&raw[..]);
        let data = match hdr.dtype {
            MRI_INT => {
                let mut data = Vec::with_capacity(num_voxels);
                for _ in 0..num_voxels { data.push(values.read_i32()?); }
                FsMghData::Int(into_array4(data, shape)?)
            }
            MRI_FLOAT => {
                let mut data = Vec::with_capacity(num_voxels);
                for _ in 0..num_voxels { data.push(values.read_f32()?); }
                FsMghData::Float(into_array4(data, shape)?)
            }
            MRI_SHORT => {
                let mut data = Vec::with_capacity(num_voxels);
                for _ in 0..num_voxels { data.push(values.read_i16()?); }
                FsMghData::Short(into_array4(data, shape)?)
            }
            other => return Err(NeurojaccardError::UnsupportedFsMghDataType(other)),
        };
        Ok(data)
    }


    /// The voxel data as `f64`. Single-frame volumes are returned as 3D arrays, multi-frame volumes keep the frame axis.
    pub fn voxel_data(&self) -> ArrayD<f64> {
        let data = self.data.to_f64();
        if self.header.dim4len == 1 {
            data.index_axis_move(ndarray::Axis(3), 0).into_dyn()
        } else {
            data.into_dyn()
        }
    }
}

impl Binarize for FsMgh {
    fn binarize(&self) -> Mask {
        threshold(&self.voxel_data())
    }
}

impl fmt::Display for FsMgh {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let [d1, d2, d3, d4] = self.header.dims();
        write!(f, "MGH volume of {}x{}x{} voxels with {} frame(s), data type {}.", d1, d2, d3, d4, self.header.dtype)
    }
}


fn into_array4<A>(values: Vec<A>, shape: ndarray::Shape<ndarray::Ix4>) -> Result<Array4<A>> {
    Array::from_shape_vec(shape, values).map_err(|_| NeurojaccardError::InvalidFsMghFormat)
}


/// Read an MGH or MGZ file.
///
/// # Examples
///
/// ```no_run
/// let mgh = neurojaccard::read_mgh("/path/to/subjects_dir/subject1/mri/brainmask.mgz").unwrap();
/// println!("{}", mgh);
/// ```
pub fn read_mgh<P: AsRef<Path>>(path: P) -> Result<FsMgh> {
    FsMgh::from_file(path)
}
