use quick_error::quick_error;
use std::fmt;
use std::io::Error as IOError;
use std::path::PathBuf;

use nifti::NiftiError;

/// Which argument of a two-mask comparison a value belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaskPosition {
    First,
    Second,
}

impl fmt::Display for MaskPosition {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MaskPosition::First => write!(f, "first"),
            MaskPosition::Second => write!(f, "second"),
        }
    }
}

quick_error! {
    /// Error type for all error variants originated by this crate.
    #[derive(Debug)]
    pub enum NeurojaccardError {
        /// A mask holds a value other than 0 or 1.
        NonBinaryMask(position: MaskPosition, value: u8) {
            display("Masks must be binary (contain only 0s and 1s): {} mask contains value {}", position, value)
        }

        /// The two masks do not cover the same voxel grid.
        ShapeMismatch(first: Vec<usize>, second: Vec<usize>) {
            display("Mask shapes differ: {:?} vs {:?}", first, second)
        }

        /// The file name does not end with a known volume extension.
        UnsupportedVolumeFormat(path: PathBuf) {
            display("Unsupported volume file format: '{}'", path.display())
        }

        /// Invalid MGH file: wrong version or dimensions.
        InvalidFsMghFormat {
            display("Invalid FreeSurfer MGH file")
        }

        UnsupportedFsMghDataType(dtype: i32) {
            display("Unsupported MGH data type code {}", dtype)
        }

        /// Error from the NIfTI reader.
        Nifti(err: NiftiError) {
            from()
            source(err)
            display("Cannot read NIfTI volume: {}", err)
        }

        /// I/O Error
        Io(err: IOError) {
            from()
            source(err)
            display("I/O error: {}", err)
        }
    }
}

/// Alias type for results originated from this crate.
pub type Result<T> = ::std::result::Result<T, NeurojaccardError>;
