//! Jaccard index between binary brain masks stored in structural neuroimaging volume files.
//!
//! Volumes are read from NIfTI-1 (`.nii`, `.nii.gz`) or FreeSurfer MGH (`.mgh`, `.mgz`) files,
//! thresholded at zero into binary masks, and compared by intersection over union.

pub mod error;
pub mod fs_mgh;
pub mod jaccard;
pub mod mask;
pub mod nii;
pub mod traits;
pub mod util;
pub mod volume;

pub use error::{MaskPosition, NeurojaccardError, Result};
pub use fs_mgh::{read_mgh, FsMgh, FsMghData, FsMghHeader};
pub use jaccard::{compute_jaccard, overlap_counts, MaskOverlap};
pub use mask::{threshold, validate_binary, Mask};
pub use nii::read_nifti;
pub use traits::Binarize;
pub use volume::{compare_mask_files, read_volume, Volume, VolumeFormat};
