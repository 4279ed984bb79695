use crate::mask::Mask;

/// Types holding voxel data that can be turned into a binary [`Mask`] by thresholding at zero.
pub trait Binarize {
    fn binarize(&self) -> Mask;
}
