//! Jaccard index (intersection over union) between two binary masks.

use ndarray::{ArrayBase, Data, Dimension, Zip};

use std::fmt;

use crate::error::{MaskPosition, NeurojaccardError, Result};
use crate::mask::{validate_binary, MASK_BACKGROUND};


/// Voxel counts of the overlap between two binary masks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MaskOverlap {
    /// Number of voxels set in both masks.
    pub intersection: usize,
    /// Number of voxels set in at least one of the masks.
    pub union: usize,
}

impl MaskOverlap {

    /// Count intersection and union of two masks of identical shape.
    ///
    /// Both masks are validated to be binary before anything is counted.
    pub fn from_masks<S1, S2, D>(mask_a: &ArrayBase<S1, D>, mask_b: &ArrayBase<S2, D>) -> Result<MaskOverlap>
    where
        S1: Data<Elem = u8>,
        S2: Data<Elem = u8>,
        D: Dimension,
    {
        validate_binary(mask_a, MaskPosition::First)?;
        validate_binary(mask_b, MaskPosition::Second)?;

        if mask_a.shape() != mask_b.shape() {
            return Err(NeurojaccardError::ShapeMismatch(mask_a.shape().to_vec(), mask_b.shape().to_vec()));
        }

        let overlap = Zip::from(mask_a).and(mask_b).fold(MaskOverlap::default(), |mut acc, &a, &b| {
            let in_a = a != MASK_BACKGROUND;
            let in_b = b != MASK_BACKGROUND;
            if in_a && in_b {
                acc.intersection += 1;
            }
            if in_a || in_b {
                acc.union += 1;
            }
            acc
        });
        Ok(overlap)
    }


    /// The Jaccard index `intersection / union`. Two empty masks have an index of exactly `0.0`.
    pub fn jaccard(&self) -> f64 {
        if self.union == 0 {
            return 0.0;
        }
        self.intersection as f64 / self.union as f64
    }
}

impl fmt::Display for MaskOverlap {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Mask overlap of {} voxels in a union of {} voxels.", self.intersection, self.union)
    }
}


/// Count the intersection and union voxels of two binary masks. See [`MaskOverlap::from_masks`].
pub fn overlap_counts<S1, S2, D>(mask_a: &ArrayBase<S1, D>, mask_b: &ArrayBase<S2, D>) -> Result<MaskOverlap>
where
    S1: Data<Elem = u8>,
    S2: Data<Elem = u8>,
    D: Dimension,
{
    MaskOverlap::from_masks(mask_a, mask_b)
}


/// Compute the Jaccard index of two binary masks of identical shape.
///
/// The result is in the closed interval `[0.0, 1.0]`. If both masks are entirely empty, the result is
/// `0.0` and no error is raised.
///
/// # Errors
///
/// * [`NeurojaccardError::NonBinaryMask`] if either mask contains a value other than 0 or 1.
/// * [`NeurojaccardError::ShapeMismatch`] if the masks differ in shape.
///
/// # Examples
///
/// ```
/// use ndarray::array;
/// let a = array![[1u8, 1], [0, 0]];
/// let b = array![[1u8, 0], [0, 1]];
/// let score = neurojaccard::compute_jaccard(&a, &b).unwrap();
/// assert_eq!(format!("{:.6}", score), "0.333333");
/// ```
pub fn compute_jaccard<S1, S2, D>(mask_a: &ArrayBase<S1, D>, mask_b: &ArrayBase<S2, D>) -> Result<f64>
where
    S1: Data<Elem = u8>,
    S2: Data<Elem = u8>,
    D: Dimension,
{
    Ok(MaskOverlap::from_masks(mask_a, mask_b)?.jaccard())
}
