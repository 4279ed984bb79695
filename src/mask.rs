//! Binary voxel masks.
//!
//! A mask marks the spatial extent of a segmented structure: `1` for voxels inside the
//! structure, `0` everywhere else. Masks are usually derived from a loaded scalar volume
//! by [`threshold`], which turns any continuous or multi-label volume into a strict binary one.

use ndarray::{Array, ArrayBase, ArrayD, Data, Dimension};
use ndarray_stats::QuantileExt;

use crate::error::{MaskPosition, NeurojaccardError, Result};

/// A binary mask of arbitrary dimensionality.
pub type Mask = ArrayD<u8>;

pub const MASK_BACKGROUND: u8 = 0;
pub const MASK_FOREGROUND: u8 = 1;


/// Threshold a scalar volume at zero: values `> 0` become [`MASK_FOREGROUND`], everything else (including NaN) becomes [`MASK_BACKGROUND`].
///
/// # Examples
///
/// ```
/// use ndarray::array;
/// let mask = neurojaccard::threshold(&array![[0.0f64, 0.7], [-3.0, 12.0]]);
/// assert_eq!(mask, array![[0u8, 1], [0, 1]]);
/// ```
pub fn threshold<S, D>(volume: &ArrayBase<S, D>) -> Array<u8, D>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    volume.mapv(|v| if v > 0.0 { MASK_FOREGROUND } else { MASK_BACKGROUND })
}


/// Check that the mask contains only 0s and 1s.
///
/// An empty mask is binary. The `position` is reported in the error to tell the two inputs of a comparison apart.
pub fn validate_binary<S, D>(mask: &ArrayBase<S, D>, position: MaskPosition) -> Result<()>
where
    S: Data<Elem = u8>,
    D: Dimension,
{
    match mask.max() {
        Ok(&max) if max > MASK_FOREGROUND => Err(NeurojaccardError::NonBinaryMask(position, max)),
        // An empty mask has no maximum.
        _ => Ok(()),
    }
}


#[cfg(test)]
mod test {
    use super::*;
    use ndarray::{array, Array3};

    fn is_binary<S, D>(mask: &ArrayBase<S, D>) -> bool
    where
        S: Data<Elem = u8>,
        D: Dimension,
    {
        validate_binary(mask, MaskPosition::First).is_ok()
    }

    #[test]
    fn thresholding_keeps_only_positive_values() {
        let volume = array![[-1.0f64, 0.0, 0.0001], [f64::NAN, 2.5, -0.0]];
        let mask = threshold(&volume);
        assert_eq!(mask, array![[0u8, 0, 1], [0, 1, 0]]);
        assert!(is_binary(&mask));
    }

    #[test]
    fn thresholding_a_multi_label_volume_merges_all_labels() {
        let labels: Array3<f64> = Array3::from_shape_fn((3, 3, 3), |(i, j, k)| ((i + j + k) % 4) as f64);
        let mask = threshold(&labels);
        assert_eq!(mask.shape(), &[3, 3, 3]);
        assert!(is_binary(&mask));
        assert_eq!(mask[[0, 0, 0]], 0);
        assert_eq!(mask[[0, 1, 2]], 1);
    }

    #[test]
    fn binary_masks_pass_validation() {
        let mask = array![[1u8, 0], [0, 1]];
        assert!(validate_binary(&mask, MaskPosition::First).is_ok());
        assert!(validate_binary(&Array3::<u8>::zeros((2, 2, 2)), MaskPosition::Second).is_ok());
    }

    #[test]
    fn empty_masks_are_binary() {
        let mask = Array3::<u8>::zeros((0, 4, 4));
        assert!(is_binary(&mask));
    }

    #[test]
    fn non_binary_masks_are_rejected_with_position_and_value() {
        let mask = array![[1u8, 0], [2, 7]];
        match validate_binary(&mask, MaskPosition::Second) {
            Err(NeurojaccardError::NonBinaryMask(position, value)) => {
                assert_eq!(position, MaskPosition::Second);
                assert_eq!(value, 7);
            }
            other => panic!("expected NonBinaryMask, got {:?}", other),
        }
        assert!(!is_binary(&mask));
    }

    #[test]
    fn values_below_single_precision_range_stay_in_the_mask() {
        let volume = array![1e-50f64, 1e-300, -1e-50, 0.0];
        let mask = threshold(&volume);
        assert_eq!(mask, array![1u8, 1, 0, 0]);
    }
}
