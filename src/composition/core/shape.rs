//! Category-axis dimensions for hierarchical compositional models.
//!
//! The model classifies each observation along two nested axes:
//! - `n_coarse`: number of coarse (top-level) categories.
//! - `n_fine`: number of fine categories nested within the coarse axis.
//! - `n_obs`: number of observations (sites/samples); may be zero.
//!
//! Index 0 of each category axis is the **reference category**: its softmax
//! parameter is structurally fixed at zero, so the free parameter blocks have
//! `n_coarse − 1` and `n_fine − 1` columns respectively.
use crate::composition::errors::{CompositionError, CompositionResult};

/// Dimensions of a hierarchical compositional model.
///
/// - `n_coarse`: coarse category levels (≥ 1)
/// - `n_fine`: fine category levels (≥ 1)
/// - `n_obs`: observations (≥ 0)
///
/// Invariant: both category axes are non-empty, so softmax normalizers always
/// contain the reference term exp(0) = 1 and are never zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompositionShape {
    pub n_coarse: usize,
    pub n_fine: usize,
    pub n_obs: usize,
}

impl CompositionShape {
    /// Construct a [`CompositionShape`] and validate the category axes.
    ///
    /// # Invariants
    /// - `n_coarse ≥ 1` and `n_fine ≥ 1`. A zero-level axis would make the
    ///   softmax denominators empty, so it is rejected here rather than
    ///   surfacing as a division by zero deep inside the evaluator.
    /// - `n_obs` may be zero; an empty sample is a well-defined (trivial)
    ///   likelihood.
    ///
    /// # Errors
    /// - [`CompositionError::EmptyCategoryAxis`] if either axis has zero
    ///   levels.
    pub fn new(n_coarse: usize, n_fine: usize, n_obs: usize) -> CompositionResult<Self> {
        if n_coarse == 0 {
            return Err(CompositionError::EmptyCategoryAxis { axis: "coarse" });
        }
        if n_fine == 0 {
            return Err(CompositionError::EmptyCategoryAxis { axis: "fine" });
        }
        Ok(CompositionShape { n_coarse, n_fine, n_obs })
    }

    /// Length of the flat unconstrained parameter vector θ for this shape:
    /// `(n_coarse − 1) + n_coarse·(n_fine − 1) + 2·n_fine + 1`.
    pub fn theta_len(&self) -> usize {
        (self.n_coarse - 1) + self.n_coarse * (self.n_fine - 1) + 2 * self.n_fine + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Construction behavior of `CompositionShape::new`.
    // - Rejection of empty category axes.
    // - The θ-length formula for representative shapes.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify that `CompositionShape::new` succeeds for non-empty axes,
    // including the n_obs = 0 edge case.
    //
    // Given
    // -----
    // - `n_coarse = 3`, `n_fine = 4`, `n_obs = 0`.
    //
    // Expect
    // ------
    // - `Ok(..)` with all fields preserved.
    fn shape_new_accepts_empty_sample() {
        let shape = CompositionShape::new(3, 4, 0).unwrap();
        assert_eq!(shape.n_coarse, 3);
        assert_eq!(shape.n_fine, 4);
        assert_eq!(shape.n_obs, 0);
    }

    #[test]
    // Purpose
    // -------
    // Ensure a zero-level coarse axis is rejected as invalid configuration.
    //
    // Given
    // -----
    // - `n_coarse = 0`, `n_fine = 2`, `n_obs = 5`.
    //
    // Expect
    // ------
    // - `Err(CompositionError::EmptyCategoryAxis { axis: "coarse" })`.
    fn shape_new_rejects_empty_coarse_axis() {
        let result = CompositionShape::new(0, 2, 5);
        assert_eq!(result.unwrap_err(), CompositionError::EmptyCategoryAxis { axis: "coarse" });
    }

    #[test]
    // Purpose
    // -------
    // Ensure a zero-level fine axis is rejected as invalid configuration.
    //
    // Given
    // -----
    // - `n_coarse = 2`, `n_fine = 0`, `n_obs = 5`.
    //
    // Expect
    // ------
    // - `Err(CompositionError::EmptyCategoryAxis { axis: "fine" })`.
    fn shape_new_rejects_empty_fine_axis() {
        let result = CompositionShape::new(2, 0, 5);
        assert_eq!(result.unwrap_err(), CompositionError::EmptyCategoryAxis { axis: "fine" });
    }

    #[test]
    // Purpose
    // -------
    // Check the θ-length formula against hand-counted block sizes.
    //
    // Given
    // -----
    // - Shape (n_coarse = 3, n_fine = 4): blocks are 2 coarse effects,
    //   3·3 = 9 loadings, 4 intercepts, 4 slopes, and 1 ln_sigma.
    // - Shape (n_coarse = 1, n_fine = 1): every softmax block is empty and
    //   only the intercept, slope, and ln_sigma remain.
    //
    // Expect
    // ------
    // - `theta_len()` returns 20 and 3 respectively.
    fn theta_len_matches_block_sizes() {
        assert_eq!(CompositionShape::new(3, 4, 7).unwrap().theta_len(), 20);
        assert_eq!(CompositionShape::new(1, 1, 2).unwrap().theta_len(), 3);
    }
}
