//! Observation containers for hierarchical compositional models.
//!
//! Purpose
//! -------
//! Provide a small, validated container for the observed arrays consumed by
//! the likelihood evaluator: coarse and fine proportion matrices, the
//! continuous response, and the covariate. This module centralizes input
//! validation so the numeric core can assume dimension-consistent, finite
//! data.
//!
//! Key behaviors
//! -------------
//! - [`CompositionData`] enforces the call-boundary invariants of the
//!   evaluator at construction: matching dimensions across all four arrays,
//!   finite non-negative proportions, a finite strictly positive response,
//!   and a finite covariate.
//! - The owning [`CompositionShape`] is stored alongside the arrays so
//!   downstream code never re-derives dimensions from raw array extents.
//!
//! Invariants & assumptions
//! ------------------------
//! - `coarse` has shape `(n_coarse, n_obs)`; `fine` has shape
//!   `(n_fine, n_obs)`; `carbon` and `temperature` have length `n_obs`.
//! - Proportions are finite and ≥ 0. Column sums are **not** enforced; the
//!   evaluator treats observed proportions as multinomial weights.
//! - `carbon` entries are finite and strictly > 0 (their log is taken by the
//!   response likelihood).
//! - `n_obs = 0` is valid: the likelihood over an empty sample is zero.
//!
//! Downstream usage
//! ----------------
//! - Construct [`CompositionData`] at the boundary where raw observations
//!   enter the modeling stack (Rust callers or the PyO3 layer).
//! - Consumers (the evaluator, the optimizer adapter) may rely on these
//!   invariants and skip re-validation in hot paths.
//!
//! Testing notes
//! -------------
//! - Unit tests cover the happy path, every rejection path, and the empty
//!   sample edge case.
use crate::composition::{
    core::{
        shape::CompositionShape,
        validation::{validate_covariate, validate_proportions, validate_response},
    },
    errors::CompositionResult,
};
use ndarray::{Array1, Array2};

/// `CompositionData` — validated observation bundle for one evaluation.
///
/// Purpose
/// -------
/// Represent the full set of observed arrays for a hierarchical
/// compositional model, validated once at construction so the evaluator can
/// assume clean inputs.
///
/// Fields
/// ------
/// - `coarse`: `Array2<f64>` of shape `(n_coarse, n_obs)`
///   Observed coarse-category proportions per observation (column).
/// - `fine`: `Array2<f64>` of shape `(n_fine, n_obs)`
///   Observed fine-category proportions per observation.
/// - `carbon`: `Array1<f64>` of length `n_obs`
///   Continuous response; finite and strictly positive (modeled as
///   log-normal).
/// - `temperature`: `Array1<f64>` of length `n_obs`
///   Covariate driving the response mean; finite, any sign.
/// - `shape`: [`CompositionShape`]
///   The dimensions all arrays were validated against.
///
/// Invariants
/// ----------
/// - All dimension-consistency invariants listed in the module docs hold.
/// - Validation is O(n_coarse·n_obs + n_fine·n_obs) and performed exactly
///   once; this type is immutable afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct CompositionData {
    /// Observed coarse proportions, rows = coarse categories.
    pub coarse: Array2<f64>,
    /// Observed fine proportions, rows = fine categories.
    pub fine: Array2<f64>,
    /// Continuous response (finite, > 0).
    pub carbon: Array1<f64>,
    /// Covariate entering the response mean.
    pub temperature: Array1<f64>,
    /// Dimensions the arrays were validated against.
    pub shape: CompositionShape,
}

impl CompositionData {
    /// Construct a validated [`CompositionData`] instance.
    ///
    /// Parameters
    /// ----------
    /// - `coarse`: observed coarse proportions, shape `(n_coarse, n_obs)`.
    /// - `fine`: observed fine proportions, shape `(n_fine, n_obs)`.
    /// - `carbon`: continuous response, length `n_obs`, strictly positive.
    /// - `temperature`: covariate, length `n_obs`, finite.
    /// - `shape`: the dimensions to validate against (already checked for
    ///   non-empty category axes by [`CompositionShape::new`]).
    ///
    /// Returns
    /// -------
    /// `CompositionResult<CompositionData>`
    ///   - `Ok(..)` if all invariants are satisfied.
    ///   - `Err(CompositionError)` describing the first violation.
    ///
    /// Errors
    /// ------
    /// - `CoarseShapeMismatch` / `FineShapeMismatch` on matrix shape
    ///   mismatches.
    /// - `NonFiniteProportion` / `NegativeProportion` for invalid proportion
    ///   entries.
    /// - `ResponseLengthMismatch` / `NonFiniteResponse` /
    ///   `NonPositiveResponse` for an invalid response.
    /// - `CovariateLengthMismatch` / `NonFiniteCovariate` for an invalid
    ///   covariate.
    ///
    /// Panics
    /// ------
    /// - Never panics. All invalid inputs are reported via
    ///   `CompositionError`.
    ///
    /// Examples
    /// --------
    /// ```rust
    /// # use ndarray::array;
    /// # use rust_composition::composition::core::data::CompositionData;
    /// # use rust_composition::composition::core::shape::CompositionShape;
    /// #
    /// let shape = CompositionShape::new(2, 2, 1).unwrap();
    /// let data = CompositionData::new(
    ///     array![[0.5], [0.5]],
    ///     array![[0.5], [0.5]],
    ///     array![1.0],
    ///     array![0.0],
    ///     shape,
    /// )
    /// .unwrap();
    /// assert_eq!(data.shape.n_obs, 1);
    /// ```
    pub fn new(
        coarse: Array2<f64>, fine: Array2<f64>, carbon: Array1<f64>, temperature: Array1<f64>,
        shape: CompositionShape,
    ) -> CompositionResult<Self> {
        validate_proportions(coarse.view(), (shape.n_coarse, shape.n_obs), "coarse")?;
        validate_proportions(fine.view(), (shape.n_fine, shape.n_obs), "fine")?;
        validate_response(carbon.view(), shape.n_obs)?;
        validate_covariate(temperature.view(), shape.n_obs)?;
        Ok(CompositionData { coarse, fine, carbon, temperature, shape })
    }
}
