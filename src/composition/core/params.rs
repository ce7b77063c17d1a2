//! Model-space parameters and the flat optimizer-vector mapping.
//!
//! This module provides the **model-space** parameter container
//! [`CompositionParams`] and its mapping to and from the **optimizer-space
//! vector** θ (an `ndarray::Array1<f64>`) consumed by external
//! gradient-based drivers.
//!
//! ## What this module defines
//! - [`CompositionParams`]: validated parameter blocks — coarse-category
//!   effects, the free loading matrix, response intercepts and slopes, and
//!   the log residual standard deviation.
//! - `from_theta` / `to_theta`: the flat packing used by optimizers.
//!
//! ## θ layout
//! All parameters are unconstrained reals, so the mapping is a pure
//! reshape (no nonlinear transform):
//!
//! ```text
//! θ = [ coarse_effects (n_c − 1)
//!     | loadings, row-major (n_c · (n_b − 1))
//!     | intercepts (n_b)
//!     | slopes (n_b)
//!     | ln_sigma (1) ]
//! ```
//!
//! The reference-category convention makes the softmax identifiable: index 0
//! of the coarse axis and column 0 of the loading matrix carry no free
//! parameter and are reconstructed as structural zeros by the transforms
//! layer, never stored here.
//!
//! ## Invariants validated by constructors
//! - `coarse_effects.len() == n_coarse − 1`
//! - `loadings.dim() == (n_coarse, n_fine − 1)`
//! - `intercepts.len() == slopes.len() == n_fine`
//! - every coordinate (including `ln_sigma`) is finite
use crate::composition::{
    core::{
        shape::CompositionShape,
        validation::{validate_loadings, validate_param_block, validate_theta},
    },
    errors::{ParamError, ParamResult},
};
use ndarray::{s, Array1, Array2, ArrayView1};

/// Validated **model-space** parameters for a hierarchical compositional
/// model.
///
/// Invariants are validated at construction; use this type to evaluate the
/// likelihood. See [`CompositionParams::from_theta`] for the optimizer-space
/// mapping.
#[derive(Debug, Clone, PartialEq)]
pub struct CompositionParams {
    /// Free coarse-category log-odds (length n_coarse − 1; index 0 of the
    /// coarse axis is the reference and has no entry here).
    pub coarse_effects: Array1<f64>,
    /// Free fine-category loadings (n_coarse × (n_fine − 1); fine column 0
    /// is the reference and has no column here).
    pub loadings: Array2<f64>,
    /// Per-fine-category response intercepts (length n_fine).
    pub intercepts: Array1<f64>,
    /// Per-fine-category covariate sensitivities (length n_fine).
    pub slopes: Array1<f64>,
    /// Log residual standard deviation of the log-normal response.
    pub ln_sigma: f64,
}

impl CompositionParams {
    /// Create validated model-space parameters.
    ///
    /// Validates every block against `shape` (lengths/shapes as documented
    /// on the module) and rejects non-finite coordinates.
    ///
    /// # Errors
    /// - `ParamError::CoarseEffectsLengthMismatch`,
    ///   `ParamError::LoadingsShapeMismatch`,
    ///   `ParamError::InterceptsLengthMismatch`,
    ///   `ParamError::SlopesLengthMismatch` on dimension mismatches.
    /// - `ParamError::NonFiniteParam` / `ParamError::NonFiniteLnSigma` for
    ///   NaN/±∞ coordinates.
    pub fn new(
        coarse_effects: Array1<f64>, loadings: Array2<f64>, intercepts: Array1<f64>,
        slopes: Array1<f64>, ln_sigma: f64, shape: &CompositionShape,
    ) -> ParamResult<Self> {
        validate_param_block(coarse_effects.view(), shape.n_coarse - 1, "coarse_effects")?;
        validate_loadings(loadings.view(), shape)?;
        validate_param_block(intercepts.view(), shape.n_fine, "intercepts")?;
        validate_param_block(slopes.view(), shape.n_fine, "slopes")?;
        if !ln_sigma.is_finite() {
            return Err(ParamError::NonFiniteLnSigma { value: ln_sigma });
        }
        Ok(CompositionParams { coarse_effects, loadings, intercepts, slopes, ln_sigma })
    }

    /// Build validated model-space parameters from an optimizer-space vector
    /// θ.
    ///
    /// ### Inputs
    /// - `theta`: flat vector with the layout documented on the module
    ///   (`len == shape.theta_len()`), all entries finite.
    /// - `shape`: category-axis dimensions.
    ///
    /// ### Behavior
    /// 1. Validates length and finiteness via `validate_theta`.
    /// 2. Slices the blocks in order and reshapes the loading block
    ///    row-major into `(n_coarse, n_fine − 1)`.
    ///
    /// ### Returns
    /// A fully validated [`CompositionParams`] owning copies of each block.
    /// On invalid input, returns a descriptive [`ParamError`].
    pub fn from_theta(theta: ArrayView1<f64>, shape: &CompositionShape) -> ParamResult<Self> {
        validate_theta(theta, shape)?;
        let n_c = shape.n_coarse;
        let n_b = shape.n_fine;
        let n_effects = n_c - 1;
        let n_loadings = n_c * (n_b - 1);

        let mut offset = 0;
        let coarse_effects = theta.slice(s![offset..offset + n_effects]).to_owned();
        offset += n_effects;
        let loadings = theta
            .slice(s![offset..offset + n_loadings])
            .to_owned()
            .into_shape((n_c, n_b - 1))
            .map_err(|_| ParamError::LoadingsShapeMismatch {
                expected: (n_c, n_b - 1),
                actual: (n_loadings, 1),
            })?;
        offset += n_loadings;
        let intercepts = theta.slice(s![offset..offset + n_b]).to_owned();
        offset += n_b;
        let slopes = theta.slice(s![offset..offset + n_b]).to_owned();
        offset += n_b;
        let ln_sigma = theta[offset];

        Ok(CompositionParams { coarse_effects, loadings, intercepts, slopes, ln_sigma })
    }

    /// Map model-space parameters to the **optimizer-space** vector θ.
    ///
    /// Inverse of [`CompositionParams::from_theta`]; the loading matrix is
    /// flattened row-major. Returns a newly allocated `Array1<f64>` of
    /// length `shape.theta_len()`.
    ///
    /// ### Notes
    /// - Assumes this instance already satisfies the model-space invariants.
    pub fn to_theta(&self, shape: &CompositionShape) -> Array1<f64> {
        let mut theta = Array1::<f64>::zeros(shape.theta_len());
        let n_effects = shape.n_coarse - 1;
        let n_loadings = shape.n_coarse * (shape.n_fine - 1);

        let mut offset = 0;
        theta.slice_mut(s![offset..offset + n_effects]).assign(&self.coarse_effects);
        offset += n_effects;
        theta
            .slice_mut(s![offset..offset + n_loadings])
            .assign(&Array1::from_iter(self.loadings.iter().copied()));
        offset += n_loadings;
        theta.slice_mut(s![offset..offset + shape.n_fine]).assign(&self.intercepts);
        offset += shape.n_fine;
        theta.slice_mut(s![offset..offset + shape.n_fine]).assign(&self.slopes);
        offset += shape.n_fine;
        theta[offset] = self.ln_sigma;
        theta
    }

    /// Residual standard deviation of the log-normal response,
    /// `σ = exp(ln_sigma)`.
    pub fn sigma(&self) -> f64 {
        self.ln_sigma.exp()
    }
}
