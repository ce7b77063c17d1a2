//! Hierarchical compositional model: the user-facing evaluation surface.
//!
//! This module wires the validated containers (`CompositionData`,
//! `CompositionParams`) to the likelihood driver in `core::likelihood`. It
//! is the type external drivers hold on to: the optimizer adapter calls
//! [`HierarchicalModel::evaluate_theta`] with candidate flat vectors, and
//! diagnostic consumers call [`HierarchicalModel::evaluate`] with
//! model-space parameters.
//!
//! Key ideas:
//! - The model itself is just the shape; every evaluation is a pure
//!   function of `(params, data)` with no state carried across calls.
//! - The flat θ layout is documented on
//!   [`CompositionParams::from_theta`]; `evaluate_theta` validates and
//!   unpacks before delegating.
use crate::composition::{
    core::{
        data::CompositionData,
        likelihood::evaluate_objective,
        params::CompositionParams,
        report::Evaluation,
        shape::CompositionShape,
    },
    errors::{CompositionError, CompositionResult},
};
use ndarray::ArrayView1;

/// Hierarchical compositional model over fixed category axes.
///
/// Encapsulates the model dimensions and exposes the evaluation entry
/// points. Construction validates nothing beyond the shape (already checked
/// by [`CompositionShape::new`]); all heavy validation happens per call at
/// the data/parameter boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HierarchicalModel {
    /// Category-axis dimensions this model was configured for.
    pub shape: CompositionShape,
}

impl HierarchicalModel {
    /// Construct a model for the given shape.
    pub fn new(shape: CompositionShape) -> HierarchicalModel {
        HierarchicalModel { shape }
    }

    /// Evaluate the objective and diagnostics at model-space parameters.
    ///
    /// # Errors
    /// - [`CompositionError::ModelShapeMismatch`] if `data` was built for a
    ///   different shape than this model.
    /// - Propagates every error from the likelihood driver (parameter/shape
    ///   disagreements, invalid σ, non-finite objective).
    pub fn evaluate(
        &self, params: &CompositionParams, data: &CompositionData,
    ) -> CompositionResult<Evaluation> {
        self.check_data(data)?;
        evaluate_objective(params, data)
    }

    /// Evaluate the objective and diagnostics at a flat optimizer vector θ.
    ///
    /// Validates and unpacks θ (layout documented on
    /// [`CompositionParams::from_theta`]) and delegates to
    /// [`HierarchicalModel::evaluate`]. This is the entry point the argmin
    /// adapter uses.
    ///
    /// # Errors
    /// - Propagates `ParamError` (as `CompositionError::InvalidParams`) for
    ///   malformed θ, plus everything `evaluate` can return.
    pub fn evaluate_theta(
        &self, theta: ArrayView1<f64>, data: &CompositionData,
    ) -> CompositionResult<Evaluation> {
        self.check_data(data)?;
        let params = CompositionParams::from_theta(theta, &self.shape)?;
        evaluate_objective(&params, data)
    }

    /// Length of the flat θ vector this model expects.
    pub fn theta_len(&self) -> usize {
        self.shape.theta_len()
    }

    fn check_data(&self, data: &CompositionData) -> CompositionResult<()> {
        if data.shape != self.shape {
            return Err(CompositionError::ModelShapeMismatch {
                expected: (self.shape.n_coarse, self.shape.n_fine, self.shape.n_obs),
                actual: (data.shape.n_coarse, data.shape.n_fine, data.shape.n_obs),
            });
        }
        Ok(())
    }
}
