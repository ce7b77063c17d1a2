//! Adapter that exposes the compositional objective as an `argmin` problem.
//!
//! The evaluator already produces a *negative* log-likelihood, so the cost
//! is the objective itself and no sign flip is involved. Gradients are
//! finite-difference approximations of the cost: central differences first,
//! then a forward-difference retry if the central pass either tripped an
//! evaluation error or produced a non-finite/incorrectly sized gradient.
//! The finite-difference closure cannot return `Result`, so evaluation
//! errors raised inside it are captured in a side slot and surfaced after
//! the pass.
use std::cell::RefCell;

use crate::{
    composition::{
        core::data::CompositionData, errors::CompositionError,
        models::hierarchical::HierarchicalModel,
    },
    driver::{Cost, Grad, Theta},
};
use argmin::core::{CostFunction, Error, Gradient};
use finitediff::FiniteDiff;

/// Bridges a [`HierarchicalModel`] and its data to `argmin`'s
/// `CostFunction` and `Gradient`.
///
/// - `CostFunction::cost` returns the negative log-likelihood at θ.
/// - `Gradient::gradient` returns a finite-difference gradient of the cost.
///
/// The adapter borrows the model and data; the external executor owns the
/// optimization loop and the parameter iterates.
#[derive(Debug, Clone)]
pub struct ObjectiveAdapter<'a> {
    pub model: &'a HierarchicalModel,
    pub data: &'a CompositionData,
}

impl<'a> ObjectiveAdapter<'a> {
    /// Construct a new adapter over a model and its observation bundle.
    pub fn new(model: &'a HierarchicalModel, data: &'a CompositionData) -> Self {
        Self { model, data }
    }
}

impl<'a> CostFunction for ObjectiveAdapter<'a> {
    type Param = Theta;
    type Output = Cost;

    /// Evaluate the negative log-likelihood at θ.
    ///
    /// # Errors
    /// Propagates every structured error from
    /// [`HierarchicalModel::evaluate_theta`] (malformed θ, shape
    /// disagreements, invalid σ, non-finite objective).
    fn cost(&self, theta: &Self::Param) -> Result<Self::Output, Error> {
        let evaluation = self.model.evaluate_theta(theta.view(), self.data)?;
        Ok(evaluation.objective)
    }
}

impl<'a> Gradient for ObjectiveAdapter<'a> {
    type Param = Theta;
    type Gradient = Grad;

    /// Finite-difference gradient of the cost at θ.
    ///
    /// Behavior:
    /// - Try *central* differences first.
    /// - If any cost evaluation inside the pass failed (captured via
    ///   `closure_err`) or the central gradient fails validation (wrong
    ///   dimension or non-finite entries), retry once with *forward*
    ///   differences and validate again.
    ///
    /// # Errors
    /// - Propagates any error raised by cost evaluations performed during
    ///   the finite-difference passes.
    /// - Returns a validation error if the final gradient has the wrong
    ///   dimension or non-finite entries.
    fn gradient(&self, theta: &Self::Param) -> Result<Self::Gradient, Error> {
        let dim = theta.len();
        let closure_err: RefCell<Option<Error>> = RefCell::new(None);
        let cost_func = |theta: &Theta| -> f64 {
            match self.cost(theta) {
                Ok(val) => val,
                Err(e) => {
                    let mut slot = closure_err.borrow_mut();
                    if slot.is_none() {
                        *slot = Some(e);
                    }
                    f64::NAN
                }
            }
        };

        let fd_grad = theta.central_diff(&cost_func);
        if closure_err.borrow().is_none() && validate_grad(&fd_grad, dim).is_ok() {
            return Ok(fd_grad);
        }
        run_forward_diff(theta, &cost_func, &closure_err)
    }
}

/// Compute a forward-difference gradient of `func` at `theta`, with error
/// capture.
///
/// The finite-difference closure can't return `Result`, so any error raised
/// by `func` is stored into `closure_err` and the closure returns `NaN`.
/// This helper clears `closure_err`, performs `forward_diff`, surfaces any
/// captured error, and validates the resulting gradient.
fn run_forward_diff<G: Fn(&Theta) -> f64>(
    theta: &Theta, func: &G, closure_err: &RefCell<Option<Error>>,
) -> Result<Grad, Error> {
    closure_err.replace(None);
    let fd_grad = theta.forward_diff(func);
    if let Some(err) = closure_err.take() {
        return Err(err);
    }
    validate_grad(&fd_grad, theta.len())?;
    Ok(fd_grad)
}

/// Check that a finite-difference gradient has the expected dimension and
/// only finite entries.
fn validate_grad(grad: &Grad, dim: usize) -> Result<(), Error> {
    if grad.len() != dim {
        return Err(CompositionError::InvalidParams {
            message: format!("gradient length {} does not match theta length {dim}", grad.len()),
        }
        .into());
    }
    if let Some(&value) = grad.iter().find(|v| !v.is_finite()) {
        return Err(CompositionError::NonFiniteObjective { value }.into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::composition::core::shape::CompositionShape;
    use approx::assert_abs_diff_eq;
    use ndarray::{array, Array1};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Cost pass-through (no sign flip) against a direct evaluation.
    // - Finite-difference gradient sanity on a smooth point: finite entries,
    //   correct dimension, and sign agreement with a directional secant.
    // - Error propagation for malformed θ.
    // -------------------------------------------------------------------------

    fn setup() -> (HierarchicalModel, CompositionData) {
        let shape = CompositionShape::new(2, 2, 2).unwrap();
        let model = HierarchicalModel::new(shape);
        let data = CompositionData::new(
            array![[0.6, 0.2], [0.4, 0.8]],
            array![[0.3, 0.7], [0.7, 0.3]],
            array![1.2, 0.8],
            array![1.0, -1.0],
            shape,
        )
        .unwrap();
        (model, data)
    }

    #[test]
    // Purpose
    // -------
    // The adapter's cost is exactly the evaluator's objective.
    //
    // Given
    // -----
    // - A (2, 2, 2) model/data pair and a non-trivial θ.
    //
    // Expect
    // ------
    // - `cost(θ)` equals `evaluate_theta(θ).objective` bit for bit.
    fn cost_matches_direct_evaluation() {
        let (model, data) = setup();
        let adapter = ObjectiveAdapter::new(&model, &data);
        let theta = array![0.3, 0.5, -0.2, 0.1, 0.4, 0.7, -0.6, -0.1];

        let cost = adapter.cost(&theta).unwrap();
        let direct = model.evaluate_theta(theta.view(), &data).unwrap().objective;
        assert_eq!(cost, direct);
    }

    #[test]
    // Purpose
    // -------
    // The finite-difference gradient is finite, has θ's dimension, and
    // agrees in direction with a coarse secant along each coordinate.
    //
    // Given
    // -----
    // - The same smooth evaluation point as above.
    //
    // Expect
    // ------
    // - Every entry finite; each entry within 1e-4 of the secant slope
    //   computed with step 1e-6.
    fn gradient_matches_secant_slopes() {
        let (model, data) = setup();
        let adapter = ObjectiveAdapter::new(&model, &data);
        let theta = array![0.3, 0.5, -0.2, 0.1, 0.4, 0.7, -0.6, -0.1];

        let grad = adapter.gradient(&theta).unwrap();
        assert_eq!(grad.len(), theta.len());

        let step = 1e-6;
        for k in 0..theta.len() {
            let mut up = theta.clone();
            up[k] += step;
            let mut down = theta.clone();
            down[k] -= step;
            let secant =
                (adapter.cost(&up).unwrap() - adapter.cost(&down).unwrap()) / (2.0 * step);
            assert!(grad[k].is_finite());
            assert_abs_diff_eq!(grad[k], secant, epsilon = 1e-4);
        }
    }

    #[test]
    // Purpose
    // -------
    // A θ of the wrong length is rejected through both the cost and
    // gradient paths rather than producing a silent NaN.
    //
    // Given
    // -----
    // - θ of length 7 where the model expects 8.
    //
    // Expect
    // ------
    // - Both `cost` and `gradient` return `Err(..)`.
    fn malformed_theta_propagates_errors() {
        let (model, data) = setup();
        let adapter = ObjectiveAdapter::new(&model, &data);
        let theta = Array1::<f64>::zeros(7);

        assert!(adapter.cost(&theta).is_err());
        assert!(adapter.gradient(&theta).is_err());
    }
}
