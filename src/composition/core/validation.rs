//! Validation helpers — reusable checks for observations and parameters.
//!
//! Purpose
//! -------
//! Centralize the small validation routines used across the compositional
//! likelihood stack. These helpers enforce the call-boundary preconditions of
//! the evaluator (dimension consistency, finiteness, positivity of the
//! continuous response) so higher-level constructors fail fast with
//! structured errors and the numeric core can assume clean inputs.
//!
//! Key behaviors
//! -------------
//! - Validate observed proportion matrices (shape, finiteness,
//!   non-negativity). Column sums are deliberately *not* checked; the
//!   evaluator treats observed proportions as multinomial weights.
//! - Validate the continuous response (finite, strictly positive — its log
//!   enters the likelihood) and the covariate (finite).
//! - Validate model-space parameter blocks and flat optimizer vectors θ
//!   against a [`CompositionShape`].
//!
//! Conventions
//! -----------
//! - Indices are 0-based and follow the usual Rust/ndarray conventions.
//! - Validation functions return [`CompositionResult`] or [`ParamResult`]
//!   and never panic on invalid *inputs*.
//! - This module contains no I/O; it only inspects numeric values and array
//!   shapes.
use crate::composition::{
    core::shape::CompositionShape,
    errors::{CompositionError, CompositionResult, ParamError, ParamResult},
};
use ndarray::{ArrayView1, ArrayView2};

/// Validate an observed proportion matrix against an expected shape.
///
/// Parameters
/// ----------
/// - `proportions`: candidate matrix, rows = categories, columns =
///   observations.
/// - `expected`: `(rows, cols)` implied by the model shape.
/// - `axis`: `"coarse"` or `"fine"`, used in error payloads.
///
/// Returns
/// -------
/// `CompositionResult<()>`
///   - `Ok(())` if the shape matches and all entries are finite and ≥ 0.
///   - `Err(CompositionError)` describing the first violation encountered.
///
/// Errors
/// ------
/// - `CoarseShapeMismatch` / `FineShapeMismatch` on a shape mismatch.
/// - `NonFiniteProportion` / `NegativeProportion` with the offending
///   `(row, col)` and value.
///
/// Notes
/// -----
/// - Column sums are not checked; the model does not require the observed
///   columns to be exact probability vectors.
pub fn validate_proportions(
    proportions: ArrayView2<f64>, expected: (usize, usize), axis: &'static str,
) -> CompositionResult<()> {
    if proportions.dim() != expected {
        return Err(match axis {
            "coarse" => {
                CompositionError::CoarseShapeMismatch { expected, actual: proportions.dim() }
            }
            _ => CompositionError::FineShapeMismatch { expected, actual: proportions.dim() },
        });
    }
    for ((row, col), &value) in proportions.indexed_iter() {
        if !value.is_finite() {
            return Err(CompositionError::NonFiniteProportion { axis, row, col, value });
        }
        if value < 0.0 {
            return Err(CompositionError::NegativeProportion { axis, row, col, value });
        }
    }
    Ok(())
}

/// Validate the continuous response vector (length `n_obs`, finite, > 0).
///
/// The response is modeled as log-normal, so its logarithm is taken directly
/// during evaluation; zero or negative values are rejected here rather than
/// producing a non-finite likelihood term downstream.
///
/// # Errors
/// - `CompositionError::ResponseLengthMismatch` on a length mismatch.
/// - `CompositionError::NonFiniteResponse` / `NonPositiveResponse` with the
///   first offending index and value.
pub fn validate_response(response: ArrayView1<f64>, n_obs: usize) -> CompositionResult<()> {
    if response.len() != n_obs {
        return Err(CompositionError::ResponseLengthMismatch {
            expected: n_obs,
            actual: response.len(),
        });
    }
    for (index, &value) in response.iter().enumerate() {
        if !value.is_finite() {
            return Err(CompositionError::NonFiniteResponse { index, value });
        }
        if value <= 0.0 {
            return Err(CompositionError::NonPositiveResponse { index, value });
        }
    }
    Ok(())
}

/// Validate the covariate vector (length `n_obs`, finite).
///
/// # Errors
/// - `CompositionError::CovariateLengthMismatch` on a length mismatch.
/// - `CompositionError::NonFiniteCovariate` with the first offending index
///   and value.
pub fn validate_covariate(covariate: ArrayView1<f64>, n_obs: usize) -> CompositionResult<()> {
    if covariate.len() != n_obs {
        return Err(CompositionError::CovariateLengthMismatch {
            expected: n_obs,
            actual: covariate.len(),
        });
    }
    for (index, &value) in covariate.iter().enumerate() {
        if !value.is_finite() {
            return Err(CompositionError::NonFiniteCovariate { index, value });
        }
    }
    Ok(())
}

/// Validate a 1-D model-space parameter block: expected length, all finite.
///
/// `block` names the parameter block ("coarse_effects", "intercepts",
/// "slopes") in error payloads.
pub fn validate_param_block(
    values: ArrayView1<f64>, expected: usize, block: &'static str,
) -> ParamResult<()> {
    if values.len() != expected {
        return Err(match block {
            "coarse_effects" => {
                ParamError::CoarseEffectsLengthMismatch { expected, actual: values.len() }
            }
            "intercepts" => {
                ParamError::InterceptsLengthMismatch { expected, actual: values.len() }
            }
            _ => ParamError::SlopesLengthMismatch { expected, actual: values.len() },
        });
    }
    for (index, &value) in values.iter().enumerate() {
        if !value.is_finite() {
            return Err(ParamError::NonFiniteParam { block, index, value });
        }
    }
    Ok(())
}

/// Validate the free loading matrix: shape `(n_coarse, n_fine − 1)`, all
/// finite.
pub fn validate_loadings(
    loadings: ArrayView2<f64>, shape: &CompositionShape,
) -> ParamResult<()> {
    let expected = (shape.n_coarse, shape.n_fine - 1);
    if loadings.dim() != expected {
        return Err(ParamError::LoadingsShapeMismatch { expected, actual: loadings.dim() });
    }
    for ((row, col), &value) in loadings.indexed_iter() {
        if !value.is_finite() {
            return Err(ParamError::NonFiniteParam {
                block: "loadings",
                index: row * (shape.n_fine - 1) + col,
                value,
            });
        }
    }
    Ok(())
}

/// Validate a flat unconstrained optimizer vector θ against a shape.
///
/// Checks `theta.len() == shape.theta_len()` and that every entry is finite.
/// Layout and block order are documented on
/// [`CompositionParams::from_theta`](crate::composition::core::params::CompositionParams::from_theta).
pub fn validate_theta(theta: ArrayView1<f64>, shape: &CompositionShape) -> ParamResult<()> {
    let expected = shape.theta_len();
    if theta.len() != expected {
        return Err(ParamError::ThetaLengthMismatch { expected, actual: theta.len() });
    }
    for (index, &value) in theta.iter().enumerate() {
        if !value.is_finite() {
            return Err(ParamError::NonFiniteTheta { index, value });
        }
    }
    Ok(())
}
