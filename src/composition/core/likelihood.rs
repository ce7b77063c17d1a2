//! Joint likelihood evaluation for the hierarchical compositional model.
//!
//! Implements the single numeric pass shared by every caller: reconstruct
//! the reference-pinned softmax parameters, derive the predicted coarse and
//! fine distributions, derive the response mean, and accumulate the total
//! negative log-likelihood.
//!
//! ## Model
//! - Coarse level: multinomial cross-entropy between observed coarse
//!   proportions and `softmax(beta)`, with `beta[0] = 0`. The coarse
//!   distribution carries no observation dependence.
//! - Fine level: multinomial cross-entropy between observed fine
//!   proportions and a softmax over the per-category scores
//!   `Σ_c A[c,b]·phat_c[c,i]`, with loading column 0 pinned at zero.
//! - Response: `ln(carbon[i])` is normal with mean
//!   `chat[i] = Σ_b (alpha[b] + gamma[b]·temperature[i]·phat_b[b,i])` and
//!   standard deviation `exp(ln_sigma)` (log-normal carbon).
//!
//! ## Shared fine pass
//! The fine-category probabilities feed both the multinomial term and the
//! response mean. They are computed once and reused for both terms, and the
//! fine cross-entropy enters the objective exactly once.
//!
//! ## Numerics
//! The evaluation is a pure function of its inputs: no caching, no state
//! across calls, O(n_coarse·n_fine·n_obs). A non-finite accumulated
//! objective (e.g. a softmax weight that underflowed to zero under an
//! extreme parameter vector) is surfaced as an error rather than returned
//! as NaN.
use crate::composition::{
    core::{
        data::CompositionData,
        params::CompositionParams,
        report::{CompositionReport, Evaluation},
        transforms::{
            coarse_probabilities, fine_probability_column, reconstruct_beta,
            reconstruct_loadings,
        },
        validation::{validate_loadings, validate_param_block},
    },
    errors::{CompositionError, CompositionResult},
};
use ndarray::{Array1, Array2};
use statrs::distribution::{Continuous, Normal};

/// Evaluate the total negative log-likelihood and diagnostic report.
///
/// This driver:
/// 1) Cross-validates `params` against `data.shape` (the two are
///    constructed independently and may disagree).
/// 2) Reconstructs `beta` and the full loading matrix, pinning the
///    reference entries at zero.
/// 3) Derives the coarse and fine distributions once (both are
///    observation-invariant) and, per observation, the response mean.
/// 4) Accumulates the coarse and fine cross-entropy terms and the normal
///    log-density of `ln(carbon[i])`.
///
/// # Inputs
/// - `params`: validated model-space parameters.
/// - `data`: validated observation bundle.
///
/// # Returns
/// - An [`Evaluation`] holding the scalar objective (to be minimized) and
///   the [`CompositionReport`] of derived arrays.
///
/// # Errors
/// - Parameter/shape disagreements surface as
///   [`CompositionError::InvalidParams`].
/// - [`CompositionError::InvalidSigma`] if `exp(ln_sigma)` is zero or
///   non-finite.
/// - [`CompositionError::NonFiniteObjective`] if any accumulated term is
///   NaN/±∞.
///
/// # Notes
/// - With `n_obs = 0` the objective is exactly 0 and the per-observation
///   report arrays are empty; `beta` and the loading matrix are still
///   reported.
pub fn evaluate_objective(
    params: &CompositionParams, data: &CompositionData,
) -> CompositionResult<Evaluation> {
    let shape = &data.shape;
    validate_param_block(params.coarse_effects.view(), shape.n_coarse - 1, "coarse_effects")?;
    validate_loadings(params.loadings.view(), shape)?;
    validate_param_block(params.intercepts.view(), shape.n_fine, "intercepts")?;
    validate_param_block(params.slopes.view(), shape.n_fine, "slopes")?;

    let sigma = params.sigma();
    if !sigma.is_finite() || sigma <= 0.0 {
        return Err(CompositionError::InvalidSigma { value: sigma });
    }

    let beta = reconstruct_beta(params.coarse_effects.view());
    let loadings_full = reconstruct_loadings(params.loadings.view());

    // Neither softmax has a covariate input: the coarse column comes straight
    // from beta and the fine column from the loadings and the coarse column,
    // so both (and the coarse column's elementwise log) are derived once and
    // reused for every observation. Only the response mean varies with i.
    let coarse_col = coarse_probabilities(beta.view());
    let ln_coarse_col = coarse_col.mapv(f64::ln);
    let fine_col = fine_probability_column(loadings_full.view(), coarse_col.view());

    let mut objective = 0.0;
    let mut coarse_predicted = Array2::<f64>::zeros((shape.n_coarse, shape.n_obs));
    let mut fine_predicted = Array2::<f64>::zeros((shape.n_fine, shape.n_obs));
    let mut carbon_predicted = Array1::<f64>::zeros(shape.n_obs);

    for i in 0..shape.n_obs {
        coarse_predicted.column_mut(i).assign(&coarse_col);
        objective -= data.coarse.column(i).dot(&ln_coarse_col);

        objective -= data
            .fine
            .column(i)
            .iter()
            .zip(fine_col.iter())
            .map(|(&observed, &predicted)| observed * predicted.ln())
            .sum::<f64>();

        let chat = params.intercepts.sum()
            + data.temperature[i] * params.slopes.dot(&fine_col);
        if !chat.is_finite() {
            return Err(CompositionError::NonFiniteObjective { value: chat });
        }
        objective -= Normal::new(chat, sigma)?.ln_pdf(data.carbon[i].ln());

        fine_predicted.column_mut(i).assign(&fine_col);
        carbon_predicted[i] = chat;
    }

    if !objective.is_finite() {
        return Err(CompositionError::NonFiniteObjective { value: objective });
    }

    Ok(Evaluation {
        objective,
        report: CompositionReport {
            beta,
            loadings: loadings_full,
            coarse_predicted,
            fine_predicted,
            carbon_predicted,
        },
    })
}
