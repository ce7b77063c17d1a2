//! Reference-category softmax reconstruction helpers.
//!
//! The model keeps its softmax parameterizations identifiable by pinning one
//! category per axis: index 0 of the coarse log-odds vector and column 0 of
//! the loading matrix are **structural zeros**, not free parameters. The
//! helpers here rebuild the full-sized arrays from the free blocks and map
//! them to probability vectors.
//!
//! # Provided items
//! - [`reconstruct_beta`]: free coarse effects → full log-odds vector with
//!   `beta[0] = 0`.
//! - [`reconstruct_loadings`]: free loading columns → full matrix with
//!   column 0 zero.
//! - [`coarse_probabilities`]: softmax of the full log-odds vector. The
//!   denominator always contains the reference term exp(0) = 1, so it is
//!   strictly positive and the output entries are strictly positive.
//! - [`fine_probability_column`]: fine-category softmax for one observation,
//!   with per-category weights `w[b] = exp(Σ_c A[c,b]·p_c[c])`.
use ndarray::{s, Array1, Array2, ArrayView1, ArrayView2};

/// Rebuild the full coarse log-odds vector from the free effects.
///
/// `beta[0] = 0` (reference category) and `beta[k] = coarse_effects[k − 1]`
/// for `k ≥ 1`. Returns a vector of length `coarse_effects.len() + 1`.
pub fn reconstruct_beta(coarse_effects: ArrayView1<f64>) -> Array1<f64> {
    let n_coarse = coarse_effects.len() + 1;
    let mut beta = Array1::<f64>::zeros(n_coarse);
    beta.slice_mut(s![1..]).assign(&coarse_effects);
    beta
}

/// Rebuild the full loading matrix from the free columns.
///
/// Column 0 (reference fine category) is all zeros; column `b ≥ 1` is the
/// free column `b − 1`. Returns an `(n_coarse, n_fine)` matrix where
/// `n_fine = loadings.ncols() + 1`.
pub fn reconstruct_loadings(loadings: ArrayView2<f64>) -> Array2<f64> {
    let (n_coarse, free_cols) = loadings.dim();
    let mut full = Array2::<f64>::zeros((n_coarse, free_cols + 1));
    full.slice_mut(s![.., 1..]).assign(&loadings);
    full
}

/// Softmax of the full coarse log-odds vector.
///
/// `p[c] = exp(beta[c]) / Σ_k exp(beta[k])`. Because `beta[0] = 0`, the
/// denominator is at least 1 and the result is a strictly positive
/// probability vector. This distribution carries no observation dependence;
/// callers reuse the same column for every observation.
pub fn coarse_probabilities(beta: ArrayView1<f64>) -> Array1<f64> {
    let exp_beta = beta.mapv(f64::exp);
    let denom = exp_beta.sum();
    exp_beta / denom
}

/// Fine-category probabilities for a single observation.
///
/// Given the full loading matrix `A` (`n_coarse × n_fine`) and the coarse
/// probability column `p_c` for this observation, computes the unnormalized
/// weights `w[b] = exp(Σ_c A[c,b]·p_c[c])` and normalizes them. Column 0 of
/// `A` is zero, so `w[0] = 1` and the normalizer is strictly positive.
pub fn fine_probability_column(
    loadings_full: ArrayView2<f64>, coarse_probs: ArrayView1<f64>,
) -> Array1<f64> {
    let weights = coarse_probs.dot(&loadings_full).mapv(f64::exp);
    let denom = weights.sum();
    weights / denom
}
