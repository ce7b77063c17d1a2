//! Diagnostic report produced alongside the objective.
//!
//! The external driver minimizes the scalar objective; everything else the
//! evaluator derives on the way — the reconstructed log-odds, the full
//! loading matrix, and the predicted distributions and response means — is
//! collected here for post-fit diagnostics and plotting. Nothing in this
//! bundle feeds back into control flow.
use ndarray::{Array1, Array2};

/// Derived arrays reported by one likelihood evaluation.
///
/// Fields
/// ------
/// - `beta`: full coarse log-odds vector (length n_coarse, `beta[0] = 0`).
/// - `loadings`: full loading matrix (n_coarse × n_fine, column 0 zero).
/// - `coarse_predicted`: predicted coarse probabilities (n_coarse × n_obs);
///   every column is identical since the coarse softmax carries no
///   observation dependence.
/// - `fine_predicted`: predicted fine probabilities (n_fine × n_obs).
/// - `carbon_predicted`: predicted response means on the log scale
///   (length n_obs).
///
/// Invariants
/// ----------
/// - Columns of `coarse_predicted` and `fine_predicted` each sum to 1
///   (within floating tolerance) and are strictly positive.
/// - With `n_obs = 0` the per-observation arrays are empty but `beta` and
///   `loadings` are still populated (they depend only on the parameters).
#[derive(Debug, Clone, PartialEq)]
pub struct CompositionReport {
    /// Full coarse log-odds, reference entry fixed at zero.
    pub beta: Array1<f64>,
    /// Full loading matrix, reference column fixed at zero.
    pub loadings: Array2<f64>,
    /// Predicted coarse-category probabilities per observation.
    pub coarse_predicted: Array2<f64>,
    /// Predicted fine-category probabilities per observation.
    pub fine_predicted: Array2<f64>,
    /// Predicted log-scale response mean per observation.
    pub carbon_predicted: Array1<f64>,
}

/// Result of one evaluation: the scalar objective (negative log-likelihood,
/// to be minimized by the external driver) plus the diagnostic report.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    /// Total negative log-likelihood.
    pub objective: f64,
    /// Derived diagnostic arrays.
    pub report: CompositionReport,
}
