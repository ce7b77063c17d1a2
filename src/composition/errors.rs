//! Errors for hierarchical compositional likelihoods (data validation,
//! shape checks, parameter checks, and evaluation failures).
//!
//! This module defines a model error type, [`CompositionError`], and a
//! parameter error type, [`ParamError`], used across the Python-facing API
//! and the internal Rust core. Both implement `Display`/`Error` and, when the
//! `python-bindings` feature is enabled, convert to `PyErr` for PyO3.
//!
//! ## Conventions
//! - **Indices are 0-based** (match Rust/NumPy).
//! - Observed proportions must be **finite and non-negative**; column sums
//!   are *not* checked (the evaluator treats them as weights).
//! - The continuous response must be **strictly positive and finite** since
//!   its logarithm enters the likelihood directly.
//! - `statrs` distribution errors are normalized to
//!   [`CompositionError::InvalidSigma`].
#[cfg(feature = "python-bindings")]
use pyo3::exceptions::PyValueError;
#[cfg(feature = "python-bindings")]
use pyo3::prelude::*;
use statrs::StatsError;

/// Crate-wide result alias for evaluation paths that may produce
/// [`CompositionError`].
pub type CompositionResult<T> = Result<T, CompositionError>;

/// Result alias for parameter-construction/validation paths that may produce
/// [`ParamError`].
pub type ParamResult<T> = Result<T, ParamError>;

/// Unified error type for the compositional likelihood stack.
///
/// Covers observation/data validation, category-axis checks, and evaluation
/// failures. Implements `Display`/`Error` and converts to a Python
/// `ValueError` at PyO3 boundaries.
#[derive(Debug, Clone, PartialEq)]
pub enum CompositionError {
    // ---- Shape / configuration ----
    /// A category axis has zero levels; softmax normalizers would be empty.
    EmptyCategoryAxis { axis: &'static str },

    /// Coarse proportion matrix does not match (n_coarse, n_obs).
    CoarseShapeMismatch { expected: (usize, usize), actual: (usize, usize) },

    /// Fine proportion matrix does not match (n_fine, n_obs).
    FineShapeMismatch { expected: (usize, usize), actual: (usize, usize) },

    /// Continuous response length does not match n_obs.
    ResponseLengthMismatch { expected: usize, actual: usize },

    /// Covariate length does not match n_obs.
    CovariateLengthMismatch { expected: usize, actual: usize },

    // ---- Input/data validation ----
    /// An observed proportion is NaN/±inf.
    NonFiniteProportion { axis: &'static str, row: usize, col: usize, value: f64 },

    /// An observed proportion is negative.
    NegativeProportion { axis: &'static str, row: usize, col: usize, value: f64 },

    /// A continuous response value is NaN/±inf.
    NonFiniteResponse { index: usize, value: f64 },

    /// A continuous response value is ≤ 0 (its log enters the likelihood).
    NonPositiveResponse { index: usize, value: f64 },

    /// A covariate value is NaN/±inf.
    NonFiniteCovariate { index: usize, value: f64 },

    // ---- Evaluation ----
    /// The accumulated objective is NaN/±inf.
    NonFiniteObjective { value: f64 },

    /// Residual standard deviation exp(ln_sigma) was rejected by the
    /// normal-density constructor.
    InvalidSigma { value: f64 },

    /// Parameter validation failed before evaluation could start.
    InvalidParams { message: String },

    /// Data was built for a different model shape (n_coarse, n_fine, n_obs).
    ModelShapeMismatch { expected: (usize, usize, usize), actual: (usize, usize, usize) },
}

impl std::error::Error for CompositionError {}

impl std::fmt::Display for CompositionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Shape / configuration ----
            CompositionError::EmptyCategoryAxis { axis } => {
                write!(f, "Category axis '{axis}' must have at least one level.")
            }
            CompositionError::CoarseShapeMismatch { expected, actual } => {
                write!(
                    f,
                    "Coarse proportion matrix shape mismatch: expected {expected:?}, got {actual:?}"
                )
            }
            CompositionError::FineShapeMismatch { expected, actual } => {
                write!(
                    f,
                    "Fine proportion matrix shape mismatch: expected {expected:?}, got {actual:?}"
                )
            }
            CompositionError::ResponseLengthMismatch { expected, actual } => {
                write!(f, "Response length mismatch: expected {expected}, got {actual}")
            }
            CompositionError::CovariateLengthMismatch { expected, actual } => {
                write!(f, "Covariate length mismatch: expected {expected}, got {actual}")
            }
            // ---- Input/data validation ----
            CompositionError::NonFiniteProportion { axis, row, col, value } => {
                write!(
                    f,
                    "Observed {axis} proportion at ({row}, {col}) is non-finite: {value}"
                )
            }
            CompositionError::NegativeProportion { axis, row, col, value } => {
                write!(f, "Observed {axis} proportion at ({row}, {col}) is negative: {value}")
            }
            CompositionError::NonFiniteResponse { index, value } => {
                write!(f, "Response value at index {index} is non-finite: {value}")
            }
            CompositionError::NonPositiveResponse { index, value } => {
                write!(
                    f,
                    "Response value at index {index} must be strictly positive (its log is taken); got {value}"
                )
            }
            CompositionError::NonFiniteCovariate { index, value } => {
                write!(f, "Covariate value at index {index} is non-finite: {value}")
            }
            // ---- Evaluation ----
            CompositionError::NonFiniteObjective { value } => {
                write!(f, "Accumulated objective is non-finite: {value}")
            }
            CompositionError::InvalidSigma { value } => {
                write!(f, "Residual standard deviation must be finite and > 0; got {value}")
            }
            CompositionError::InvalidParams { message } => {
                write!(f, "Invalid parameters: {message}")
            }
            CompositionError::ModelShapeMismatch { expected, actual } => {
                write!(
                    f,
                    "Data shape mismatch: model expects (n_coarse, n_fine, n_obs) = {expected:?}, got {actual:?}"
                )
            }
        }
    }
}

/// Convert a [`CompositionError`] into a Python `ValueError` with the error
/// message.
///
/// This is used at the Rust↔Python boundary to surface domain errors cleanly.
#[cfg(feature = "python-bindings")]
impl std::convert::From<CompositionError> for PyErr {
    fn from(err: CompositionError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}

impl From<StatsError> for CompositionError {
    fn from(_: StatsError) -> CompositionError {
        CompositionError::InvalidSigma { value: f64::NAN }
    }
}

/// Errors specific to parameter construction and validation.
///
/// Typical causes include length mismatches between the parameter blocks and
/// the category axes, and non-finite coordinates in either model space or
/// the flat optimizer vector θ.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamError {
    /// Theta length mismatch for the flat optimizer vector.
    ThetaLengthMismatch { expected: usize, actual: usize },

    /// Theta coordinates must be finite.
    NonFiniteTheta { index: usize, value: f64 },

    /// Coarse-effects length mismatch (expected n_coarse − 1).
    CoarseEffectsLengthMismatch { expected: usize, actual: usize },

    /// Loading matrix shape mismatch (expected (n_coarse, n_fine − 1)).
    LoadingsShapeMismatch { expected: (usize, usize), actual: (usize, usize) },

    /// Intercepts length mismatch (expected n_fine).
    InterceptsLengthMismatch { expected: usize, actual: usize },

    /// Slopes length mismatch (expected n_fine).
    SlopesLengthMismatch { expected: usize, actual: usize },

    /// A model-space parameter coordinate is NaN/±inf.
    NonFiniteParam { block: &'static str, index: usize, value: f64 },

    /// ln_sigma must be finite.
    NonFiniteLnSigma { value: f64 },
}

impl std::error::Error for ParamError {}

impl std::fmt::Display for ParamError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParamError::ThetaLengthMismatch { expected, actual } => {
                write!(f, "Theta length mismatch: expected {expected}, got {actual}")
            }
            ParamError::NonFiniteTheta { index, value } => {
                write!(f, "Theta input at index {index} must be finite, got {value}")
            }
            ParamError::CoarseEffectsLengthMismatch { expected, actual } => {
                write!(f, "Coarse-effects length mismatch: expected {expected}, got {actual}")
            }
            ParamError::LoadingsShapeMismatch { expected, actual } => {
                write!(
                    f,
                    "Loading matrix shape mismatch: expected {expected:?}, got {actual:?}"
                )
            }
            ParamError::InterceptsLengthMismatch { expected, actual } => {
                write!(f, "Intercepts length mismatch: expected {expected}, got {actual}")
            }
            ParamError::SlopesLengthMismatch { expected, actual } => {
                write!(f, "Slopes length mismatch: expected {expected}, got {actual}")
            }
            ParamError::NonFiniteParam { block, index, value } => {
                write!(
                    f,
                    "Parameter block '{block}' has non-finite coordinate at index {index}: {value}"
                )
            }
            ParamError::NonFiniteLnSigma { value } => {
                write!(f, "ln_sigma must be finite, got {value}")
            }
        }
    }
}

/// Convert a [`ParamError`] into a Python `ValueError` with the error message.
#[cfg(feature = "python-bindings")]
impl std::convert::From<ParamError> for PyErr {
    fn from(err: ParamError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}

impl From<ParamError> for CompositionError {
    fn from(err: ParamError) -> CompositionError {
        match err {
            ParamError::NonFiniteLnSigma { value } => CompositionError::InvalidSigma { value },
            other => CompositionError::InvalidParams { message: other.to_string() },
        }
    }
}
