//! rust_composition — hierarchical compositional likelihoods with Python bindings.
//!
//! Purpose
//! -------
//! Serve as the crate root for Rust callers and as the PyO3 bridge that exposes
//! the compositional likelihood evaluator to Python via the `_rust_composition`
//! extension module. When the `python-bindings` feature is enabled, this module
//! defines the Python-facing classes used by the `rust_composition` package.
//!
//! Key behaviors
//! -------------
//! - Re-export the core Rust modules (`composition` and `driver`) as the
//!   public crate surface.
//! - Define the `CompositionModel` `#[pyclass]` wrapper and the `#[pymodule]`
//!   initializer for the `_rust_composition` Python extension.
//!
//! Invariants & assumptions
//! ------------------------
//! - All heavy numerical work is implemented in the inner Rust modules; this
//!   file performs only FFI glue, input validation, and error mapping.
//! - When `python-bindings` is enabled, the Python-visible types mirror the
//!   invariants and signatures of their Rust counterparts
//!   (e.g. `HierarchicalModel`, `CompositionReport`).
//! - On successful conversion from Python objects to Rust types, the
//!   invariants documented in the core modules are assumed to hold.
//!
//! Conventions
//! -----------
//! - Matrices cross the boundary as 2-D float64 numpy arrays with rows =
//!   categories and columns = observations; vectors as 1-D float64 arrays.
//! - Errors from core Rust code are propagated as rich error types internally
//!   and converted to `PyErr` values at the PyO3 boundary.
//!
//! Downstream usage
//! ----------------
//! - Native Rust code should usually depend directly on the inner modules and
//!   can ignore the PyO3 items guarded by the `python-bindings` feature.
//! - The Python packaging layer imports the `_rust_composition` module defined
//!   here and wraps its classes in user-facing Python APIs; an external
//!   Python-side optimizer drives `evaluate` with candidate θ vectors.
//!
//! Testing notes
//! -------------
//! - Core numerical behavior is covered by unit tests in the inner modules and
//!   by the Rust integration test for the full pipeline.
//! - Smoke tests for the PyO3 bindings verify that the model can be
//!   constructed, evaluated, and its diagnostics read back from Python.

pub mod composition;
pub mod driver;
pub mod utils;

#[cfg(feature = "python-bindings")]
use pyo3::{exceptions::PyValueError, prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use crate::{
    composition::{
        core::{report::Evaluation, shape::CompositionShape},
        models::hierarchical::HierarchicalModel,
    },
    utils::{build_composition_data, extract_f64_vector},
};

/// CompositionModel — Python-facing wrapper for the hierarchical
/// compositional likelihood.
///
/// Purpose
/// -------
/// Expose the [`HierarchicalModel`] API to Python callers while preserving
/// the core Rust invariants and error handling.
///
/// Key behaviors
/// -------------
/// - Validate category-axis dimensions at construction.
/// - Provide an `evaluate` method that converts Python arrays into a
///   `CompositionData` bundle, evaluates the objective at a flat parameter
///   vector θ, and caches the diagnostic report for inspection.
/// - Expose the cached diagnostics (`beta`, `loadings`, `coarse_predicted`,
///   `fine_predicted`, `carbon_predicted`, `objective`) as properties.
///
/// Parameters
/// ----------
/// Constructed from Python via `CompositionModel(n_coarse, n_fine, n_obs)`:
/// - `n_coarse`: `usize`
///   Number of coarse categories; must be ≥ 1.
/// - `n_fine`: `usize`
///   Number of fine categories; must be ≥ 1.
/// - `n_obs`: `usize`
///   Number of observations; zero is allowed (empty sample).
///
/// Fields
/// ------
/// - `inner`: [`HierarchicalModel`]
///   Shape-configured model delegated to for every evaluation.
/// - `last_evaluation`: `Option<Evaluation>`
///   Objective and report from the most recent `evaluate` call.
///
/// Invariants
/// ----------
/// - `inner.shape` satisfies the invariants of `CompositionShape::new`.
/// - `last_evaluation` is `Some` exactly when at least one `evaluate` call
///   has succeeded.
///
/// Notes
/// -----
/// - This type is primarily intended to be used from Python; native Rust
///   code should prefer [`HierarchicalModel`] directly.
#[cfg(feature = "python-bindings")]
#[pyclass(module = "rust_composition")]
pub struct CompositionModel {
    /// Underlying Rust model.
    pub inner: HierarchicalModel,
    /// Objective and diagnostics from the most recent evaluation.
    last_evaluation: Option<Evaluation>,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl CompositionModel {
    #[new]
    #[pyo3(text_signature = "(n_coarse, n_fine, n_obs, /)")]
    pub fn new(n_coarse: usize, n_fine: usize, n_obs: usize) -> PyResult<Self> {
        let shape = CompositionShape::new(n_coarse, n_fine, n_obs)?;
        Ok(CompositionModel { inner: HierarchicalModel::new(shape), last_evaluation: None })
    }

    /// Evaluate the negative log-likelihood at a flat parameter vector.
    ///
    /// `coarse` and `fine` are (categories × observations) float64 matrices,
    /// `carbon` and `temperature` are length-`n_obs` float64 vectors, and
    /// `theta` is the flat parameter vector whose length must equal
    /// `theta_len`. On success the diagnostic report is cached and the
    /// objective value is returned.
    #[pyo3(text_signature = "(self, coarse, fine, carbon, temperature, theta, /)")]
    pub fn evaluate<'py>(
        &mut self, py: Python<'py>, coarse: &Bound<'py, PyAny>, fine: &Bound<'py, PyAny>,
        carbon: &Bound<'py, PyAny>, temperature: &Bound<'py, PyAny>, theta: &Bound<'py, PyAny>,
    ) -> PyResult<f64> {
        let data =
            build_composition_data(py, coarse, fine, carbon, temperature, self.inner.shape)?;
        let theta_vec = extract_f64_vector(py, theta, "theta")?;

        let evaluation = self.inner.evaluate_theta(theta_vec.view(), &data)?;
        let objective = evaluation.objective;
        self.last_evaluation = Some(evaluation);
        Ok(objective)
    }

    /// Length of the flat θ vector this model expects.
    #[getter]
    pub fn theta_len(&self) -> usize {
        self.inner.theta_len()
    }

    #[getter]
    pub fn objective(&self) -> PyResult<f64> {
        Ok(self.evaluation()?.objective)
    }

    /// Full coarse effect vector including the pinned reference zero.
    #[getter]
    pub fn beta(&self) -> PyResult<Vec<f64>> {
        Ok(self.evaluation()?.report.beta.to_vec())
    }

    /// Full loading matrix including the zero reference column (row-major).
    #[getter]
    pub fn loadings(&self) -> PyResult<Vec<Vec<f64>>> {
        Ok(rows_to_vecs(&self.evaluation()?.report.loadings))
    }

    /// Predicted coarse probabilities, (n_coarse × n_obs) row-major.
    #[getter]
    pub fn coarse_predicted(&self) -> PyResult<Vec<Vec<f64>>> {
        Ok(rows_to_vecs(&self.evaluation()?.report.coarse_predicted))
    }

    /// Predicted fine probabilities, (n_fine × n_obs) row-major.
    #[getter]
    pub fn fine_predicted(&self) -> PyResult<Vec<Vec<f64>>> {
        Ok(rows_to_vecs(&self.evaluation()?.report.fine_predicted))
    }

    /// Predicted log-scale response means, one per observation.
    #[getter]
    pub fn carbon_predicted(&self) -> PyResult<Vec<f64>> {
        Ok(self.evaluation()?.report.carbon_predicted.to_vec())
    }
}

#[cfg(feature = "python-bindings")]
impl CompositionModel {
    fn evaluation(&self) -> PyResult<&Evaluation> {
        self.last_evaluation
            .as_ref()
            .ok_or_else(|| PyValueError::new_err("model has not been evaluated yet"))
    }
}

/// Convert an `Array2<f64>` into a row-major `Vec<Vec<f64>>` for Python.
#[cfg(feature = "python-bindings")]
fn rows_to_vecs(matrix: &ndarray::Array2<f64>) -> Vec<Vec<f64>> {
    let (nrows, _ncols) = matrix.dim();
    let mut out = Vec::with_capacity(nrows);
    for i in 0..nrows {
        out.push(matrix.row(i).to_vec());
    }
    out
}

/// _rust_composition — PyO3 module initializer for the Python extension.
///
/// Registers the `CompositionModel` class on the `_rust_composition` module.
/// Invoked automatically by Python when importing the compiled extension; it
/// is not called directly by user code.
#[cfg(feature = "python-bindings")]
#[pymodule]
fn _rust_composition<'py>(_py: Python<'py>, m: &Bound<'py, PyModule>) -> PyResult<()> {
    m.add_class::<CompositionModel>()?;
    Ok(())
}
