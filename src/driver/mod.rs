//! driver — seam between the likelihood and an external argmin driver.
//!
//! Purpose
//! -------
//! The crate supplies an objective, not an optimizer: parameter estimation
//! is owned by an external gradient-based driver (an argmin executor, or
//! any caller that repeatedly evaluates the objective). This module is the
//! glue that lets such a driver consume a [`HierarchicalModel`] without
//! knowing anything about compositional likelihoods.
//!
//! Key behaviors
//! -------------
//! - [`adapter::ObjectiveAdapter`] implements argmin's `CostFunction` and
//!   `Gradient` for a `(model, data)` pair.
//! - The objective is already a negative log-likelihood, so the cost is
//!   passed through with no sign flip.
//! - Gradients are finite-difference approximations (central first, with a
//!   forward-difference retry); the crate deliberately ships no analytic
//!   gradient or AD engine.
//!
//! Conventions
//! -----------
//! - Parameters travel as the flat unconstrained vector [`Theta`]
//!   (`Array1<f64>`) with the layout documented on
//!   [`CompositionParams::from_theta`](crate::composition::core::params::CompositionParams::from_theta).
//! - Errors bubble up as `argmin::core::Error` wrapping the crate's
//!   structured error types; this module never panics.
//!
//! [`HierarchicalModel`]: crate::composition::models::hierarchical::HierarchicalModel

pub mod adapter;

use ndarray::Array1;

/// Flat unconstrained parameter vector consumed by external drivers.
pub type Theta = Array1<f64>;

/// Gradient of the objective with respect to [`Theta`].
pub type Grad = Array1<f64>;

/// Scalar objective value (negative log-likelihood).
pub type Cost = f64;

pub use self::adapter::ObjectiveAdapter;
