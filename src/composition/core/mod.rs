//! core — shared containers, transforms, and the likelihood driver.
//!
//! Purpose
//! -------
//! Collect the building blocks of the hierarchical compositional model:
//! validated observation containers, category-axis shapes, model-space
//! parameters with their flat optimizer-vector mapping, reference-category
//! softmax transforms, and the single evaluation driver that produces the
//! negative log-likelihood and its diagnostic report.
//!
//! Key behaviors
//! -------------
//! - Define shape and observation types ([`CompositionShape`],
//!   [`CompositionData`]) plus owned parameter containers
//!   ([`CompositionParams`]) and the diagnostics bundle
//!   ([`CompositionReport`], [`Evaluation`]).
//! - Implement the reference-pinned softmax reconstruction helpers in
//!   [`transforms`] and the joint likelihood pass in [`likelihood`].
//! - Centralize boundary validation in [`validation`] so constructors fail
//!   fast with structured errors and the numeric core assumes clean inputs.
//!
//! Invariants & assumptions
//! ------------------------
//! - Observations stored in [`CompositionData`] are dimension-consistent,
//!   finite, with non-negative proportions and a strictly positive
//!   response; both category axes have at least one level.
//! - Index 0 of the coarse axis and column 0 of the loading matrix are
//!   structural zeros (reference categories), reconstructed by
//!   [`transforms`], never stored as free parameters.
//! - Softmax denominators always contain the reference term exp(0) = 1 and
//!   are therefore strictly positive.
//!
//! Conventions
//! -----------
//! - Indexing is 0-based throughout. Matrices are laid out rows =
//!   categories, columns = observations.
//! - The flat optimizer vector θ has length
//!   `(n_coarse − 1) + n_coarse·(n_fine − 1) + 2·n_fine + 1` with the block
//!   order documented on [`CompositionParams::from_theta`].
//! - This module performs no I/O and no logging; error conditions are
//!   surfaced as `CompositionResult` / `ParamResult`.
//!
//! Testing notes
//! -------------
//! - Unit tests in submodules cover container validation, the θ round-trip,
//!   simplex/reference properties of the transforms, and the closed-form
//!   and structural properties of the evaluator. Integration tests at the
//!   model layer exercise the full pipeline.

pub mod data;
pub mod likelihood;
pub mod params;
pub mod report;
pub mod shape;
pub mod transforms;
pub mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::data::CompositionData;
pub use self::likelihood::evaluate_objective;
pub use self::params::CompositionParams;
pub use self::report::{CompositionReport, Evaluation};
pub use self::shape::CompositionShape;
pub use self::transforms::{
    coarse_probabilities, fine_probability_column, reconstruct_beta, reconstruct_loadings,
};
pub use self::validation::{
    validate_covariate, validate_loadings, validate_param_block, validate_proportions,
    validate_response, validate_theta,
};
