//! composition — hierarchical compositional likelihood stack.
//!
//! Purpose
//! -------
//! Everything needed to evaluate the negative log-likelihood of a
//! hierarchical compositional model: a coarse category layer fit by a
//! reference-pinned softmax, a fine category layer whose probabilities are
//! modulated by the coarse layer through a loading matrix, and a log-normal
//! regression of a continuous response on a covariate through the fine
//! probabilities.
//!
//! Layout
//! ------
//! - [`errors`]: structured error taxonomy ([`CompositionError`],
//!   [`ParamError`]) with optional PyO3 conversions.
//! - [`core`]: validated containers, softmax transforms, and the likelihood
//!   driver.
//! - [`models`]: the user-facing [`HierarchicalModel`].
//!
//! Downstream usage
//! ----------------
//! Construct a [`CompositionShape`], bundle observations into
//! [`CompositionData`], build a [`HierarchicalModel`], and evaluate at
//! either model-space [`CompositionParams`] or a flat optimizer vector θ.
//! External optimizers attach through
//! [`crate::driver::ObjectiveAdapter`].
//!
//! [`CompositionError`]: self::errors::CompositionError
//! [`ParamError`]: self::errors::ParamError
//! [`HierarchicalModel`]: self::models::hierarchical::HierarchicalModel
//! [`CompositionShape`]: self::core::shape::CompositionShape
//! [`CompositionData`]: self::core::data::CompositionData
//! [`CompositionParams`]: self::core::params::CompositionParams

pub mod core;
pub mod errors;
pub mod models;

pub use self::core::{
    CompositionData, CompositionParams, CompositionReport, CompositionShape, Evaluation,
};
pub use self::errors::{CompositionError, CompositionResult, ParamError, ParamResult};
pub use self::models::HierarchicalModel;
