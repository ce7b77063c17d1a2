//! models — concrete model definitions built on the shared core.
//!
//! Purpose
//! -------
//! Host the model types users instantiate directly. Each model wires the
//! validated containers and the likelihood driver from [`crate::composition::core`]
//! into a small evaluation surface external drivers can hold on to.
//!
//! Key behaviors
//! -------------
//! - [`hierarchical::HierarchicalModel`] exposes evaluation at model-space
//!   parameters ([`HierarchicalModel::evaluate`]) and at flat optimizer
//!   vectors ([`HierarchicalModel::evaluate_theta`]).
//! - Models are stateless: evaluation is a pure function of
//!   `(params, data)`; nothing is cached across calls.
//!
//! Conventions
//! -----------
//! - Models carry only their [`CompositionShape`](crate::composition::core::shape::CompositionShape);
//!   observation bundles and parameters are supplied per call and checked
//!   against that shape.
//!
//! [`HierarchicalModel::evaluate`]: self::hierarchical::HierarchicalModel::evaluate
//! [`HierarchicalModel::evaluate_theta`]: self::hierarchical::HierarchicalModel::evaluate_theta

pub mod hierarchical;

pub use self::hierarchical::HierarchicalModel;
