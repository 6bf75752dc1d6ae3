#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Compiled material identity.
//!
//! A [`CompiledMaterial`] is the persisted form of a compiler-produced
//! material instance: body, temporaries, default arguments, a content hash,
//! and one hash per canonical [`Slot`] for partial-result caching.

pub mod builder;
pub mod dag;
pub mod error;
pub mod instance;
mod invariants;
mod lookup;
pub mod material;
pub mod properties;
pub mod slot;

#[cfg(test)]
mod lookup_tests;
#[cfg(test)]
mod test_utils;

pub use builder::{CompiledInstance, InstanceBuilder};
pub use dag::DagNode;
pub use error::MaterialError;
pub use instance::MaterialInstance;
pub use material::{CompiledMaterial, UnitContext};
pub use properties::MaterialProperties;
pub use slot::Slot;
