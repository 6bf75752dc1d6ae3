#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core data model for matbox.
//!
//! - **Types and values**: what the shading-language compiler hands over
//! - **Expressions**: direct calls, parameter and temporary references
//! - **Store access**: resource tags and their name resolution
//! - **Dumps**: text rendering used by higher-level crates and the CLI

pub mod colors;
pub mod dump;
pub mod expr;
pub mod hash;
pub mod store;
pub mod types;
pub mod value;

#[cfg(test)]
mod dump_tests;

pub use colors::Colors;
pub use dump::Dumper;
pub use expr::{DirectCall, Expression, ExpressionList};
pub use hash::Hash128;
pub use store::{MemoryTransaction, Tag, Transaction};
pub use types::{PredefinedStruct, Scalar, StructType, TextureShape, Type, TypeFactory};
pub use value::{ResourceKind, ResourceRef, Value, ValueList};
