#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Target code artifacts.
//!
//! A [`TargetCode`] bundles what a backend produced for one or more
//! materials: code, a catalog of callable functions, resource and string
//! tables, read-only data, and one argument block slot per class-compiled
//! material. Argument blocks are packed from value lists according to a
//! [`ValueLayout`]; resource values become indices into the tables.

pub mod block;
pub mod dispatch;
mod dump;
pub mod error;
pub mod function;
pub mod generated;
pub mod layout;
pub mod native;
pub mod options;
pub mod pack;
pub mod resolver;
pub mod state;
pub mod tables;
pub mod target_code;

#[cfg(test)]
mod dump_tests;
#[cfg(test)]
mod pack_tests;
#[cfg(test)]
mod test_utils;

pub use block::ArgumentBlock;
pub use dispatch::ExecStatus;
pub use error::{PackError, TargetCodeError};
pub use function::{CallableFunction, FunctionKind, PrototypeLanguage};
pub use generated::GeneratedCode;
pub use layout::{LayoutBuilder, LayoutEntry, LayoutKind, LayoutState, StringMode, ValueLayout};
pub use native::{DfData, NativeCode, NullResourceHandler, ResourceHandler};
pub use options::TargetCodeOptions;
pub use pack::{pack, write_value};
pub use resolver::{ResourceResolver, TransactionResolver};
pub use state::{
    BsdfEvaluateData, BsdfPdfData, BsdfSampleData, ShadingStateEnvironment, ShadingStateMaterial,
    StateField, StateUsage,
};
pub use tables::{ResourceTable, TableEntry, TextureEntry};
pub use target_code::{CodeSegment, DataSegment, TargetCode};
