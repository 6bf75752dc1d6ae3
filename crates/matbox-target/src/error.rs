use matbox_core::Type;

use crate::layout::{LayoutKind, StringMode};

/// Failure to write a value into an argument block.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PackError {
    #[error("argument count mismatch: layout has {expected} elements, got {actual} values")]
    ArgumentCountMismatch { expected: usize, actual: usize },
    #[error("cannot write a {found} value into a {expected} slot")]
    KindMismatch { expected: LayoutKind, found: Type },
    #[error("{kind} slot has {expected} elements, value has {actual}")]
    ElementCountMismatch {
        kind: LayoutKind,
        expected: usize,
        actual: usize,
    },
    #[error("write of {size} bytes at offset {offset} exceeds block of {len} bytes")]
    OutOfBounds {
        offset: usize,
        size: usize,
        len: usize,
    },
}

/// Bookkeeping errors while assembling a target code artifact.
#[derive(Debug, thiserror::Error)]
pub enum TargetCodeError {
    #[error("type {0} cannot be stored in an argument block")]
    UnsupportedLayoutType(Type),
    #[error("malformed layout at entry {entry}: {reason}")]
    MalformedLayout { entry: u32, reason: &'static str },
    #[error("layout uses {layout:?} strings, target code uses {code:?}")]
    StringModeMismatch { code: StringMode, layout: StringMode },
    #[error("argument block slot {index} does not exist ({count} slots)")]
    NoSuchSlot { index: usize, count: usize },
    #[error("callable function {index} does not exist ({count} functions)")]
    NoSuchFunction { index: usize, count: usize },
    #[error(transparent)]
    Pack(#[from] PackError),
}
