//! Mapping resource and string values to runtime table indices.

use matbox_core::{Transaction, Value};

use crate::target_code::TargetCode;

/// Supplies table indices while packing argument blocks.
///
/// Both methods return 0 for anything they cannot resolve.
pub trait ResourceResolver {
    fn resource_index(&self, resource: &Value) -> u32;
    fn string_index(&self, s: &str) -> u32;
}

/// Resolves against the tables of one target code artifact, naming
/// resources through a store transaction.
pub struct TransactionResolver<'a> {
    code: &'a TargetCode,
    transaction: Option<&'a dyn Transaction>,
}

impl<'a> TransactionResolver<'a> {
    pub fn new(code: &'a TargetCode, transaction: Option<&'a dyn Transaction>) -> Self {
        Self { code, transaction }
    }
}

impl ResourceResolver for TransactionResolver<'_> {
    fn resource_index(&self, resource: &Value) -> u32 {
        self.code.known_resource_index(self.transaction, resource)
    }

    fn string_index(&self, s: &str) -> u32 {
        self.code.string_index(s)
    }
}
