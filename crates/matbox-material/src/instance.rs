//! Compiler-side view of a compiled material instance.

use matbox_core::Value;

use crate::dag::DagNode;
use crate::slot::Slot;

/// What the compiler hands over after compiling a material.
///
/// Hashes are 16-byte digests exactly as the compiler computed them.
pub trait MaterialInstance {
    /// Root call constructing the `material` struct.
    fn constructor(&self) -> Option<&DagNode>;

    fn temporary_count(&self) -> usize;
    fn temporary(&self, index: usize) -> Option<&DagNode>;

    fn parameter_count(&self) -> usize;
    fn parameter_name(&self, index: usize) -> Option<&str>;
    fn parameter_default(&self, index: usize) -> Option<&Value>;

    fn hash(&self) -> [u8; 16];
    fn slot_hash(&self, slot: Slot) -> [u8; 16];

    /// Raw property bits, see [`MaterialProperties`](crate::MaterialProperties).
    fn properties(&self) -> u32;
}
