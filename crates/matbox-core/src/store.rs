//! Scene store handles and name resolution.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque handle of a scene store element.
///
/// `Tag::NONE` (zero) never names an element.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Tag(pub u32);

impl Tag {
    pub const NONE: Self = Self(0);

    #[inline]
    pub fn is_valid(self) -> bool {
        self.0 != 0
    }

    #[inline]
    pub fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tag:{}", self.0)
    }
}

/// Read access to the scene store, as far as this crate family needs it.
pub trait Transaction {
    /// Stable name of the element behind `tag`, if it exists.
    fn tag_to_name(&self, tag: Tag) -> Option<&str>;
}

impl<T: Transaction + ?Sized> Transaction for &T {
    fn tag_to_name(&self, tag: Tag) -> Option<&str> {
        (*self).tag_to_name(tag)
    }
}

/// Map-backed store used by tooling and tests.
#[derive(Clone, Debug, Default)]
pub struct MemoryTransaction {
    names: HashMap<Tag, String>,
    next: u32,
}

impl MemoryTransaction {
    pub fn new() -> Self {
        Self {
            names: HashMap::new(),
            next: 1,
        }
    }

    /// Store a new element under `name` and return its tag.
    pub fn store(&mut self, name: impl Into<String>) -> Tag {
        let tag = Tag(self.next.max(1));
        self.next = tag.0 + 1;
        self.names.insert(tag, name.into());
        tag
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl Transaction for MemoryTransaction {
    fn tag_to_name(&self, tag: Tag) -> Option<&str> {
        self.names.get(&tag).map(String::as_str)
    }
}
