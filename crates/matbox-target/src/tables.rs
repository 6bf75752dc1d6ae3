//! Dense resource and string tables.
//!
//! Index 0 of every table means "no resource" / "unknown string". Entries are
//! placed at indices chosen by the code generator and never renumbered.

use matbox_core::TextureShape;

/// Something stored in a table and looked up by name.
pub trait TableEntry: Clone + Default {
    fn name(&self) -> &str;
}

impl TableEntry for String {
    fn name(&self) -> &str {
        self
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TextureEntry {
    pub name: String,
    pub shape: TextureShape,
}

impl TextureEntry {
    pub fn new(name: impl Into<String>, shape: TextureShape) -> Self {
        Self {
            name: name.into(),
            shape,
        }
    }
}

impl TableEntry for TextureEntry {
    fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResourceTable<E> {
    entries: Vec<E>,
}

impl<E> Default for ResourceTable<E> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<E: TableEntry> ResourceTable<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place `entry` at `index`, padding any gap with empty entries.
    pub fn register(&mut self, index: usize, entry: E) {
        if index >= self.entries.len() {
            self.entries.resize(index + 1, E::default());
        }
        self.entries[index] = entry;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&E> {
        self.entries.get(index)
    }

    pub fn name(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(|e| e.name())
    }

    /// First index >= 1 registered under `name`, or 0.
    ///
    /// Empty names never match, so gap placeholders stay unreachable.
    pub fn index_of(&self, name: &str) -> u32 {
        if name.is_empty() {
            return 0;
        }
        self.entries
            .iter()
            .enumerate()
            .skip(1)
            .find(|(_, e)| e.name() == name)
            .map_or(0, |(i, _)| i as u32)
    }

    pub fn iter(&self) -> impl Iterator<Item = &E> {
        self.entries.iter()
    }
}
