//! Binary shape of argument blocks.
//!
//! A layout is a flat arena of entries. Entry 0 is the root struct whose
//! children are the arguments; every other entry is a child of exactly one
//! earlier entry. Offsets are relative to the parent entry.

use std::fmt;
use std::iter;

use matbox_core::{Scalar, Type};

use crate::error::TargetCodeError;

/// How string values are represented inside argument blocks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StringMode {
    /// Pointer-sized placeholder, left zeroed; generated code resolves strings itself.
    #[default]
    Unmapped,
    /// 32-bit index into the artifact's string constant table.
    Mapped,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayoutKind {
    Bool,
    Int,
    Enum,
    Float,
    Double,
    String,
    Texture,
    LightProfile,
    BsdfMeasurement,
    Vector,
    Matrix,
    Color,
    Array,
    Struct,
}

impl LayoutKind {
    /// Byte size and alignment of a leaf, `None` for compounds.
    pub fn leaf_size(self, strings: StringMode) -> Option<(u32, u32)> {
        match self {
            LayoutKind::Bool => Some((1, 1)),
            LayoutKind::Int
            | LayoutKind::Enum
            | LayoutKind::Float
            | LayoutKind::Texture
            | LayoutKind::LightProfile
            | LayoutKind::BsdfMeasurement => Some((4, 4)),
            LayoutKind::Double => Some((8, 8)),
            LayoutKind::String => match strings {
                StringMode::Mapped => Some((4, 4)),
                StringMode::Unmapped => Some((8, 8)),
            },
            LayoutKind::Vector
            | LayoutKind::Matrix
            | LayoutKind::Color
            | LayoutKind::Array
            | LayoutKind::Struct => None,
        }
    }

    pub fn is_leaf(self) -> bool {
        self.leaf_size(StringMode::Mapped).is_some()
    }
}

impl fmt::Display for LayoutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LayoutKind::Bool => "bool",
            LayoutKind::Int => "int",
            LayoutKind::Enum => "enum",
            LayoutKind::Float => "float",
            LayoutKind::Double => "double",
            LayoutKind::String => "string",
            LayoutKind::Texture => "texture",
            LayoutKind::LightProfile => "light_profile",
            LayoutKind::BsdfMeasurement => "bsdf_measurement",
            LayoutKind::Vector => "vector",
            LayoutKind::Matrix => "matrix",
            LayoutKind::Color => "color",
            LayoutKind::Array => "array",
            LayoutKind::Struct => "struct",
        };
        f.write_str(s)
    }
}

/// One node of a layout as described by the code generator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LayoutEntry {
    pub kind: LayoutKind,
    /// Offset relative to the parent entry.
    pub offset: u32,
    pub size: u32,
    pub children: Vec<u32>,
}

impl LayoutEntry {
    pub fn leaf(kind: LayoutKind, offset: u32, size: u32) -> Self {
        Self {
            kind,
            offset,
            size,
            children: Vec::new(),
        }
    }

    pub fn compound(kind: LayoutKind, offset: u32, size: u32, children: Vec<u32>) -> Self {
        Self {
            kind,
            offset,
            size,
            children,
        }
    }
}

/// Cursor into a layout: current entry plus accumulated byte offset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LayoutState {
    entry: u32,
    data_offset: u32,
}

impl LayoutState {
    pub fn data_offset(self) -> u32 {
        self.data_offset
    }
}

/// Immutable layout of one argument block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValueLayout {
    entries: Vec<LayoutEntry>,
    strings: StringMode,
}

impl ValueLayout {
    /// Accept an explicit description from a code generator.
    pub fn from_entries(
        entries: Vec<LayoutEntry>,
        strings: StringMode,
    ) -> Result<Self, TargetCodeError> {
        let malformed = |entry: usize, reason: &'static str| TargetCodeError::MalformedLayout {
            entry: entry as u32,
            reason,
        };

        let Some(root) = entries.first() else {
            return Err(malformed(0, "layout has no root entry"));
        };
        if root.kind != LayoutKind::Struct || root.offset != 0 {
            return Err(malformed(0, "root must be a struct at offset 0"));
        }

        let mut has_parent = vec![false; entries.len()];
        for (i, e) in entries.iter().enumerate() {
            match e.kind.leaf_size(strings) {
                Some((size, _)) => {
                    if !e.children.is_empty() {
                        return Err(malformed(i, "leaf entry has children"));
                    }
                    if e.size != size {
                        return Err(malformed(i, "leaf size does not match its kind"));
                    }
                }
                None => {
                    if e.kind == LayoutKind::Color && e.children.len() != 3 {
                        return Err(malformed(i, "color needs three components"));
                    }
                }
            }
            let mut ranges = Vec::with_capacity(e.children.len());
            for &c in &e.children {
                let c = c as usize;
                if c <= i || c >= entries.len() {
                    return Err(malformed(i, "child index must follow its parent"));
                }
                if std::mem::replace(&mut has_parent[c], true) {
                    return Err(malformed(c, "entry has more than one parent"));
                }
                let child = &entries[c];
                let end = child.offset.checked_add(child.size);
                match end {
                    Some(end) if end <= e.size => ranges.push((child.offset, end, c)),
                    _ => return Err(malformed(c, "child extends past its parent")),
                }
            }
            ranges.sort_unstable();
            for pair in ranges.windows(2) {
                let ((_, prev_end, _), (offset, _, c)) = (pair[0], pair[1]);
                if prev_end > offset {
                    return Err(malformed(c, "child overlaps a sibling"));
                }
            }
        }
        if let Some(orphan) = has_parent.iter().skip(1).position(|&p| !p) {
            return Err(malformed(orphan + 1, "entry has no parent"));
        }

        Ok(Self { entries, strings })
    }

    pub fn string_mode(&self) -> StringMode {
        self.strings
    }

    pub fn entries(&self) -> &[LayoutEntry] {
        &self.entries
    }

    /// Number of top-level arguments.
    pub fn num_elements(&self) -> usize {
        self.entries[0].children.len()
    }

    /// Size of a complete argument block in bytes.
    pub fn size(&self) -> usize {
        self.entries[0].size as usize
    }

    pub fn root(&self) -> LayoutState {
        LayoutState::default()
    }

    /// State of the `index`-th child of `parent`.
    pub fn nested_state(&self, index: usize, parent: LayoutState) -> Option<LayoutState> {
        let child = *self.entry(parent).children.get(index)?;
        Some(LayoutState {
            entry: child,
            data_offset: parent.data_offset + self.entries[child as usize].offset,
        })
    }

    /// Number of children below `state`.
    pub fn element_count(&self, state: LayoutState) -> usize {
        self.entry(state).children.len()
    }

    pub fn kind(&self, state: LayoutState) -> LayoutKind {
        self.entry(state).kind
    }

    /// Absolute offset of `state` within the block.
    pub fn offset(&self, state: LayoutState) -> u32 {
        state.data_offset
    }

    pub fn entry_size(&self, state: LayoutState) -> u32 {
        self.entry(state).size
    }

    fn entry(&self, state: LayoutState) -> &LayoutEntry {
        &self.entries[state.entry as usize]
    }
}

/// Derives layouts from parameter types with C struct alignment rules.
///
/// ```
/// use matbox_core::Type;
/// use matbox_target::{LayoutBuilder, StringMode};
///
/// let layout = LayoutBuilder::new()
///     .string_mode(StringMode::Mapped)
///     .build([&Type::Bool, &Type::Float])
///     .unwrap();
/// assert_eq!(layout.size(), 8);
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct LayoutBuilder {
    strings: StringMode,
}

impl LayoutBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn string_mode(mut self, strings: StringMode) -> Self {
        self.strings = strings;
        self
    }

    pub fn build<'t>(
        &self,
        parameters: impl IntoIterator<Item = &'t Type>,
    ) -> Result<ValueLayout, TargetCodeError> {
        let mut entries = vec![LayoutEntry::leaf(LayoutKind::Struct, 0, 0)];
        let (size, _, children) = self.members(&mut entries, parameters)?;
        entries[0] = LayoutEntry::compound(LayoutKind::Struct, 0, size, children);
        Ok(ValueLayout {
            entries,
            strings: self.strings,
        })
    }

    /// Push the entry for `ty` and its subtree; returns its index and alignment.
    fn add(
        &self,
        entries: &mut Vec<LayoutEntry>,
        ty: &Type,
    ) -> Result<(u32, u32), TargetCodeError> {
        let index = entries.len();
        entries.push(LayoutEntry::leaf(LayoutKind::Bool, 0, 0));

        let leaf = |kind: LayoutKind| {
            let (size, align) = kind.leaf_size(self.strings).unwrap_or((0, 1));
            (LayoutEntry::leaf(kind, 0, size), align)
        };

        let (entry, align) = match ty {
            Type::Bool => leaf(LayoutKind::Bool),
            Type::Int => leaf(LayoutKind::Int),
            Type::Enum(_) => leaf(LayoutKind::Enum),
            Type::Float => leaf(LayoutKind::Float),
            Type::Double => leaf(LayoutKind::Double),
            Type::String => leaf(LayoutKind::String),
            Type::Texture(_) => leaf(LayoutKind::Texture),
            Type::LightProfile => leaf(LayoutKind::LightProfile),
            Type::BsdfMeasurement => leaf(LayoutKind::BsdfMeasurement),
            Type::Vector { element, size } => {
                let scalar = scalar_type(*element);
                let members = iter::repeat_n(&scalar, *size as usize);
                self.compound(entries, LayoutKind::Vector, members)?
            }
            Type::Matrix {
                element,
                columns,
                rows,
            } => {
                let column = Type::vector(*element, *rows);
                let members = iter::repeat_n(&column, *columns as usize);
                self.compound(entries, LayoutKind::Matrix, members)?
            }
            Type::Color => {
                self.compound(entries, LayoutKind::Color, iter::repeat_n(&Type::Float, 3))?
            }
            Type::Array { element, size } => {
                self.compound(entries, LayoutKind::Array, iter::repeat_n(&**element, *size))?
            }
            Type::Struct(s) => {
                self.compound(entries, LayoutKind::Struct, s.fields.iter().map(|(_, t)| t))?
            }
            Type::Bsdf | Type::Edf | Type::Vdf => {
                return Err(TargetCodeError::UnsupportedLayoutType(ty.clone()));
            }
        };

        entries[index] = entry;
        Ok((index as u32, align))
    }

    fn compound<'t>(
        &self,
        entries: &mut Vec<LayoutEntry>,
        kind: LayoutKind,
        members: impl IntoIterator<Item = &'t Type>,
    ) -> Result<(LayoutEntry, u32), TargetCodeError> {
        let (size, align, children) = self.members(entries, members)?;
        Ok((LayoutEntry::compound(kind, 0, size, children), align))
    }

    fn members<'t>(
        &self,
        entries: &mut Vec<LayoutEntry>,
        members: impl IntoIterator<Item = &'t Type>,
    ) -> Result<(u32, u32, Vec<u32>), TargetCodeError> {
        let mut offset = 0;
        let mut align = 1;
        let mut children = Vec::new();
        for ty in members {
            let (child, child_align) = self.add(entries, ty)?;
            offset = align_up(offset, child_align);
            let entry = &mut entries[child as usize];
            entry.offset = offset;
            offset += entry.size;
            align = align.max(child_align);
            children.push(child);
        }
        Ok((align_up(offset, align), align, children))
    }
}

fn align_up(value: u32, align: u32) -> u32 {
    value.div_ceil(align) * align
}

fn scalar_type(scalar: Scalar) -> Type {
    match scalar {
        Scalar::Bool => Type::Bool,
        Scalar::Int => Type::Int,
        Scalar::Float => Type::Float,
        Scalar::Double => Type::Double,
    }
}
