//! Writing value lists into argument blocks.
//!
//! Scalars are stored in native byte order at the offset the layout
//! prescribes. Resources and mapped strings are replaced by the 32-bit table
//! index the resolver hands out.

use matbox_core::{Value, ValueList};

use crate::block::ArgumentBlock;
use crate::error::PackError;
use crate::layout::{LayoutKind, LayoutState, StringMode, ValueLayout};
use crate::resolver::ResourceResolver;

/// Pack `values` into a fresh block of `layout.size()` bytes.
///
/// The value count must match the layout. A value that does not fit its
/// slot is logged and leaves that slot zeroed.
pub fn pack(
    layout: &ValueLayout,
    values: &ValueList,
    resolver: &dyn ResourceResolver,
) -> Result<ArgumentBlock, PackError> {
    if values.len() != layout.num_elements() {
        return Err(PackError::ArgumentCountMismatch {
            expected: layout.num_elements(),
            actual: values.len(),
        });
    }
    Ok(pack_unchecked(layout, values, resolver))
}

pub(crate) fn pack_unchecked(
    layout: &ValueLayout,
    values: &ValueList,
    resolver: &dyn ResourceResolver,
) -> ArgumentBlock {
    let mut block = ArgumentBlock::zeroed(layout.size());
    let root = layout.root();
    for (i, (name, value)) in values.iter().enumerate() {
        let Some(state) = layout.nested_state(i, root) else {
            break;
        };
        if let Err(err) = write_value(layout, block.as_mut_slice(), value, resolver, state) {
            log::warn!("argument {i} `{name}` left zeroed: {err}");
        }
    }
    block
}

/// Write one value at `state`, recursing into compounds.
pub fn write_value(
    layout: &ValueLayout,
    data: &mut [u8],
    value: &Value,
    resolver: &dyn ResourceResolver,
    state: LayoutState,
) -> Result<(), PackError> {
    let kind = layout.kind(state);
    let offset = layout.offset(state) as usize;
    let size = layout.entry_size(state) as usize;
    if offset + size > data.len() {
        return Err(PackError::OutOfBounds {
            offset,
            size,
            len: data.len(),
        });
    }
    let slot = &mut data[offset..offset + size];

    match (kind, value) {
        (LayoutKind::Bool, Value::Bool(b)) => slot[0] = u8::from(*b),
        (LayoutKind::Int, Value::Int(i)) | (LayoutKind::Enum, Value::Enum { value: i, .. }) => {
            slot.copy_from_slice(&i.to_ne_bytes())
        }
        (LayoutKind::Float, Value::Float(f)) => slot.copy_from_slice(&f.to_ne_bytes()),
        (LayoutKind::Double, Value::Double(d)) => slot.copy_from_slice(&d.to_ne_bytes()),
        (LayoutKind::String, Value::String(s)) => match layout.string_mode() {
            StringMode::Mapped => slot.copy_from_slice(&resolver.string_index(s).to_ne_bytes()),
            StringMode::Unmapped => slot.fill(0),
        },
        (LayoutKind::Texture, Value::Texture(_))
        | (LayoutKind::LightProfile, Value::LightProfile(_))
        | (LayoutKind::BsdfMeasurement, Value::BsdfMeasurement(_)) => {
            slot.copy_from_slice(&resolver.resource_index(value).to_ne_bytes())
        }
        (LayoutKind::Color, Value::Color(rgb)) => {
            let components = rgb.map(Value::Float);
            write_elements(layout, data, kind, &components, resolver, state)?
        }
        (LayoutKind::Vector, Value::Vector(items))
        | (LayoutKind::Matrix, Value::Matrix(items))
        | (LayoutKind::Array, Value::Array { items, .. })
        | (LayoutKind::Struct, Value::Struct { fields: items, .. }) => {
            write_elements(layout, data, kind, items, resolver, state)?
        }
        _ => {
            return Err(PackError::KindMismatch {
                expected: kind,
                found: value.ty(),
            });
        }
    }
    Ok(())
}

fn write_elements(
    layout: &ValueLayout,
    data: &mut [u8],
    kind: LayoutKind,
    items: &[Value],
    resolver: &dyn ResourceResolver,
    state: LayoutState,
) -> Result<(), PackError> {
    let expected = layout.element_count(state);
    if items.len() != expected {
        return Err(PackError::ElementCountMismatch {
            kind,
            expected,
            actual: items.len(),
        });
    }
    for (i, item) in items.iter().enumerate() {
        if let Some(child) = layout.nested_state(i, state) {
            write_value(layout, data, item, resolver, child)?;
        }
    }
    Ok(())
}
