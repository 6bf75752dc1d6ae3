use matbox_core::{MemoryTransaction, Scalar, Tag, TextureShape, Type, Value, ValueList};

use crate::error::PackError;
use crate::layout::{LayoutBuilder, LayoutEntry, LayoutKind, StringMode, ValueLayout};
use crate::options::TargetCodeOptions;
use crate::pack::{pack, write_value};
use crate::resolver::TransactionResolver;
use crate::target_code::TargetCode;
use crate::test_utils::{StubResolver, read_f32, read_u32};

fn mapped(types: &[Type]) -> ValueLayout {
    LayoutBuilder::new()
        .string_mode(StringMode::Mapped)
        .build(types)
        .unwrap()
}

#[test]
fn unresolved_texture_packs_as_zero() {
    let layout = mapped(&[Type::Float, Type::Texture(TextureShape::TwoD)]);
    let values: ValueList = [
        ("roughness", Value::Float(0.5)),
        ("tint", Value::texture(Tag::NONE, TextureShape::TwoD)),
    ]
    .into_iter()
    .collect();
    let code = TargetCode::for_linking(TargetCodeOptions::new().string_mode(StringMode::Mapped));

    let block = pack(&layout, &values, &TransactionResolver::new(&code, None)).unwrap();

    assert_eq!(block.len(), 8);
    assert_eq!(read_f32(&block, 0), 0.5);
    assert_eq!(read_u32(&block, 4), 0);
}

#[test]
fn texture_resolves_through_table() {
    let mut store = MemoryTransaction::new();
    store.store("unused.png");
    let wood = store.store("wood.png");

    let mut code = TargetCode::for_linking(TargetCodeOptions::new().string_mode(StringMode::Mapped));
    code.add_texture_index(1, "marble.png", TextureShape::TwoD);
    code.add_texture_index(2, "wood.png", TextureShape::TwoD);

    let layout = mapped(&[Type::Float, Type::Texture(TextureShape::TwoD)]);
    let values: ValueList = [
        ("roughness", Value::Float(0.25)),
        ("tint", Value::texture(wood, TextureShape::TwoD)),
    ]
    .into_iter()
    .collect();

    let block = pack(&layout, &values, &TransactionResolver::new(&code, Some(&store))).unwrap();

    assert_eq!(read_f32(&block, 0), 0.25);
    assert_eq!(read_u32(&block, 4), 2);
}

#[test]
fn values_follow_declared_layout() {
    let mut store = MemoryTransaction::new();
    store.store("unused.png");
    let wood = store.store("wood.png");

    let mut code = TargetCode::for_linking(TargetCodeOptions::new().string_mode(StringMode::Mapped));
    code.add_texture_index(1, "marble.png", TextureShape::TwoD);
    code.add_texture_index(2, "wood.png", TextureShape::TwoD);

    // Texture first, then a float after four bytes of padding.
    let layout = ValueLayout::from_entries(
        vec![
            LayoutEntry::compound(LayoutKind::Struct, 0, 12, vec![1, 2]),
            LayoutEntry::leaf(LayoutKind::Texture, 0, 4),
            LayoutEntry::leaf(LayoutKind::Float, 8, 4),
        ],
        StringMode::Mapped,
    )
    .unwrap();
    let values: ValueList = [
        ("tint", Value::texture(wood, TextureShape::TwoD)),
        ("roughness", Value::Float(0.5)),
    ]
    .into_iter()
    .collect();

    let block = pack(&layout, &values, &TransactionResolver::new(&code, Some(&store))).unwrap();

    assert_eq!(block.len(), 12);
    assert_eq!(read_u32(&block, 0), 2);
    assert_eq!(&block[4..8], &[0u8; 4]);
    assert_eq!(read_f32(&block, 8), 0.5);

    let slot = code.add_argument_block_layout(layout).unwrap();
    let published = code.init_argument_block(slot, Some(&store), &values).unwrap();
    assert_eq!(*published, block);
}

#[test]
fn count_mismatch_is_rejected() {
    let layout = mapped(&[Type::Float, Type::Int]);
    let values: ValueList = [("a", Value::Float(1.0))].into_iter().collect();

    let err = pack(&layout, &values, &StubResolver).unwrap_err();

    assert_eq!(
        err,
        PackError::ArgumentCountMismatch {
            expected: 2,
            actual: 1
        }
    );
}

#[test]
fn mismatched_value_leaves_its_slot_zeroed() {
    let layout = mapped(&[Type::Int, Type::Float]);
    let values: ValueList = [("a", Value::Float(3.0)), ("b", Value::Float(2.0))]
        .into_iter()
        .collect();

    let block = pack(&layout, &values, &StubResolver).unwrap();

    assert_eq!(read_u32(&block, 0), 0);
    assert_eq!(read_f32(&block, 4), 2.0);
}

#[test]
fn write_value_reports_kind_mismatch() {
    let layout = mapped(&[Type::Int]);
    let mut data = vec![0u8; layout.size()];
    let state = layout.nested_state(0, layout.root()).unwrap();

    let err = write_value(&layout, &mut data, &Value::Bool(true), &StubResolver, state).unwrap_err();

    assert_eq!(
        err,
        PackError::KindMismatch {
            expected: LayoutKind::Int,
            found: Type::Bool
        }
    );
}

#[test]
fn write_value_checks_bounds() {
    let layout = mapped(&[Type::Float, Type::Int]);
    let mut data = vec![0u8; 4];
    let state = layout.nested_state(1, layout.root()).unwrap();

    let err = write_value(&layout, &mut data, &Value::Int(1), &StubResolver, state).unwrap_err();

    assert_eq!(
        err,
        PackError::OutOfBounds {
            offset: 4,
            size: 4,
            len: 4
        }
    );
}

#[test]
fn short_vector_is_rejected() {
    let layout = mapped(&[Type::vector(Scalar::Float, 3)]);
    let values: ValueList = [("v", Value::Vector(vec![Value::Float(1.0)]))]
        .into_iter()
        .collect();
    let mut data = vec![0u8; layout.size()];
    let state = layout.nested_state(0, layout.root()).unwrap();

    let err = write_value(&layout, &mut data, values.get(0).unwrap(), &StubResolver, state)
        .unwrap_err();
    assert_eq!(
        err,
        PackError::ElementCountMismatch {
            kind: LayoutKind::Vector,
            expected: 3,
            actual: 1
        }
    );

    let block = pack(&layout, &values, &StubResolver).unwrap();
    assert!(block.iter().all(|b| *b == 0));
}

#[test]
fn compounds_are_written_recursively() {
    let layout = mapped(&[
        Type::Bool,
        Type::Color,
        Type::vector(Scalar::Int, 2),
        Type::Double,
    ]);
    let values: ValueList = [
        ("flag", Value::Bool(true)),
        ("tint", Value::Color([0.25, 0.5, 0.75])),
        ("size", Value::Vector(vec![Value::Int(3), Value::Int(-4)])),
        ("scale", Value::Double(2.5)),
    ]
    .into_iter()
    .collect();

    let block = pack(&layout, &values, &StubResolver).unwrap();

    // bool @0, color @4..16, int2 @16..24, double @24
    assert_eq!(block.len(), 32);
    assert_eq!(block[0], 1);
    assert_eq!(read_f32(&block, 4), 0.25);
    assert_eq!(read_f32(&block, 8), 0.5);
    assert_eq!(read_f32(&block, 12), 0.75);
    assert_eq!(read_u32(&block, 16), 3);
    assert_eq!(read_u32(&block, 20) as i32, -4);
    assert_eq!(f64::from_ne_bytes(block[24..32].try_into().unwrap()), 2.5);
}

#[test]
fn strings_follow_the_layout_mode() {
    let values: ValueList = [("label", Value::String("albedo".into()))].into_iter().collect();

    let block = pack(&mapped(&[Type::String]), &values, &StubResolver).unwrap();
    assert_eq!(read_u32(&block, 0), 6);

    let unmapped = LayoutBuilder::new().build([&Type::String]).unwrap();
    let block = pack(&unmapped, &values, &StubResolver).unwrap();
    assert_eq!(&*block, &[0u8; 8]);
}

#[test]
fn resources_use_the_resolver() {
    let layout = mapped(&[Type::LightProfile, Type::BsdfMeasurement]);
    let values: ValueList = [
        ("profile", Value::LightProfile(matbox_core::ResourceRef::plain(Tag(3)))),
        ("measurement", Value::BsdfMeasurement(matbox_core::ResourceRef::plain(Tag(4)))),
    ]
    .into_iter()
    .collect();

    let block = pack(&layout, &values, &StubResolver).unwrap();

    assert_eq!(read_u32(&block, 0), 7);
    assert_eq!(read_u32(&block, 4), 7);
}

#[test]
fn packing_is_deterministic() {
    let layout = mapped(&[Type::Float, Type::Int, Type::Color]);
    let values: ValueList = [
        ("a", Value::Float(1.5)),
        ("b", Value::Int(9)),
        ("c", Value::Color([1.0, 0.0, 0.5])),
    ]
    .into_iter()
    .collect();

    let first = pack(&layout, &values, &StubResolver).unwrap();
    let second = pack(&layout, &values, &StubResolver).unwrap();

    assert_eq!(first, second);
    assert_eq!(first.as_ptr() as usize % crate::block::ALIGN, 0);
}
