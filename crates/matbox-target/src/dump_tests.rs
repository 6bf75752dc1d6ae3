use matbox_core::{Colors, TextureShape, Type, Value, ValueList};

use crate::function::{FunctionKind, PrototypeLanguage};
use crate::generated::GeneratedCode;
use crate::layout::{LayoutBuilder, StringMode};
use crate::options::TargetCodeOptions;
use crate::state::{StateField, StateUsage};
use crate::target_code::TargetCode;
use crate::test_utils::MockNative;

fn options() -> TargetCodeOptions {
    TargetCodeOptions::new().string_mode(StringMode::Mapped)
}

#[test]
fn dump_linked_artifact() {
    let mut code = TargetCode::for_linking(options());
    code.add_code_segment("int x;", "globals");
    let eval = code.add_function("eval", FunctionKind::Generic, Some(0));
    code.set_function_prototype(eval, PrototypeLanguage::Cuda, "float eval(State*)")
        .unwrap();
    code.add_function("sample", FunctionKind::DfSample, None);
    code.add_texture_index(1, "wood.png", TextureShape::TwoD);
    code.add_light_profile_index(1, "spot.ies");
    code.add_string_constant_index(2, "albedo");
    code.add_ro_segment("lut", &[0, 1, 2, 3]);
    let layout = LayoutBuilder::new()
        .string_mode(StringMode::Mapped)
        .build([&Type::Float, &Type::Texture(TextureShape::TwoD)])
        .unwrap();
    code.add_argument_block_layout(layout).unwrap();

    let out = code.dump(Colors::OFF);

    insta::assert_snapshot!(out.trim_end(), @r#"
    Code: source, 0 bytes
    Render state usage: all
    Code segments:
      0: globals (6 bytes)
    Functions:
      0: eval [generic] block 0
        cuda: float eval(State*)
      1: sample [df_sample]
    Textures:
      1: "wood.png" texture_2d
    Light profiles:
      1: "spot.ies"
    Bsdf measurements:
    String constants:
      1: ""
      2: "albedo"
    Data segments:
      0: lut (4 bytes)
    Argument blocks:
      0: 8 bytes, 2 arguments, empty
    "#);
}

#[test]
fn dump_native_artifact_with_packed_slot() {
    let (native, _probe) = MockNative::new(true);
    let usage: StateUsage = [StateField::Normal, StateField::TextureCoordinate]
        .into_iter()
        .collect();
    let layout = LayoutBuilder::new()
        .string_mode(StringMode::Mapped)
        .build([&Type::Int])
        .unwrap();
    let generated = GeneratedCode::native(native).state_usage(usage).layout(layout);
    let code = TargetCode::new(generated, None, options()).unwrap();
    let args: ValueList = [("count", Value::Int(4))].into_iter().collect();
    code.init_argument_block(0, None, &args).unwrap();

    let out = code.dump(Colors::OFF);

    assert!(out.starts_with("Code: native\n"));
    assert!(out.contains("Render state usage: 0x12 (normal, texture_coordinate)\n"));
    assert!(out.ends_with("Argument blocks:\n  0: 4 bytes, 1 arguments, packed\n"));
}

#[test]
fn dump_colors_names() {
    let mut code = TargetCode::for_linking(options());
    code.add_function("eval", FunctionKind::Generic, None);

    let out = code.dump(Colors::ON);

    assert!(out.contains("\x1b[34meval\x1b[0m [generic]"));
}
