use std::io::Write;
use std::iter;
use std::path::PathBuf;
use std::sync::Arc;

use indoc::indoc;
use matbox_core::{Tag, TextureShape, Type, TypeFactory, Value};
use matbox_material::{CompiledMaterial, DagNode, InstanceBuilder, UnitContext};
use tempfile::NamedTempFile;

use super::CommandError;
use super::dump::{self, DumpArgs};
use super::hashes::{self, HashesArgs};
use super::layout::{self, LayoutArgs};
use super::lookup::{self, LookupArgs};

fn material() -> CompiledMaterial {
    let tf = TypeFactory::new();
    let body = DagNode::call(
        "material",
        tf.material(),
        [
            ("thin_walled", DagNode::parameter(0, Type::Bool)),
            ("ior", DagNode::constant(Value::Color([1.5; 3]))),
        ],
    );
    let instance = InstanceBuilder::new()
        .body(body)
        .parameter("walled", Value::Bool(true))
        .parameter("label", Value::String("oak".into()))
        .parameter("roughness", Value::Float(0.5))
        .build();
    CompiledMaterial::from_instance(&instance, UnitContext::new())
}

fn write_temp(bytes: &[u8]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(bytes).unwrap();
    file.flush().unwrap();
    file
}

fn material_file() -> NamedTempFile {
    write_temp(&material().to_bytes())
}

#[test]
fn dump_prints_material_trace() {
    let file = material_file();

    let out = dump::run(DumpArgs {
        material_path: file.path().to_path_buf(),
        color: false,
    })
    .unwrap();

    assert_eq!(out, material().dump(None, matbox_core::Colors::OFF));
    assert!(out.starts_with("Arguments:\n0: walled = true\n"));
}

#[test]
fn hashes_lists_every_slot() {
    let file = material_file();
    let m = material();

    let out = hashes::run(HashesArgs {
        material_path: file.path().to_path_buf(),
    })
    .unwrap();

    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 16);
    assert!(lines[0].starts_with("material "));
    assert!(lines[0].ends_with(&m.hash().to_string()));
    assert!(lines[1].starts_with("thin_walled "));
    assert_eq!(lines[15], "properties: 0x0");
}

#[test]
fn lookup_prints_type_and_expression() {
    let file = material_file();

    let out = lookup::run(LookupArgs {
        material_path: file.path().to_path_buf(),
        expression_path: "ior".into(),
        color: false,
    })
    .unwrap();

    assert_eq!(out, "type: color\ncolor(1.5, 1.5, 1.5)\n");
}

#[test]
fn lookup_reports_missing_path() {
    let file = material_file();

    let err = lookup::run(LookupArgs {
        material_path: file.path().to_path_buf(),
        expression_path: "surface.nowhere".into(),
        color: false,
    })
    .unwrap_err();

    assert_eq!(err.to_string(), "no sub-expression at `surface.nowhere`");
}

#[test]
fn layout_follows_string_mode() {
    let file = material_file();
    let run = |mapped_strings| {
        layout::run(LayoutArgs {
            material_path: file.path().to_path_buf(),
            mapped_strings,
        })
        .unwrap()
    };

    assert_eq!(
        run(false),
        indoc! {"
            size: 24 bytes
            0: walled: bool @0 (1 bytes)
            1: label: string @8 (8 bytes)
            2: roughness: float @16 (4 bytes)
        "}
    );
    assert_eq!(
        run(true),
        indoc! {"
            size: 12 bytes
            0: walled: bool @0 (1 bytes)
            1: label: string @4 (4 bytes)
            2: roughness: float @8 (4 bytes)
        "}
    );
}

#[test]
fn layout_rejects_distribution_arguments() {
    let tf = TypeFactory::new();
    let body = DagNode::call("material", tf.material(), iter::empty::<(&str, Arc<DagNode>)>());
    let instance = InstanceBuilder::new()
        .body(body)
        .parameter("scattering", Value::InvalidDf(Type::Bsdf))
        .parameter("map", Value::texture(Tag(1), TextureShape::TwoD))
        .build();
    let m = CompiledMaterial::from_instance(&instance, UnitContext::new());
    let file = write_temp(&m.to_bytes());

    let err = layout::run(LayoutArgs {
        material_path: file.path().to_path_buf(),
        mapped_strings: false,
    })
    .unwrap_err();

    assert!(matches!(err, CommandError::Layout(_)));
}

#[test]
fn missing_file_is_an_io_error() {
    let err = hashes::run(HashesArgs {
        material_path: PathBuf::from("/nonexistent/wood.cmat"),
    })
    .unwrap_err();

    assert!(matches!(err, CommandError::Io { .. }));
    assert!(err.to_string().starts_with("cannot read /nonexistent/wood.cmat: "));
}

#[test]
fn garbage_is_a_decode_error() {
    let file = write_temp(&[0xff; 3]);

    let err = dump::run(DumpArgs {
        material_path: file.path().to_path_buf(),
        color: false,
    })
    .unwrap_err();

    assert!(matches!(err, CommandError::Decode { .. }));
}
