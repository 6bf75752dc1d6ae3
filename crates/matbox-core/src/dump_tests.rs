use indoc::indoc;

use crate::{
    Colors, DirectCall, Dumper, Expression, ExpressionList, MemoryTransaction, Scalar,
    TextureShape, Type, Value, ValueList,
};

fn bsdf_call() -> Expression {
    let arguments: ExpressionList = [
        ("tint", Expression::Constant(Value::Color([1.0, 0.5, 0.0]))),
        (
            "roughness",
            Expression::Parameter {
                index: 0,
                ty: Type::Float,
            },
        ),
    ]
    .into_iter()
    .collect();
    Expression::Call(DirectCall::new(
        "df::diffuse_reflection_bsdf",
        Type::Bsdf,
        arguments,
    ))
}

#[test]
fn nested_calls_indent_per_level() {
    let arguments: ExpressionList = [
        ("scattering", bsdf_call()),
        (
            "emission",
            Expression::Temporary {
                index: 0,
                ty: Type::Edf,
            },
        ),
    ]
    .into_iter()
    .collect();
    let surface = Expression::Call(DirectCall::new("material_surface", Type::Bsdf, arguments));

    let out = Dumper::new(None, Colors::OFF).expression(&surface);

    insta::assert_snapshot!(out, @r"
    material_surface(
      scattering: df::diffuse_reflection_bsdf(
        tint: color(1.0, 0.5, 0.0),
        roughness: parameter[0]
      ),
      emission: temporary[0]
    )
    ");
}

#[test]
fn call_without_arguments_stays_on_one_line() {
    let call = Expression::Call(DirectCall::new(
        "state::normal",
        Type::vector(Scalar::Float, 3),
        ExpressionList::new(),
    ));
    assert_eq!(
        Dumper::new(None, Colors::OFF).expression(&call),
        "state::normal()"
    );
}

#[test]
fn value_list_resolves_resource_names() {
    let mut store = MemoryTransaction::new();
    let wood = store.store("tex/wood.png");

    let mut list = ValueList::new();
    list.push("roughness", Value::Float(0.5));
    list.push("tint", Value::texture(wood, TextureShape::TwoD));
    list.push("mask", Value::texture(crate::Tag::NONE, TextureShape::TwoD));

    let out = Dumper::new(Some(&store), Colors::OFF).value_list(&list);

    assert_eq!(
        out,
        indoc! {r#"
            0: roughness = 0.5
            1: tint = texture_2d(tag:1 "tex/wood.png")
            2: mask = texture_2d()
        "#}
    );
}

#[test]
fn compound_values() {
    let d = Dumper::new(None, Colors::OFF);

    assert_eq!(d.value(&Value::float3(1.0, 2.0, 3.0)), "float3(1.0, 2.0, 3.0)");
    assert_eq!(
        d.value(&Value::Array {
            element: Type::Int,
            items: vec![Value::Int(4), Value::Int(5)],
        }),
        "int[2](4, 5)"
    );
    assert_eq!(
        d.value(&Value::Matrix(vec![
            Value::Vector(vec![Value::Float(1.0), Value::Float(0.0)]),
            Value::Vector(vec![Value::Float(0.0), Value::Float(1.0)]),
        ])),
        "float2x2(float2(1.0, 0.0), float2(0.0, 1.0))"
    );
    assert_eq!(d.value(&Value::String("uv".into())), "\"uv\"");
    assert_eq!(d.value(&Value::InvalidDf(Type::Edf)), "edf()");
}

#[test]
fn colors_wrap_names() {
    let d = Dumper::new(None, Colors::ON);
    let out = d.value(&Value::Bool(true));
    assert_eq!(out, "\x1b[32mtrue\x1b[0m");
}
