use matbox_core::{Expression, PredefinedStruct, Scalar, Type, TypeFactory, Value};

use crate::material::{CompiledMaterial, UnitContext};
use crate::test_utils::{diffuse_instance, float3, state_call, struct_type};

fn material() -> CompiledMaterial {
    let tf = TypeFactory::new();
    CompiledMaterial::from_instance(
        &diffuse_instance(&tf, state_call("state::normal", float3())),
        UnitContext::new(),
    )
}

fn definition(expr: &Expression) -> &str {
    expr.as_call().map(|c| c.definition.as_str()).unwrap_or("")
}

#[test]
fn empty_path_is_body() {
    let m = material();
    let body = m.lookup_sub_expression("").unwrap();
    assert_eq!(definition(&body), "material");
}

#[test]
fn temporaries_are_followed() {
    let m = material();

    let surface = m.lookup_sub_expression("surface").unwrap();
    assert_eq!(definition(&surface), "material_surface");

    let tint = m.lookup_sub_expression("backface.scattering.tint").unwrap();
    assert_eq!(tint, Expression::Constant(Value::Color([0.8, 0.2, 0.1])));
}

#[test]
fn walks_into_constant_structs_and_vectors() {
    let m = material();

    assert_eq!(
        m.lookup_sub_expression("surface.emission.intensity"),
        Some(Expression::Constant(Value::Color([0.0; 3])))
    );
    assert_eq!(
        m.lookup_sub_expression("geometry.displacement.2"),
        Some(Expression::Constant(Value::Float(0.0)))
    );
    assert_eq!(
        m.lookup_sub_expression("volume.scattering"),
        Some(Expression::Constant(Value::InvalidDf(Type::Vdf)))
    );
}

#[test]
fn parameters_are_leaves() {
    let m = material();

    assert_eq!(
        m.lookup_sub_expression("surface.scattering.roughness"),
        Some(Expression::Parameter {
            index: 0,
            ty: Type::Float,
        })
    );
    assert_eq!(m.lookup_sub_expression("surface.scattering.roughness.x"), None);
    assert_eq!(m.lookup_sub_expression("missing"), None);
    assert_eq!(m.lookup_sub_expression("geometry.normal.x"), None);
}

#[test]
fn positional_arguments() {
    let m = material();
    let ior = m.lookup_sub_expression("3").unwrap();
    assert_eq!(ior, Expression::Constant(Value::Color([1.5; 3])));
}

#[test]
fn typed_lookup_uses_material_struct() {
    let tf = TypeFactory::new();
    let m = material();

    let (_, ty) = m.lookup_sub_expression_typed("surface", &tf).unwrap();
    assert_eq!(ty, struct_type(&tf, PredefinedStruct::MaterialSurface));

    let (_, ty) = m.lookup_sub_expression_typed("", &tf).unwrap();
    assert_eq!(ty, tf.material());

    let (_, ty) = m
        .lookup_sub_expression_typed("geometry.displacement.0", &tf)
        .unwrap();
    assert_eq!(ty, Type::Float);

    // Below the distribution function the expression's own type is used.
    let (_, ty) = m
        .lookup_sub_expression_typed("surface.scattering.tint", &tf)
        .unwrap();
    assert_eq!(ty, Type::Color);

    let (expr, ty) = m.lookup_sub_expression_typed("geometry.normal", &tf).unwrap();
    assert_eq!(definition(&expr), "state::normal");
    assert_eq!(ty, Type::vector(Scalar::Float, 3));

    assert!(m.lookup_sub_expression_typed("nope", &tf).is_none());
}
