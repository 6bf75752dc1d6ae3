use std::iter;
use std::sync::Arc;

use matbox_core::{PredefinedStruct, Scalar, Tag, TextureShape, Type, TypeFactory, Value};

use crate::builder::{CompiledInstance, InstanceBuilder};
use crate::dag::DagNode;

pub fn struct_type(tf: &TypeFactory, which: PredefinedStruct) -> Type {
    Type::Struct(tf.predefined_struct(which))
}

pub fn float3() -> Type {
    Type::vector(Scalar::Float, 3)
}

pub fn diffuse(tint: Arc<DagNode>) -> Arc<DagNode> {
    DagNode::call(
        "df::diffuse_reflection_bsdf",
        Type::Bsdf,
        [("tint", tint), ("roughness", DagNode::parameter(0, Type::Float))],
    )
}

pub fn no_emission(tf: &TypeFactory) -> Value {
    Value::Struct {
        ty: tf.predefined_struct(PredefinedStruct::MaterialEmission),
        fields: vec![Value::InvalidDf(Type::Edf), Value::Color([0.0; 3])],
    }
}

pub fn surface(tf: &TypeFactory, scattering: Arc<DagNode>) -> Arc<DagNode> {
    DagNode::call(
        "material_surface",
        struct_type(tf, PredefinedStruct::MaterialSurface),
        [
            ("scattering", scattering),
            ("emission", DagNode::constant(no_emission(tf))),
        ],
    )
}

pub fn clear_volume(tf: &TypeFactory) -> Value {
    Value::Struct {
        ty: tf.predefined_struct(PredefinedStruct::MaterialVolume),
        fields: vec![
            Value::InvalidDf(Type::Vdf),
            Value::Color([0.0; 3]),
            Value::Color([0.0; 3]),
        ],
    }
}

pub fn state_call(name: &str, ty: Type) -> Arc<DagNode> {
    DagNode::call(name, ty, iter::empty::<(&str, Arc<DagNode>)>())
}

/// `material(...)` with `surface` used for both faces.
pub fn material(
    tf: &TypeFactory,
    surface: Arc<DagNode>,
    volume: Arc<DagNode>,
    normal: Arc<DagNode>,
) -> Arc<DagNode> {
    let geometry = DagNode::call(
        "material_geometry",
        struct_type(tf, PredefinedStruct::MaterialGeometry),
        [
            ("displacement", DagNode::constant(Value::float3(0.0, 0.0, 0.0))),
            ("cutout_opacity", DagNode::constant(Value::Float(1.0))),
            ("normal", normal),
        ],
    );
    DagNode::call(
        "material",
        tf.material(),
        [
            ("thin_walled", DagNode::constant(Value::Bool(false))),
            ("surface", surface.clone()),
            ("backface", surface),
            ("ior", DagNode::constant(Value::Color([1.5; 3]))),
            ("volume", volume),
            ("geometry", geometry),
        ],
    )
}

/// Diffuse material whose surface lives in temporary 0.
///
/// Parameters: `roughness = 0.5`, `tint = texture_2d()`.
pub fn diffuse_instance(tf: &TypeFactory, normal: Arc<DagNode>) -> CompiledInstance {
    let surface_ty = struct_type(tf, PredefinedStruct::MaterialSurface);
    let tint = DagNode::constant(Value::Color([0.8, 0.2, 0.1]));
    InstanceBuilder::new()
        .temporary(surface(tf, diffuse(tint)))
        .body(material(
            tf,
            DagNode::temporary(0, surface_ty),
            DagNode::constant(clear_volume(tf)),
            normal,
        ))
        .parameter("roughness", Value::Float(0.5))
        .parameter("tint", Value::texture(Tag::NONE, TextureShape::TwoD))
        .build()
}
