//! Static types of values and expressions.
//!
//! Types are plain data: cloning a compound type clones its description,
//! struct types are shared behind `Arc`.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Element kind of vectors and matrices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Scalar {
    Bool,
    Int,
    Float,
    Double,
}

impl Scalar {
    pub fn name(self) -> &'static str {
        match self {
            Scalar::Bool => "bool",
            Scalar::Int => "int",
            Scalar::Float => "float",
            Scalar::Double => "double",
        }
    }
}

/// Dimensionality of a texture resource.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TextureShape {
    #[default]
    Invalid,
    TwoD,
    ThreeD,
    Cube,
    Ptex,
}

impl TextureShape {
    pub fn type_name(self) -> &'static str {
        match self {
            TextureShape::Invalid => "texture",
            TextureShape::TwoD => "texture_2d",
            TextureShape::ThreeD => "texture_3d",
            TextureShape::Cube => "texture_cube",
            TextureShape::Ptex => "texture_ptex",
        }
    }
}

/// A named struct type with ordered fields.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StructType {
    pub name: String,
    pub fields: Vec<(String, Type)>,
}

impl StructType {
    pub fn new(name: impl Into<String>, fields: Vec<(String, Type)>) -> Self {
        Self {
            name: name.into(),
            fields,
        }
    }

    pub fn field(&self, name: &str) -> Option<&Type> {
        self.fields.iter().find(|(n, _)| n == name).map(|(_, t)| t)
    }

    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|(n, _)| n == name)
    }
}

/// Static type of a value or expression.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Type {
    Bool,
    Int,
    Enum(String),
    Float,
    Double,
    String,
    Vector { element: Scalar, size: u8 },
    Matrix { element: Scalar, columns: u8, rows: u8 },
    Color,
    Array { element: Box<Type>, size: usize },
    Struct(Arc<StructType>),
    Texture(TextureShape),
    LightProfile,
    BsdfMeasurement,
    Bsdf,
    Edf,
    Vdf,
}

impl Type {
    pub fn vector(element: Scalar, size: u8) -> Self {
        Type::Vector { element, size }
    }

    pub fn array(element: Type, size: usize) -> Self {
        Type::Array {
            element: Box::new(element),
            size,
        }
    }

    pub fn is_resource(&self) -> bool {
        matches!(
            self,
            Type::Texture(_) | Type::LightProfile | Type::BsdfMeasurement
        )
    }

    /// Type of the struct member `name`, if this is a struct type.
    pub fn field(&self, name: &str) -> Option<&Type> {
        match self {
            Type::Struct(s) => s.field(name),
            _ => None,
        }
    }

    /// Type of a compound's element: array element, vector component,
    /// matrix column, or color channel.
    pub fn element(&self) -> Option<Type> {
        match self {
            Type::Array { element, .. } => Some((**element).clone()),
            Type::Vector { element, .. } => Some(scalar_type(*element)),
            Type::Matrix { element, rows, .. } => Some(Type::vector(*element, *rows)),
            Type::Color => Some(Type::Float),
            _ => None,
        }
    }
}

fn scalar_type(scalar: Scalar) -> Type {
    match scalar {
        Scalar::Bool => Type::Bool,
        Scalar::Int => Type::Int,
        Scalar::Float => Type::Float,
        Scalar::Double => Type::Double,
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Bool => f.write_str("bool"),
            Type::Int => f.write_str("int"),
            Type::Enum(name) => f.write_str(name),
            Type::Float => f.write_str("float"),
            Type::Double => f.write_str("double"),
            Type::String => f.write_str("string"),
            Type::Vector { element, size } => write!(f, "{}{}", element.name(), size),
            Type::Matrix {
                element,
                columns,
                rows,
            } => write!(f, "{}{}x{}", element.name(), columns, rows),
            Type::Color => f.write_str("color"),
            Type::Array { element, size } => write!(f, "{element}[{size}]"),
            Type::Struct(s) => f.write_str(&s.name),
            Type::Texture(shape) => f.write_str(shape.type_name()),
            Type::LightProfile => f.write_str("light_profile"),
            Type::BsdfMeasurement => f.write_str("bsdf_measurement"),
            Type::Bsdf => f.write_str("bsdf"),
            Type::Edf => f.write_str("edf"),
            Type::Vdf => f.write_str("vdf"),
        }
    }
}

/// Struct types known to every compiler instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PredefinedStruct {
    Material,
    MaterialSurface,
    MaterialEmission,
    MaterialVolume,
    MaterialGeometry,
}

/// Hands out the predefined struct types.
///
/// All returned handles of one factory share storage, so comparing them is cheap.
#[derive(Clone, Debug)]
pub struct TypeFactory {
    material: Arc<StructType>,
    surface: Arc<StructType>,
    emission: Arc<StructType>,
    volume: Arc<StructType>,
    geometry: Arc<StructType>,
}

impl Default for TypeFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeFactory {
    pub fn new() -> Self {
        let float3 = Type::vector(Scalar::Float, 3);

        let emission = Arc::new(StructType::new(
            "material_emission",
            vec![
                ("emission".into(), Type::Edf),
                ("intensity".into(), Type::Color),
            ],
        ));
        let surface = Arc::new(StructType::new(
            "material_surface",
            vec![
                ("scattering".into(), Type::Bsdf),
                ("emission".into(), Type::Struct(emission.clone())),
            ],
        ));
        let volume = Arc::new(StructType::new(
            "material_volume",
            vec![
                ("scattering".into(), Type::Vdf),
                ("absorption_coefficient".into(), Type::Color),
                ("scattering_coefficient".into(), Type::Color),
            ],
        ));
        let geometry = Arc::new(StructType::new(
            "material_geometry",
            vec![
                ("displacement".into(), float3.clone()),
                ("cutout_opacity".into(), Type::Float),
                ("normal".into(), float3),
            ],
        ));
        let material = Arc::new(StructType::new(
            "material",
            vec![
                ("thin_walled".into(), Type::Bool),
                ("surface".into(), Type::Struct(surface.clone())),
                ("backface".into(), Type::Struct(surface.clone())),
                ("ior".into(), Type::Color),
                ("volume".into(), Type::Struct(volume.clone())),
                ("geometry".into(), Type::Struct(geometry.clone())),
            ],
        ));

        Self {
            material,
            surface,
            emission,
            volume,
            geometry,
        }
    }

    pub fn predefined_struct(&self, which: PredefinedStruct) -> Arc<StructType> {
        match which {
            PredefinedStruct::Material => self.material.clone(),
            PredefinedStruct::MaterialSurface => self.surface.clone(),
            PredefinedStruct::MaterialEmission => self.emission.clone(),
            PredefinedStruct::MaterialVolume => self.volume.clone(),
            PredefinedStruct::MaterialGeometry => self.geometry.clone(),
        }
    }

    pub fn material(&self) -> Type {
        Type::Struct(self.material.clone())
    }
}
