//! Constant values.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::store::Tag;
use crate::types::{Scalar, StructType, TextureShape, Type};

/// A reference to a resource held by the scene store.
///
/// `Tag::NONE` stands for "no resource"; such values always resolve to the
/// invalid runtime index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceRef {
    pub tag: Tag,
    pub shape: TextureShape,
}

impl ResourceRef {
    pub fn texture(tag: Tag, shape: TextureShape) -> Self {
        Self { tag, shape }
    }

    pub fn plain(tag: Tag) -> Self {
        Self {
            tag,
            shape: TextureShape::Invalid,
        }
    }
}

/// Kind of a resource-typed value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Texture,
    LightProfile,
    BsdfMeasurement,
}

/// A typed constant.
///
/// Vectors hold scalar components, matrices hold column vectors.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Bool(bool),
    Int(i32),
    Enum { type_name: String, value: i32 },
    Float(f32),
    Double(f64),
    String(String),
    Vector(Vec<Value>),
    Matrix(Vec<Value>),
    Color([f32; 3]),
    Array { element: Type, items: Vec<Value> },
    Struct { ty: Arc<StructType>, fields: Vec<Value> },
    Texture(ResourceRef),
    LightProfile(ResourceRef),
    BsdfMeasurement(ResourceRef),
    /// Default-constructed distribution function (`bsdf()`, `edf()`, `vdf()`).
    InvalidDf(Type),
}

impl Value {
    pub fn float3(x: f32, y: f32, z: f32) -> Self {
        Value::Vector(vec![Value::Float(x), Value::Float(y), Value::Float(z)])
    }

    pub fn texture(tag: Tag, shape: TextureShape) -> Self {
        Value::Texture(ResourceRef::texture(tag, shape))
    }

    pub fn ty(&self) -> Type {
        match self {
            Value::Bool(_) => Type::Bool,
            Value::Int(_) => Type::Int,
            Value::Enum { type_name, .. } => Type::Enum(type_name.clone()),
            Value::Float(_) => Type::Float,
            Value::Double(_) => Type::Double,
            Value::String(_) => Type::String,
            Value::Vector(components) => Type::Vector {
                element: components
                    .first()
                    .and_then(Value::scalar_kind)
                    .unwrap_or(Scalar::Float),
                size: components.len() as u8,
            },
            Value::Matrix(columns) => {
                let (element, rows) = match columns.first() {
                    Some(Value::Vector(c)) => (
                        c.first().and_then(Value::scalar_kind).unwrap_or(Scalar::Float),
                        c.len() as u8,
                    ),
                    _ => (Scalar::Float, 0),
                };
                Type::Matrix {
                    element,
                    columns: columns.len() as u8,
                    rows,
                }
            }
            Value::Color(_) => Type::Color,
            Value::Array { element, items } => Type::array(element.clone(), items.len()),
            Value::Struct { ty, .. } => Type::Struct(ty.clone()),
            Value::Texture(r) => Type::Texture(r.shape),
            Value::LightProfile(_) => Type::LightProfile,
            Value::BsdfMeasurement(_) => Type::BsdfMeasurement,
            Value::InvalidDf(ty) => ty.clone(),
        }
    }

    fn scalar_kind(&self) -> Option<Scalar> {
        match self {
            Value::Bool(_) => Some(Scalar::Bool),
            Value::Int(_) => Some(Scalar::Int),
            Value::Float(_) => Some(Scalar::Float),
            Value::Double(_) => Some(Scalar::Double),
            _ => None,
        }
    }

    /// The resource this value references, with its kind.
    pub fn as_resource(&self) -> Option<(ResourceKind, ResourceRef)> {
        match self {
            Value::Texture(r) => Some((ResourceKind::Texture, *r)),
            Value::LightProfile(r) => Some((ResourceKind::LightProfile, *r)),
            Value::BsdfMeasurement(r) => Some((ResourceKind::BsdfMeasurement, *r)),
            _ => None,
        }
    }

    /// Sub-value of a compound by position (components, columns, items, fields).
    pub fn element(&self, index: usize) -> Option<&Value> {
        match self {
            Value::Vector(v) | Value::Matrix(v) => v.get(index),
            Value::Array { items, .. } => items.get(index),
            Value::Struct { fields, .. } => fields.get(index),
            _ => None,
        }
    }

    /// Struct member by name.
    pub fn field(&self, name: &str) -> Option<&Value> {
        match self {
            Value::Struct { ty, fields } => ty.field_index(name).and_then(|i| fields.get(i)),
            _ => None,
        }
    }

    /// Visit every resource tag referenced by this value.
    pub fn collect_tags(&self, out: &mut impl Extend<Tag>) {
        match self {
            Value::Texture(r) | Value::LightProfile(r) | Value::BsdfMeasurement(r) => {
                if r.tag.is_valid() {
                    out.extend([r.tag]);
                }
            }
            Value::Vector(v) | Value::Matrix(v) => v.iter().for_each(|e| e.collect_tags(out)),
            Value::Array { items, .. } => items.iter().for_each(|e| e.collect_tags(out)),
            Value::Struct { fields, .. } => fields.iter().for_each(|e| e.collect_tags(out)),
            _ => {}
        }
    }
}

/// Ordered list of named values (material arguments, parameter defaults).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ValueList {
    entries: Vec<(String, Value)>,
}

impl ValueList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: impl Into<String>, value: Value) {
        self.entries.push((name.into(), value));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.entries.get(index).map(|(_, v)| v)
    }

    pub fn name(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(|(n, _)| n.as_str())
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|(n, _)| n == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }
}

impl<S: Into<String>> FromIterator<(S, Value)> for ValueList {
    fn from_iter<I: IntoIterator<Item = (S, Value)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|(n, v)| (n.into(), v)).collect(),
        }
    }
}
