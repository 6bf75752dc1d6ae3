//! Data handed to native entry points.
//!
//! The environment state and the BSDF payloads are `repr(C)`: generated code
//! reads them field by field. [`ShadingStateMaterial`] borrows its arrays as
//! slices and is handed to native code as a Rust value, so its layout is not
//! part of any ABI.

use std::fmt;

pub type Float3 = [f32; 3];
pub type Float4 = [f32; 4];
pub type Spectrum = [f32; 3];

/// Shading state of one surface point.
#[derive(Debug, Default)]
pub struct ShadingStateMaterial<'a> {
    pub normal: Float3,
    pub geom_normal: Float3,
    pub position: Float3,
    pub animation_time: f32,
    pub text_coords: &'a [Float3],
    pub tangent_u: &'a [Float3],
    pub tangent_v: &'a [Float3],
    /// Scratch space for texture results computed by the init function.
    pub text_results: &'a mut [Float4],
    pub ro_data_segment: &'a [u8],
    pub world_to_object: [Float4; 4],
    pub object_to_world: [Float4; 4],
    pub object_id: i32,
}

/// Shading state of an environment lookup.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ShadingStateEnvironment {
    pub direction: Float3,
}

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BsdfSampleData {
    pub ior1: Spectrum,
    pub ior2: Spectrum,
    pub k1: Float3,
    pub k2: Float3,
    pub xi: Float3,
    pub pdf: f32,
    pub bsdf_over_pdf: Spectrum,
    pub event_type: u32,
}

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BsdfEvaluateData {
    pub ior1: Spectrum,
    pub ior2: Spectrum,
    pub k1: Float3,
    pub k2: Float3,
    pub bsdf: Spectrum,
    pub pdf: f32,
}

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BsdfPdfData {
    pub ior1: Spectrum,
    pub ior2: Spectrum,
    pub k1: Float3,
    pub k2: Float3,
    pub pdf: f32,
}

/// Part of the shading state generated code may read.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u32)]
pub enum StateField {
    Position = 0x1,
    Normal = 0x2,
    GeometryNormal = 0x4,
    Motion = 0x8,
    TextureCoordinate = 0x10,
    TextureTangents = 0x20,
    TangentSpace = 0x40,
    GeometryTangents = 0x80,
    Direction = 0x100,
    AnimationTime = 0x200,
    RoundedCornerNormal = 0x400,
    Transforms = 0x800,
    ObjectId = 0x1000,
}

impl StateField {
    pub const ALL: [StateField; 13] = [
        StateField::Position,
        StateField::Normal,
        StateField::GeometryNormal,
        StateField::Motion,
        StateField::TextureCoordinate,
        StateField::TextureTangents,
        StateField::TangentSpace,
        StateField::GeometryTangents,
        StateField::Direction,
        StateField::AnimationTime,
        StateField::RoundedCornerNormal,
        StateField::Transforms,
        StateField::ObjectId,
    ];

    pub fn bit(self) -> u32 {
        self as u32
    }

    pub fn name(self) -> &'static str {
        match self {
            StateField::Position => "position",
            StateField::Normal => "normal",
            StateField::GeometryNormal => "geometry_normal",
            StateField::Motion => "motion",
            StateField::TextureCoordinate => "texture_coordinate",
            StateField::TextureTangents => "texture_tangents",
            StateField::TangentSpace => "tangent_space",
            StateField::GeometryTangents => "geometry_tangents",
            StateField::Direction => "direction",
            StateField::AnimationTime => "animation_time",
            StateField::RoundedCornerNormal => "rounded_corner_normal",
            StateField::Transforms => "transforms",
            StateField::ObjectId => "object_id",
        }
    }
}

/// Set of [`StateField`]s read by generated code.
///
/// Defaults to everything: without information from the code generator the
/// renderer has to compute the full state.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct StateUsage(u32);

impl Default for StateUsage {
    fn default() -> Self {
        Self::ALL
    }
}

impl StateUsage {
    pub const ALL: StateUsage = StateUsage(!0);
    pub const NONE: StateUsage = StateUsage(0);

    pub fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    pub fn bits(self) -> u32 {
        self.0
    }

    pub fn reads(self, field: StateField) -> bool {
        self.0 & field.bit() != 0
    }

    pub fn with(self, field: StateField) -> Self {
        Self(self.0 | field.bit())
    }
}

impl FromIterator<StateField> for StateUsage {
    fn from_iter<I: IntoIterator<Item = StateField>>(iter: I) -> Self {
        iter.into_iter().fold(StateUsage::NONE, StateUsage::with)
    }
}

impl fmt::Debug for StateUsage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StateUsage({:#x})", self.0)
    }
}

impl fmt::Display for StateUsage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if *self == StateUsage::ALL {
            return f.write_str("all");
        }
        write!(f, "{:#x}", self.0)?;
        let names: Vec<&str> = StateField::ALL
            .iter()
            .filter(|field| self.reads(**field))
            .map(|field| field.name())
            .collect();
        if !names.is_empty() {
            write!(f, " ({})", names.join(", "))?;
        }
        Ok(())
    }
}
