//! Canonical material slots.

use std::fmt;

/// One independently hashed output channel of a material.
///
/// Discriminants are the persisted slot indices and never change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u32)]
pub enum Slot {
    ThinWalled = 0,
    SurfaceScattering,
    SurfaceEmission,
    SurfaceEmissionIntensity,
    BackfaceScattering,
    BackfaceEmission,
    BackfaceEmissionIntensity,
    Ior,
    VolumeScattering,
    VolumeAbsorptionCoefficient,
    VolumeScatteringCoefficient,
    GeometryDisplacement,
    GeometryCutoutOpacity,
    GeometryNormal,
}

impl Slot {
    pub const COUNT: usize = 14;

    pub const ALL: [Slot; Self::COUNT] = [
        Slot::ThinWalled,
        Slot::SurfaceScattering,
        Slot::SurfaceEmission,
        Slot::SurfaceEmissionIntensity,
        Slot::BackfaceScattering,
        Slot::BackfaceEmission,
        Slot::BackfaceEmissionIntensity,
        Slot::Ior,
        Slot::VolumeScattering,
        Slot::VolumeAbsorptionCoefficient,
        Slot::VolumeScatteringCoefficient,
        Slot::GeometryDisplacement,
        Slot::GeometryCutoutOpacity,
        Slot::GeometryNormal,
    ];

    pub fn from_index(index: u32) -> Option<Slot> {
        Self::ALL.get(index as usize).copied()
    }

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Field path of the slot inside the `material` struct.
    pub fn path(self) -> &'static str {
        match self {
            Slot::ThinWalled => "thin_walled",
            Slot::SurfaceScattering => "surface.scattering",
            Slot::SurfaceEmission => "surface.emission.emission",
            Slot::SurfaceEmissionIntensity => "surface.emission.intensity",
            Slot::BackfaceScattering => "backface.scattering",
            Slot::BackfaceEmission => "backface.emission.emission",
            Slot::BackfaceEmissionIntensity => "backface.emission.intensity",
            Slot::Ior => "ior",
            Slot::VolumeScattering => "volume.scattering",
            Slot::VolumeAbsorptionCoefficient => "volume.absorption_coefficient",
            Slot::VolumeScatteringCoefficient => "volume.scattering_coefficient",
            Slot::GeometryDisplacement => "geometry.displacement",
            Slot::GeometryCutoutOpacity => "geometry.cutout_opacity",
            Slot::GeometryNormal => "geometry.normal",
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}
