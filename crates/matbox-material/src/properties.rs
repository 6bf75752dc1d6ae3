//! Derived material predicates.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Bit set of properties computed once when a material is compiled.
///
/// Unknown bits are preserved so persisted values round-trip unchanged.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MaterialProperties(u32);

impl MaterialProperties {
    pub const DEPENDS_ON_TRANSFORM: u32 = 0x1;
    pub const DEPENDS_ON_OBJECT_ID: u32 = 0x2;
    pub const DEPENDS_ON_GLOBAL_DISTRIBUTION: u32 = 0x4;

    pub const NONE: Self = Self(0);

    pub fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    pub fn bits(self) -> u32 {
        self.0
    }

    /// Reads `state::transform*` functions.
    pub fn depends_on_transform(self) -> bool {
        self.0 & Self::DEPENDS_ON_TRANSFORM != 0
    }

    /// Reads `state::object_id()`.
    pub fn depends_on_object_id(self) -> bool {
        self.0 & Self::DEPENDS_ON_OBJECT_ID != 0
    }

    /// Uses a light profile with global distribution enabled.
    pub fn depends_on_global_distribution(self) -> bool {
        self.0 & Self::DEPENDS_ON_GLOBAL_DISTRIBUTION != 0
    }

    pub fn with_transform(self) -> Self {
        Self(self.0 | Self::DEPENDS_ON_TRANSFORM)
    }

    pub fn with_object_id(self) -> Self {
        Self(self.0 | Self::DEPENDS_ON_OBJECT_ID)
    }

    pub fn with_global_distribution(self) -> Self {
        Self(self.0 | Self::DEPENDS_ON_GLOBAL_DISTRIBUTION)
    }
}

impl fmt::Display for MaterialProperties {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names = [
            (self.depends_on_transform(), "transform"),
            (self.depends_on_object_id(), "object_id"),
            (self.depends_on_global_distribution(), "global_distribution"),
        ];
        write!(f, "{:#x}", self.0)?;
        let mut sep = " (";
        for (set, name) in names {
            if set {
                write!(f, "{sep}{name}")?;
                sep = ", ";
            }
        }
        if sep == ", " {
            f.write_str(")")?;
        }
        Ok(())
    }
}
