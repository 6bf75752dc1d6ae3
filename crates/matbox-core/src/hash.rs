//! 128-bit content hashes.

use std::fmt;

use serde::{Deserialize, Serialize};

/// 128-bit hash stored as four 32-bit words.
///
/// The all-zero hash is returned for unknown slots and never produced by
/// the compiler for real content.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Hash128(pub [u32; 4]);

impl Hash128 {
    pub const ZERO: Self = Self([0; 4]);

    /// Pack a 16-byte digest, most significant byte first in each word.
    pub fn from_digest(bytes: [u8; 16]) -> Self {
        let word = |i: usize| {
            u32::from_be_bytes([bytes[i], bytes[i + 1], bytes[i + 2], bytes[i + 3]])
        };
        Self([word(0), word(4), word(8), word(12)])
    }

    /// Inverse of [`from_digest`](Self::from_digest).
    pub fn to_digest(self) -> [u8; 16] {
        let mut out = [0u8; 16];
        for (i, w) in self.0.iter().enumerate() {
            out[i * 4..i * 4 + 4].copy_from_slice(&w.to_be_bytes());
        }
        out
    }

    pub fn is_zero(self) -> bool {
        self == Self::ZERO
    }

    pub fn words(self) -> [u32; 4] {
        self.0
    }
}

impl From<u128> for Hash128 {
    fn from(v: u128) -> Self {
        Self::from_digest(v.to_be_bytes())
    }
}

impl fmt::Display for Hash128 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d] = self.0;
        write!(f, "{a:08x} {b:08x} {c:08x} {d:08x}")
    }
}
