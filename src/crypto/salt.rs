//! 256-bit CREATE2 salt.

use std::fmt;
use std::str::FromStr;

use crate::encoding::{parse_fixed, parse_u64};
use crate::error::Error;

/// A CREATE2 salt (32 bytes, big-endian).
///
/// Mined salts come from `[0, 2^64)` and occupy bytes `24..32`; the upper 24
/// bytes stay zero.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Salt([u8; 32]);

impl Salt {
    pub const ZERO: Self = Self([0u8; 32]);

    #[inline]
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Embeds a 64-bit value as a 256-bit big-endian integer.
    #[inline]
    pub fn from_u64(value: u64) -> Self {
        let mut bytes = [0u8; 32];
        bytes[24..32].copy_from_slice(&value.to_be_bytes());
        Self(bytes)
    }

    /// Builds `(hi << 64) | lo` where `hi` covers bits 64..128.
    pub fn from_components(hi: u64, lo: u64) -> Self {
        let mut bytes = [0u8; 32];
        bytes[16..24].copy_from_slice(&hi.to_be_bytes());
        bytes[24..32].copy_from_slice(&lo.to_be_bytes());
        Self(bytes)
    }

    #[inline]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Bits 64..128 and 0..64 of the salt. Bits above 128 are not represented.
    pub fn components(&self) -> (u64, u64) {
        let mut hi = [0u8; 8];
        let mut lo = [0u8; 8];
        hi.copy_from_slice(&self.0[16..24]);
        lo.copy_from_slice(&self.0[24..32]);
        (u64::from_be_bytes(hi), u64::from_be_bytes(lo))
    }

    /// Returns the low 64 bits if the salt fits in a `u64`.
    pub fn as_u64(&self) -> Option<u64> {
        if self.0[..24].iter().any(|&b| b != 0) {
            return None;
        }
        Some(self.components().1)
    }

    /// 64 lowercase hex digits with 0x prefix.
    pub fn to_hex_prefixed(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }

    /// Parses either a `0x`-prefixed 32-byte hex string or a plain decimal
    /// integer, which becomes the low 64 bits.
    pub fn parse(input: &str, field: &'static str) -> Result<Self, Error> {
        let trimmed = input.trim();
        if trimmed.starts_with("0x") || trimmed.starts_with("0X") {
            parse_fixed::<32>(trimmed, field).map(Self)
        } else {
            parse_u64(trimmed, field).map(Self::from_u64)
        }
    }
}

impl From<u64> for Salt {
    fn from(value: u64) -> Self {
        Self::from_u64(value)
    }
}

impl FromStr for Salt {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s, "salt")
    }
}

impl fmt::Debug for Salt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Salt({})", self.to_hex_prefixed())
    }
}

impl fmt::Display for Salt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex_prefixed())
    }
}
