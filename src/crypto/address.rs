//! 20-byte contract address representation.

use std::fmt;
use std::str::FromStr;

use crate::encoding::parse_fixed;
use crate::error::Error;

use super::keccak256;

/// A contract address (20 bytes).
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Address([u8; 20]);

impl Address {
    /// The all-zero address.
    pub const ZERO: Self = Self([0u8; 20]);

    /// Creates an address from raw bytes.
    #[inline]
    pub const fn from_bytes(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// Returns the address as raw bytes.
    #[inline]
    pub const fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// Parses a 40-digit hex address, `0x` prefix optional.
    pub fn parse(input: &str, field: &'static str) -> Result<Self, Error> {
        parse_fixed::<20>(input, field).map(Self)
    }

    /// Returns the address as a lowercase hex string (without 0x prefix).
    #[inline]
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Returns the address with 0x prefix.
    pub fn to_hex_prefixed(&self) -> String {
        format!("0x{}", self.to_hex())
    }

    /// Returns the address with checksum encoding (EIP-55).
    pub fn to_checksum(&self) -> String {
        let hex_addr = self.to_hex();
        let hash = keccak256(hex_addr.as_bytes());

        let mut checksum = String::with_capacity(42);
        checksum.push_str("0x");

        for (i, c) in hex_addr.chars().enumerate() {
            let hash_byte = hash[i / 2];
            let hash_nibble = if i % 2 == 0 {
                hash_byte >> 4
            } else {
                hash_byte & 0x0f
            };

            if hash_nibble >= 8 {
                checksum.push(c.to_ascii_uppercase());
            } else {
                checksum.push(c);
            }
        }

        checksum
    }

    /// Splits the address into big-endian `(hi8, mid8, lo4)` integers
    /// covering bytes `0..8`, `8..16` and `16..20`.
    pub fn to_packed(&self) -> (u64, u64, u32) {
        let b = &self.0;
        let hi8 = u64::from_be_bytes([b[0], b[1], b[2], b[3], b[4], b[5], b[6], b[7]]);
        let mid8 = u64::from_be_bytes([b[8], b[9], b[10], b[11], b[12], b[13], b[14], b[15]]);
        let lo4 = u32::from_be_bytes([b[16], b[17], b[18], b[19]]);
        (hi8, mid8, lo4)
    }

    /// Inverse of [`Address::to_packed`].
    pub fn from_packed(hi8: u64, mid8: u64, lo4: u32) -> Self {
        let mut bytes = [0u8; 20];
        bytes[0..8].copy_from_slice(&hi8.to_be_bytes());
        bytes[8..16].copy_from_slice(&mid8.to_be_bytes());
        bytes[16..20].copy_from_slice(&lo4.to_be_bytes());
        Self(bytes)
    }

    /// Number of leading zero bits in the 160-bit value.
    pub fn leading_zero_bits(&self) -> u8 {
        let mut count = 0u8;
        for &byte in &self.0 {
            if byte != 0 {
                return count + byte.leading_zeros() as u8;
            }
            count += 8;
        }
        count
    }

    /// Number of trailing zero bits in the 160-bit value.
    pub fn trailing_zero_bits(&self) -> u8 {
        let mut count = 0u8;
        for &byte in self.0.iter().rev() {
            if byte != 0 {
                return count + byte.trailing_zeros() as u8;
            }
            count += 8;
        }
        count
    }
}

impl From<[u8; 20]> for Address {
    fn from(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }
}

impl FromStr for Address {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s, "address")
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self.to_checksum())
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_checksum())
    }
}
