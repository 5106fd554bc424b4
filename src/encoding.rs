//! Hex and integer parsing for user-supplied fields.
//!
//! Byte fields may carry a `0x`/`0X` prefix or none at all. Lengths are checked
//! in hex characters after the prefix is removed.

use crate::error::{Error, Result};

/// Removes a leading `0x` or `0X`, if any.
#[inline]
pub fn strip_hex_prefix(input: &str) -> &str {
    input
        .strip_prefix("0x")
        .or_else(|| input.strip_prefix("0X"))
        .unwrap_or(input)
}

/// Parses exactly `N` bytes of hex.
pub fn parse_fixed<const N: usize>(input: &str, field: &'static str) -> Result<[u8; N]> {
    let digits = strip_hex_prefix(input.trim());
    if digits.len() % 2 != 0 {
        return Err(Error::OddLength { field });
    }
    if digits.len() != N * 2 {
        return Err(Error::InvalidLength {
            field,
            expected: N,
            actual: digits.len(),
        });
    }

    let mut out = [0u8; N];
    hex::decode_to_slice(digits, &mut out).map_err(|_| Error::InvalidHex { field })?;
    Ok(out)
}

/// Decodes a variable-length hex string (prefix optional).
pub fn decode_hex(input: &str, field: &'static str) -> Result<Vec<u8>> {
    let digits = strip_hex_prefix(input.trim());
    if digits.len() % 2 != 0 {
        return Err(Error::OddLength { field });
    }
    hex::decode(digits).map_err(|_| Error::InvalidHex { field })
}

/// Parses an unsigned 64-bit integer given in decimal or `0x` hex.
pub fn parse_u64(input: &str, field: &'static str) -> Result<u64> {
    let trimmed = input.trim();
    let invalid = || Error::InvalidInteger {
        field,
        value: input.to_string(),
    };

    let digits = strip_hex_prefix(trimmed);
    if digits.len() != trimmed.len() {
        if digits.is_empty() {
            return Err(invalid());
        }
        u64::from_str_radix(digits, 16).map_err(|_| invalid())
    } else {
        trimmed.parse::<u64>().map_err(|_| invalid())
    }
}

/// Parses an optional integer, falling back to `default` when absent or blank.
pub fn parse_u64_or(input: Option<&str>, default: u64, field: &'static str) -> Result<u64> {
    match input.map(str::trim) {
        None | Some("") => Ok(default),
        Some(s) => parse_u64(s, field),
    }
}
