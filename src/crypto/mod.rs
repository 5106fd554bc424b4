//! Hashing and CREATE2 address derivation.
//!
//! This module provides:
//! - Keccak-256 with the pre-standard Keccak padding used by the EVM (not SHA3-256)
//! - 20-byte addresses and 32-byte salts
//! - CREATE2 address derivation, including a per-worker hashing context

mod address;
pub mod create2;
mod salt;

pub use address::Address;
pub use create2::{create2_address, Create2Hasher};
pub use salt::Salt;

use tiny_keccak::{Hasher, Keccak};

use crate::encoding::decode_hex;
use crate::error::Result;

/// Keccak-256 of arbitrary bytes (output 32 bytes).
pub fn keccak256(input: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak::v256();
    hasher.update(input);
    let mut out = [0u8; 32];
    hasher.finalize(&mut out);
    out
}

/// Hashes user text: a `0x`-prefixed string is decoded as hex bytes, anything
/// else is hashed as its UTF-8 bytes.
pub fn keccak256_input(input: &str) -> Result<[u8; 32]> {
    if input.starts_with("0x") || input.starts_with("0X") {
        Ok(keccak256(&decode_hex(input, "input")?))
    } else {
        Ok(keccak256(input.as_bytes()))
    }
}
