//! Mask/value pattern matching.

use std::fmt;

use crate::crypto::Address;
use crate::error::{Error, Result};

use super::PriorityOrder;

/// A compiled mask/value pattern.
///
/// An address matches when `address & mask == value & mask`. Bits of `value`
/// outside the mask are cleared on construction and never affect matching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    mask: [u8; 20],
    value: [u8; 20],
    order: PriorityOrder,
}

impl Pattern {
    /// Creates a pattern from a mask and the bits it selects.
    pub fn new(mask: [u8; 20], value: [u8; 20]) -> Self {
        let value = std::array::from_fn(|i| value[i] & mask[i]);
        Self {
            order: PriorityOrder::from_mask(&mask),
            mask,
            value,
        }
    }

    /// A pattern that matches every address.
    pub fn any() -> Self {
        Self::new([0u8; 20], [0u8; 20])
    }

    /// Builds a pattern from big-endian `(hi8, mid8, lo4)` mask/value components.
    pub fn from_packed(mask: (u64, u64, u32), value: (u64, u64, u32)) -> Self {
        let mask = Address::from_packed(mask.0, mask.1, mask.2);
        let value = Address::from_packed(value.0, value.1, value.2);
        Self::new(*mask.as_bytes(), *value.as_bytes())
    }

    /// Matches addresses whose hex form starts with `prefix`.
    pub fn prefix(prefix: &str) -> Result<Self> {
        let nibbles = parse_nibbles(prefix, "prefix")?;
        let mut builder = NibbleBuilder::default();
        builder.place(0, &nibbles);
        Ok(builder.build())
    }

    /// Matches addresses whose hex form ends with `suffix`.
    pub fn suffix(suffix: &str) -> Result<Self> {
        let nibbles = parse_nibbles(suffix, "suffix")?;
        let mut builder = NibbleBuilder::default();
        builder.place(40 - nibbles.len(), &nibbles);
        Ok(builder.build())
    }

    /// Matches addresses that start with `prefix` and end with `suffix`.
    pub fn prefix_and_suffix(prefix: &str, suffix: &str) -> Result<Self> {
        let head = parse_nibbles(prefix, "prefix")?;
        let tail = parse_nibbles(suffix, "suffix")?;
        if head.len() + tail.len() > 40 {
            return Err(Error::InvalidPattern(
                "combined prefix + suffix cannot be longer than 40 characters".into(),
            ));
        }

        let mut builder = NibbleBuilder::default();
        builder.place(0, &head);
        builder.place(40 - tail.len(), &tail);
        Ok(builder.build())
    }

    /// Same mask and value, compared in plain index order.
    pub fn sequential(mut self) -> Self {
        self.order = PriorityOrder::sequential();
        self
    }

    pub fn mask(&self) -> &[u8; 20] {
        &self.mask
    }

    /// The target bits, already restricted to the mask.
    pub fn value(&self) -> &[u8; 20] {
        &self.value
    }

    pub fn order(&self) -> &PriorityOrder {
        &self.order
    }

    /// True when the mask is empty and every address matches.
    pub fn is_unfiltered(&self) -> bool {
        self.mask.iter().all(|&m| m == 0)
    }

    /// Tests an address, most-constrained bytes first.
    #[inline]
    pub fn matches(&self, address: &Address) -> bool {
        let addr = address.as_bytes();
        for &i in self.order.active() {
            let i = i as usize;
            if addr[i] & self.mask[i] != self.value[i] {
                return false;
            }
        }
        true
    }

    /// Number of constrained bits.
    pub fn mask_bits(&self) -> u32 {
        self.mask.iter().map(|m| m.count_ones()).sum()
    }

    /// Expected attempts per match: `2^mask_bits`, saturating.
    pub fn estimated_difficulty(&self) -> u64 {
        let bits = self.mask_bits();
        if bits >= 64 {
            u64::MAX
        } else {
            1u64 << bits
        }
    }

    /// Returns a human-readable difficulty estimate.
    pub fn difficulty_description(&self) -> String {
        let diff = self.estimated_difficulty();
        match diff {
            0..=1_000 => "Very Easy (< 1 second)".into(),
            1_001..=100_000 => "Easy (seconds)".into(),
            100_001..=10_000_000 => "Medium (minutes)".into(),
            10_000_001..=1_000_000_000 => "Hard (hours)".into(),
            _ => "Very Hard (days or more)".into(),
        }
    }
}

impl Default for Pattern {
    fn default() -> Self {
        Self::any()
    }
}

/// Renders the 40-nibble template: fully constrained nibbles show their hex
/// digit, free nibbles `.` and partially constrained ones `?`.
impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const DIGITS: &[u8; 16] = b"0123456789abcdef";
        let mut out = String::with_capacity(42);
        out.push_str("0x");
        for i in 0..20 {
            for shift in [4u8, 0] {
                let mask = (self.mask[i] >> shift) & 0x0f;
                let value = (self.value[i] >> shift) & 0x0f;
                out.push(match mask {
                    0x0 => '.',
                    0xf => DIGITS[value as usize] as char,
                    _ => '?',
                });
            }
        }
        f.write_str(&out)
    }
}

fn parse_nibbles(hex: &str, field: &str) -> Result<Vec<u8>> {
    let hex = crate::encoding::strip_hex_prefix(hex.trim());
    if hex.is_empty() {
        return Err(Error::InvalidPattern(format!("{field} cannot be empty")));
    }
    if hex.len() > 40 {
        return Err(Error::InvalidPattern(format!(
            "{field} cannot be longer than 40 characters (full address)"
        )));
    }

    hex.chars()
        .map(|c| {
            c.to_digit(16).map(|d| d as u8).ok_or_else(|| {
                Error::InvalidPattern(format!(
                    "{field} must contain only hex characters (0-9, a-f)"
                ))
            })
        })
        .collect()
}

#[derive(Default)]
struct NibbleBuilder {
    mask: [u8; 20],
    value: [u8; 20],
}

impl NibbleBuilder {
    fn place(&mut self, start: usize, nibbles: &[u8]) {
        for (offset, &nibble) in nibbles.iter().enumerate() {
            let pos = start + offset;
            let shift = if pos % 2 == 0 { 4 } else { 0 };
            self.mask[pos / 2] |= 0x0f << shift;
            self.value[pos / 2] |= nibble << shift;
        }
    }

    fn build(self) -> Pattern {
        Pattern::new(self.mask, self.value)
    }
}
