//! Byte comparison order for mask matching.

use std::cmp::Reverse;

/// A permutation of the 20 address byte indices, most-constrained first.
///
/// Indices are sorted by the population count of their mask byte, highest
/// first, ties kept in index order. Bytes with an empty mask sort last and are
/// never compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriorityOrder {
    indices: [u8; 20],
    active: usize,
}

impl PriorityOrder {
    /// Derives the order from a mask.
    pub fn from_mask(mask: &[u8; 20]) -> Self {
        let mut indices: [u8; 20] = std::array::from_fn(|i| i as u8);
        // `sort_by_key` is stable, which keeps ties in ascending index order.
        indices.sort_by_key(|&i| Reverse(mask[i as usize].count_ones()));
        let active = mask.iter().filter(|&&m| m != 0).count();
        Self { indices, active }
    }

    /// Plain index order over all 20 bytes.
    pub fn sequential() -> Self {
        Self {
            indices: std::array::from_fn(|i| i as u8),
            active: 20,
        }
    }

    /// The full permutation.
    pub fn indices(&self) -> &[u8; 20] {
        &self.indices
    }

    /// The indices that need comparing.
    #[inline]
    pub fn active(&self) -> &[u8] {
        &self.indices[..self.active]
    }
}
