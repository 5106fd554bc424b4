//! Pull-based batch output over a finished [`ResultSet`].

use crate::error::{Error, Result};

use super::{Candidate, ResultSet};

/// Default number of rows per batch.
pub const DEFAULT_BATCH_SIZE: usize = 2048;

/// One output row: raw integer components plus hex renderings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputRow {
    /// Bits 64..128 of the salt.
    pub salt_hi: u64,
    /// Bits 0..64 of the salt.
    pub salt_lo: u64,
    /// 0x-prefixed, 64 hex digits.
    pub salt: String,
    /// Address bytes 0..8, big-endian.
    pub addr_hi8: u64,
    /// Address bytes 8..16, big-endian.
    pub addr_mid8: u64,
    /// Address bytes 16..20, big-endian.
    pub addr_lo4: u32,
    /// 0x-prefixed, 40 lowercase hex digits.
    pub address: String,
    /// Leading zero bits of the address.
    pub lz_bits: u8,
    /// Trailing zero bits of the address.
    pub tz_bits: u8,
}

impl From<&Candidate> for OutputRow {
    fn from(candidate: &Candidate) -> Self {
        let salt = candidate.salt_word();
        let (salt_hi, salt_lo) = salt.components();
        let (addr_hi8, addr_mid8, addr_lo4) = candidate.address.to_packed();

        Self {
            salt_hi,
            salt_lo,
            salt: salt.to_hex_prefixed(),
            addr_hi8,
            addr_mid8,
            addr_lo4,
            address: candidate.address.to_hex_prefixed(),
            lz_bits: candidate.address.leading_zero_bits(),
            tz_bits: candidate.address.trailing_zero_bits(),
        }
    }
}

/// Serves a result set in fixed-size batches.
///
/// Each call to [`ResultStream::next_batch`] resumes where the previous one
/// stopped; once everything has been emitted it returns an empty batch.
#[derive(Debug)]
pub struct ResultStream {
    results: ResultSet,
    position: usize,
    batch_size: usize,
}

impl ResultStream {
    /// Creates a stream over `results`. A zero batch size is rejected.
    pub fn new(results: ResultSet, batch_size: usize) -> Result<Self> {
        if batch_size == 0 {
            return Err(Error::ZeroBatchSize);
        }
        Ok(Self {
            results,
            position: 0,
            batch_size,
        })
    }

    /// Returns up to `batch_size` rows, or an empty batch once exhausted.
    pub fn next_batch(&mut self) -> Vec<OutputRow> {
        let remaining = &self.results.as_slice()[self.position.min(self.results.len())..];
        let take = remaining.len().min(self.batch_size);
        let batch: Vec<OutputRow> = remaining[..take].iter().map(OutputRow::from).collect();
        self.position += take;
        batch
    }

    /// Rows emitted so far.
    pub fn emitted(&self) -> usize {
        self.position
    }

    /// Rows not yet emitted.
    pub fn remaining(&self) -> usize {
        self.results.len() - self.position
    }

    /// Returns true when every row has been emitted.
    pub fn is_exhausted(&self) -> bool {
        self.position >= self.results.len()
    }

    /// The underlying result set.
    pub fn results(&self) -> &ResultSet {
        &self.results
    }
}

impl Iterator for ResultStream {
    type Item = Vec<OutputRow>;

    fn next(&mut self) -> Option<Self::Item> {
        let batch = self.next_batch();
        if batch.is_empty() {
            None
        } else {
            Some(batch)
        }
    }
}
