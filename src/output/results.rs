//! Merged, salt-ordered scan results.

use std::time::Duration;

use crate::crypto::{Address, Salt};

/// A salt whose derived address passed the pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    pub salt: u64,
    pub address: Address,
}

impl Candidate {
    pub fn new(salt: u64, address: Address) -> Self {
        Self { salt, address }
    }

    /// The full 256-bit salt.
    pub fn salt_word(&self) -> Salt {
        Salt::from_u64(self.salt)
    }
}

/// The final result of one scan: at most `max_results` candidates in
/// ascending salt order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultSet {
    candidates: Vec<Candidate>,
    salts_scanned: u64,
    elapsed: Duration,
}

impl ResultSet {
    /// Concatenates per-worker results, sorts by salt and keeps the first
    /// `max_results`.
    ///
    /// Salts are unique within a scan, so the outcome does not depend on how
    /// the range was split between workers.
    pub fn merge(partials: Vec<Vec<Candidate>>, max_results: u64) -> Self {
        let total = partials.iter().map(Vec::len).sum();
        let mut candidates = Vec::with_capacity(total);
        for partial in partials {
            candidates.extend(partial);
        }

        candidates.sort_unstable_by_key(|c| c.salt);
        debug_assert!(
            candidates.windows(2).all(|w| w[0].salt < w[1].salt),
            "duplicate salt in merged results"
        );

        let limit = usize::try_from(max_results).unwrap_or(usize::MAX);
        candidates.truncate(limit);

        Self {
            candidates,
            salts_scanned: 0,
            elapsed: Duration::ZERO,
        }
    }

    pub(crate) fn with_stats(mut self, salts_scanned: u64, elapsed: Duration) -> Self {
        self.salts_scanned = salts_scanned;
        self.elapsed = elapsed;
        self
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn as_slice(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Candidate> {
        self.candidates.iter()
    }

    pub fn salts(&self) -> impl Iterator<Item = u64> + '_ {
        self.candidates.iter().map(|c| c.salt)
    }

    /// Salts hashed during the scan, including ones that did not match.
    pub fn salts_scanned(&self) -> u64 {
        self.salts_scanned
    }

    /// Wall time of the scan.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Scan rate in salts per second.
    pub fn salts_per_second(&self) -> f64 {
        let t = self.elapsed.as_secs_f64();
        if t > 0.0 {
            self.salts_scanned as f64 / t
        } else {
            0.0
        }
    }
}

impl<'a> IntoIterator for &'a ResultSet {
    type Item = &'a Candidate;
    type IntoIter = std::slice::Iter<'a, Candidate>;

    fn into_iter(self) -> Self::IntoIter {
        self.candidates.iter()
    }
}
