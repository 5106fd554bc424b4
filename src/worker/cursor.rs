//! Shared scan state.

use std::ops::Range;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

/// The only state shared between workers: the next unclaimed salt and the
/// number of matches found so far, plus counters for reporting.
#[derive(Debug)]
pub struct ScanCursor {
    start: u64,
    end: u64,
    next: AtomicU64,
    results_found: AtomicU64,
    salts_scanned: AtomicU64,
    finished: AtomicBool,
}

impl ScanCursor {
    /// Creates a cursor over `[start, end)`.
    pub fn new(start: u64, end: u64) -> Self {
        Self {
            start,
            end: end.max(start),
            next: AtomicU64::new(start),
            results_found: AtomicU64::new(0),
            salts_scanned: AtomicU64::new(0),
            finished: AtomicBool::new(false),
        }
    }

    /// Claims the next chunk of at most `chunk_size` salts.
    ///
    /// Claims are handed out in ascending order and the cursor never moves
    /// past `end`, so it cannot wrap near `u64::MAX`.
    pub fn claim(&self, chunk_size: u64) -> Option<Range<u64>> {
        let end = self.end;
        let advance = |next: u64| next.saturating_add(chunk_size).min(end);
        self.next
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |next| {
                (next < end).then(|| advance(next))
            })
            .ok()
            .map(|claimed| claimed..advance(claimed))
    }

    /// Counts a match and returns the count before it.
    #[inline]
    pub fn record_match(&self) -> u64 {
        self.results_found.fetch_add(1, Ordering::AcqRel)
    }

    /// Matches recorded by all workers so far.
    pub fn results_found(&self) -> u64 {
        self.results_found.load(Ordering::Acquire)
    }

    /// Adds `count` hashed salts to the scanned total.
    pub fn add_scanned(&self, count: u64) {
        self.salts_scanned.fetch_add(count, Ordering::Relaxed);
    }

    /// Salts hashed by all workers so far.
    pub fn salts_scanned(&self) -> u64 {
        self.salts_scanned.load(Ordering::Relaxed)
    }

    /// Stops further claims.
    pub fn halt(&self) {
        self.next.store(self.end, Ordering::Release);
    }

    /// Marks the scan as complete; progress then reads 100%.
    pub fn mark_finished(&self) {
        self.finished.store(true, Ordering::Release);
    }

    /// Returns true once the pool has joined every worker.
    pub fn is_finished(&self) -> bool {
        self.finished.load(Ordering::Acquire)
    }

    /// Share of the range handed out to workers, 0..=100. Reads 100 once the
    /// scan has finished, even if it stopped early on the quota.
    pub fn percent(&self) -> u8 {
        let total = self.end - self.start;
        if total == 0 || self.is_finished() {
            return 100;
        }
        let claimed = self.next.load(Ordering::Relaxed).saturating_sub(self.start);
        let pct = (claimed as u128 * 100) / total as u128;
        pct.min(100) as u8
    }
}

/// Read-only view of a running scan, safe to poll from another thread.
#[derive(Debug, Clone)]
pub struct ScanProgress {
    cursor: Arc<ScanCursor>,
}

impl ScanProgress {
    pub(crate) fn new(cursor: Arc<ScanCursor>) -> Self {
        Self { cursor }
    }

    /// See [`ScanCursor::percent`].
    pub fn percent(&self) -> u8 {
        self.cursor.percent()
    }

    /// Salts hashed so far.
    pub fn salts_scanned(&self) -> u64 {
        self.cursor.salts_scanned()
    }

    /// Matches found so far, including ones past the final cutoff.
    pub fn results_found(&self) -> u64 {
        self.cursor.results_found()
    }

    /// Returns true once the scan has completed.
    pub fn is_finished(&self) -> bool {
        self.cursor.is_finished()
    }
}
