//! Worker pool management.

use std::panic;
use std::sync::Arc;
use std::thread;
use std::time::Instant;

use crate::error::Result;
use crate::output::{Candidate, ResultSet};
use crate::request::MiningRequest;

use super::cpu::CpuWorker;
use super::{ScanCursor, ScanProgress};

/// Salts claimed per cursor fetch.
pub const CHUNK_SIZE: u64 = 16_384;

/// Picks a worker count: never more than `available`, never more than one per
/// full chunk of work, and at least one.
pub fn worker_count(salt_count: u64, available: usize) -> usize {
    let by_work = usize::try_from(salt_count / CHUNK_SIZE).unwrap_or(usize::MAX);
    available.min(by_work).max(1)
}

/// Runs one scan over a request's salt range on a fixed set of threads.
///
/// Threads are spawned by [`WorkerPool::run`] and joined before it returns;
/// nothing outlives a single call.
pub struct WorkerPool {
    request: MiningRequest,
    num_workers: usize,
    chunk_size: u64,
    cursor: Arc<ScanCursor>,
}

impl WorkerPool {
    /// Creates a pool with exactly `num_workers` workers (at least one).
    pub fn new(request: MiningRequest, num_workers: usize) -> Self {
        let cursor = Arc::new(ScanCursor::new(request.salt_start(), request.salt_end()));
        Self {
            request,
            num_workers: num_workers.max(1),
            chunk_size: CHUNK_SIZE,
            cursor,
        }
    }

    /// Creates a pool sized by [`worker_count`] over the CPU count.
    pub fn with_default_workers(request: MiningRequest) -> Self {
        let workers = worker_count(request.effective_count(), num_cpus::get());
        Self::new(request, workers)
    }

    /// Overrides the chunk size. Only affects performance, never results.
    pub fn with_chunk_size(mut self, chunk_size: u64) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    /// Returns the number of workers.
    pub fn num_workers(&self) -> usize {
        self.num_workers
    }

    /// Returns the number of salts claimed per cursor fetch.
    pub fn chunk_size(&self) -> u64 {
        self.chunk_size
    }

    /// Returns the request being scanned.
    pub fn request(&self) -> &MiningRequest {
        &self.request
    }

    /// A handle for polling progress while [`WorkerPool::run`] blocks.
    pub fn progress(&self) -> ScanProgress {
        ScanProgress::new(Arc::clone(&self.cursor))
    }

    /// Scans the range and returns the merged result set.
    ///
    /// Blocks until the range is exhausted or the quota is met. A panic in any
    /// worker is resumed on the calling thread.
    pub fn run(self) -> Result<ResultSet> {
        self.run_with(|worker| worker.run())
    }

    /// Runs the scan with `scan` as the body of every worker.
    fn run_with<F>(self, scan: F) -> Result<ResultSet>
    where
        F: Fn(CpuWorker<'_>) -> Vec<Candidate> + Sync,
    {
        let start_time = Instant::now();
        tracing::debug!(
            workers = self.num_workers,
            chunk_size = self.chunk_size,
            salt_start = self.request.salt_start(),
            salt_end = self.request.salt_end(),
            max_results = self.request.max_results(),
            "starting scan"
        );

        let partials = if self.num_workers == 1 {
            vec![scan(CpuWorker::new(0, &self.request, &self.cursor, self.chunk_size))]
        } else {
            self.run_threads(&scan)?
        };
        self.cursor.mark_finished();

        let results = ResultSet::merge(partials, self.request.max_results())
            .with_stats(self.cursor.salts_scanned(), start_time.elapsed());

        tracing::info!(
            matches = results.len(),
            salts_scanned = results.salts_scanned(),
            elapsed_ms = results.elapsed().as_millis() as u64,
            "scan complete"
        );
        Ok(results)
    }

    /// Spawns worker threads and collects their partial results.
    fn run_threads<F>(&self, scan: &F) -> Result<Vec<Vec<Candidate>>>
    where
        F: Fn(CpuWorker<'_>) -> Vec<Candidate> + Sync,
    {
        thread::scope(|scope| {
            let mut handles = Vec::with_capacity(self.num_workers);

            for id in 0..self.num_workers {
                let worker = CpuWorker::new(id, &self.request, &self.cursor, self.chunk_size);
                let spawned = thread::Builder::new()
                    .name(format!("create2-worker-{}", id))
                    .spawn_scoped(scope, move || scan(worker));

                match spawned {
                    Ok(handle) => handles.push(handle),
                    Err(e) => {
                        // Already running workers finish their current chunk
                        // and are joined when the scope ends.
                        self.cursor.halt();
                        return Err(e.into());
                    }
                }
            }

            Ok(handles
                .into_iter()
                .map(|handle| match handle.join() {
                    Ok(partial) => partial,
                    Err(payload) => panic::resume_unwind(payload),
                })
                .collect())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::{create2_address, keccak256, Address, Salt};
    use crate::matcher::Pattern;

    fn deployer() -> Address {
        "0x4e59b44847b379578588920ca78fbf26c0b4956c".parse().unwrap()
    }

    fn request(start: u64, count: u64, max_results: u64, pattern: Pattern) -> MiningRequest {
        MiningRequest::builder(deployer(), keccak256(b"init code"))
            .salt_start(start)
            .salt_count(count)
            .max_results(max_results)
            .pattern(pattern)
            .build()
            .unwrap()
    }

    /// Every matching salt in range, computed one salt at a time.
    fn reference_matches(request: &MiningRequest) -> Vec<u64> {
        (request.salt_start()..request.salt_end())
            .filter(|&salt| {
                let address = create2_address(
                    request.deployer(),
                    &Salt::from_u64(salt),
                    request.init_code_hash(),
                );
                (0..20).all(|i| {
                    address.as_bytes()[i] & request.pattern().mask()[i]
                        == request.pattern().value()[i]
                })
            })
            .collect()
    }

    fn high_nibble_zero() -> Pattern {
        let mut mask = [0u8; 20];
        mask[0] = 0xf0;
        Pattern::new(mask, [0u8; 20])
    }

    fn run(request: MiningRequest, workers: usize, chunk_size: u64) -> ResultSet {
        WorkerPool::new(request, workers)
            .with_chunk_size(chunk_size)
            .run()
            .unwrap()
    }

    #[test]
    fn test_worker_count_policy() {
        assert_eq!(worker_count(0, 8), 1);
        assert_eq!(worker_count(100, 8), 1);
        assert_eq!(worker_count(CHUNK_SIZE * 3, 8), 3);
        assert_eq!(worker_count(CHUNK_SIZE * 100, 8), 8);
        assert_eq!(worker_count(u64::MAX, 0), 1);
    }

    #[test]
    fn test_unfiltered_returns_every_salt() {
        let request = request(1_000, 50, 100, Pattern::any());
        let results = run(request.clone(), 4, 8);

        assert_eq!(results.salts().collect::<Vec<_>>(), (1_000..1_050).collect::<Vec<_>>());
        for candidate in &results {
            let expected = create2_address(
                request.deployer(),
                &Salt::from_u64(candidate.salt),
                request.init_code_hash(),
            );
            assert_eq!(candidate.address, expected);
        }
    }

    #[test]
    fn test_deterministic_across_worker_counts() {
        let request = request(0, 20_000, 40, high_nibble_zero());
        let baseline = run(request.clone(), 1, 64);
        assert_eq!(baseline.len(), 40);

        for workers in [2, 3, 8, num_cpus::get()] {
            for chunk_size in [1, 97, CHUNK_SIZE] {
                let results = run(request.clone(), workers, chunk_size);
                assert_eq!(
                    results.as_slice(),
                    baseline.as_slice(),
                    "workers={workers} chunk_size={chunk_size}"
                );
            }
        }
    }

    #[test]
    fn test_complete_within_quota() {
        let request = request(500, 3_000, 10_000, high_nibble_zero());
        let expected = reference_matches(&request);
        assert!(!expected.is_empty());

        let results = run(request, 4, 128);
        assert_eq!(results.salts().collect::<Vec<_>>(), expected);
    }

    #[test]
    fn test_quota_keeps_smallest_salts() {
        let request = request(0, 5_000, 7, high_nibble_zero());
        let expected: Vec<u64> = reference_matches(&request).into_iter().take(7).collect();
        assert_eq!(expected.len(), 7);

        for workers in [1, 4, 16] {
            let results = run(request.clone(), workers, 16);
            assert_eq!(results.salts().collect::<Vec<_>>(), expected, "workers={workers}");
        }
    }

    #[test]
    fn test_priority_order_does_not_change_results() {
        let mut mask = [0u8; 20];
        let mut value = [0u8; 20];
        mask[19] = 0x0f;
        value[19] = 0x03;
        mask[4] = 0x80;
        let prioritized = Pattern::new(mask, value);

        let a = run(request(0, 4_000, 1_000, prioritized.clone()), 4, 100);
        let b = run(request(0, 4_000, 1_000, prioritized.sequential()), 4, 100);
        assert!(!a.is_empty());
        assert_eq!(a.as_slice(), b.as_slice());
    }

    #[test]
    fn test_empty_range() {
        let pool = WorkerPool::new(request(0, 0, 10, Pattern::any()), 4);
        let progress = pool.progress();
        assert_eq!(progress.percent(), 100);

        let results = pool.run().unwrap();
        assert!(results.is_empty());
        assert_eq!(results.salts_scanned(), 0);
    }

    #[test]
    fn test_range_saturates_at_u64_max() {
        let results = run(request(u64::MAX - 5, 100, 100, Pattern::any()), 3, 2);
        assert_eq!(
            results.salts().collect::<Vec<_>>(),
            (u64::MAX - 5..u64::MAX).collect::<Vec<_>>()
        );
    }

    #[test]
    #[should_panic(expected = "worker 1 failed")]
    fn test_worker_panic_aborts_scan() {
        let pool = WorkerPool::new(request(0, 1_000, 100, Pattern::any()), 3).with_chunk_size(10);
        let _ = pool.run_with(|worker| {
            if worker.id() == 1 {
                panic!("worker 1 failed");
            }
            worker.run()
        });
    }

    #[test]
    fn test_worker_panic_returns_no_results() {
        let pool = WorkerPool::new(request(0, 1_000, 100, Pattern::any()), 2).with_chunk_size(10);
        let outcome = panic::catch_unwind(panic::AssertUnwindSafe(|| {
            pool.run_with(|worker| {
                if worker.id() == 0 {
                    panic!("worker 0 failed");
                }
                worker.run()
            })
        }));

        let payload = outcome.unwrap_err();
        assert_eq!(payload.downcast_ref::<&str>(), Some(&"worker 0 failed"));
    }

    #[test]
    fn test_progress_after_run() {
        let pool = WorkerPool::new(request(0, 300, 5, Pattern::any()), 2).with_chunk_size(50);
        let progress = pool.progress();
        assert_eq!(progress.percent(), 0);

        let results = pool.run().unwrap();
        assert_eq!(results.len(), 5);
        assert!(progress.is_finished());
        assert_eq!(progress.percent(), 100);
        assert!(progress.results_found() >= 5);
        assert_eq!(progress.salts_scanned(), results.salts_scanned());
    }
}
