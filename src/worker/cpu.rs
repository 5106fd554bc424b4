//! CPU worker that scans claimed salt chunks.

use crate::crypto::Create2Hasher;
use crate::output::Candidate;
use crate::request::MiningRequest;

use super::ScanCursor;

/// Scans chunks claimed from a shared cursor and keeps its matches privately.
pub struct CpuWorker<'a> {
    id: usize,
    request: &'a MiningRequest,
    cursor: &'a ScanCursor,
    chunk_size: u64,
}

impl<'a> CpuWorker<'a> {
    pub fn new(
        id: usize,
        request: &'a MiningRequest,
        cursor: &'a ScanCursor,
        chunk_size: u64,
    ) -> Self {
        Self {
            id,
            request,
            cursor,
            chunk_size,
        }
    }

    /// Runs the worker loop, returning matches in discovery order.
    ///
    /// Stops when:
    /// - The range is exhausted
    /// - The shared match count has reached the quota at claim time
    /// - This worker alone holds `max_results` matches
    ///
    /// A claimed chunk is never abandoned because of another worker's matches,
    /// so every salt below the final cutoff is scanned.
    pub fn run(&self) -> Vec<Candidate> {
        let hasher = Create2Hasher::new(self.request.deployer(), self.request.init_code_hash());
        let pattern = self.request.pattern();
        let max_results = self.request.max_results();
        let mut found = Vec::new();

        'claims: while self.cursor.results_found() < max_results {
            let Some(chunk) = self.cursor.claim(self.chunk_size) else {
                break;
            };

            let (chunk_start, chunk_end) = (chunk.start, chunk.end);
            for salt in chunk {
                let address = hasher.address(salt);
                if !pattern.matches(&address) {
                    continue;
                }

                self.cursor.record_match();
                found.push(Candidate::new(salt, address));

                // Later salts of this worker are larger than everything it holds.
                if found.len() as u64 >= max_results {
                    self.cursor.add_scanned(salt - chunk_start + 1);
                    break 'claims;
                }
            }

            self.cursor.add_scanned(chunk_end - chunk_start);
        }

        tracing::trace!(worker = self.id, matches = found.len(), "worker finished");
        found
    }

    /// Returns the worker ID.
    pub fn id(&self) -> usize {
        self.id
    }
}
