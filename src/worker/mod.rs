//! Chunked parallel scanning over a salt range.

mod cpu;
mod cursor;
mod pool;

pub use cpu::CpuWorker;
pub use cursor::{ScanCursor, ScanProgress};
pub use pool::{worker_count, WorkerPool, CHUNK_SIZE};
