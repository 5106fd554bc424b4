//! Result aggregation and batched output.

mod results;
mod stream;

pub use results::{Candidate, ResultSet};
pub use stream::{OutputRow, ResultStream, DEFAULT_BATCH_SIZE};
