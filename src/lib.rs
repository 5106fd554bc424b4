//! # create2_vanity
//!
//! CREATE2 vanity salt miner over a bounded salt range.
//!
//! ## Architecture
//!
//! - `crypto`: Keccak-256 and CREATE2 address derivation
//! - `matcher`: Mask/value patterns and byte check ordering
//! - `worker`: Chunked parallel scanning and the worker pool
//! - `output`: Merged result sets and batched output rows
//! - `request`: Validated mining parameters
//! - `config`: Command-line configuration

pub mod config;
pub mod crypto;
pub mod encoding;
pub mod error;
pub mod matcher;
pub mod output;
pub mod request;
pub mod worker;

pub use config::Config;
pub use crypto::{create2_address, keccak256, Address, Create2Hasher, Salt};
pub use error::{Error, Result};
pub use matcher::{Pattern, PriorityOrder};
pub use output::{Candidate, OutputRow, ResultSet, ResultStream};
pub use request::{MineInput, MiningRequest};
pub use worker::{ScanProgress, WorkerPool};
