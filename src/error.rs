//! Error types for request validation and scan setup.

/// Errors reported before (or while launching) a scan.
///
/// Every validation failure is raised while the request is being built, so a
/// scan that starts always runs to completion.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{field} is required")]
    MissingField { field: &'static str },

    #[error("invalid {field}: expected {expected} bytes ({} hex characters), got {actual} characters", expected * 2)]
    InvalidLength {
        field: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("invalid {field}: hex string must have an even number of digits")]
    OddLength { field: &'static str },

    #[error("invalid {field}: contains non-hex characters")]
    InvalidHex { field: &'static str },

    #[error("invalid {field}: {value:?} is not an unsigned 64-bit integer")]
    InvalidInteger { field: &'static str, value: String },

    #[error("max_results must be greater than 0")]
    ZeroMaxResults,

    #[error("batch size must be greater than 0")]
    ZeroBatchSize,

    #[error("invalid pattern: {0}")]
    InvalidPattern(String),

    #[error("failed to spawn worker thread: {0}")]
    Spawn(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
