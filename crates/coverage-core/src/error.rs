//! Error taxonomy for coverage reporting.

/// Errors produced while interpreting statuses or building artifacts.
#[derive(Debug, thiserror::Error)]
pub enum CoverageError {
    #[error("unknown automation status: {0}")]
    UnknownStatus(String),

    #[error("invalid SQL identifier: {0:?}")]
    InvalidIdentifier(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for coverage operations.
pub type Result<T> = std::result::Result<T, CoverageError>;
