//! Crate error type.
//!
//! Sub-crates define their own error enums and wrap `CoreError` as one
//! variant where a core-level failure can propagate up through them.

use thiserror::Error;

/// Top-level error type for `taxi-core`, and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid group size: {0} (must be >= 1)")]
    InvalidGroupSize(u32),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for `taxi-core` and its dependents.
pub type CoreResult<T> = Result<T, CoreError>;
