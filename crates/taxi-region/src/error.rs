//! Region-subsystem error type.

use thiserror::Error;

/// Errors produced by `taxi-region`.
#[derive(Debug, Error)]
pub enum RegionError {
    #[error("weighted zone table is empty")]
    EmptyTable,
}

pub type RegionResult<T> = Result<T, RegionError>;
