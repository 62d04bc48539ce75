//! World-subsystem error type.

use thiserror::Error;

use taxi_core::GroupId;

/// Errors produced by `taxi-world`.
#[derive(Debug, Error)]
pub enum WorldError {
    #[error("expected {expected} initial positions for {expected} taxis, got {got}")]
    TaxiCountMismatch { expected: usize, got: usize },

    #[error("passenger group {0} not found in world state")]
    GroupNotFound(GroupId),
}

pub type WorldResult<T> = Result<T, WorldError>;
