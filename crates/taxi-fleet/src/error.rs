//! Fleet-subsystem error type.

use thiserror::Error;

use taxi_core::GroupId;

/// Errors produced by `taxi-fleet`.
#[derive(Debug, Error)]
pub enum FleetError {
    #[error("passenger group {0} not found")]
    GroupNotFound(GroupId),

    #[error("cannot split a group of size {0} into a piece of size {1}")]
    InvalidSplit(u32, u32),
}

pub type FleetResult<T> = Result<T, FleetError>;
