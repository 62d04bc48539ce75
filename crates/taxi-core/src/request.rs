//! The external request shape: a group of riders wanting a trip from one
//! position to another, placed at a point in wall-clock time.

use crate::{Position, SimTime};

/// A single incoming ride request, as handed to the simulator from outside.
///
/// Requests are assumed pre-sorted by `request_time`; nothing in this
/// workspace re-sorts them.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Request {
    pub request_time: SimTime,
    pub size: u32,
    pub src: Position,
    pub dst: Position,
}

impl Request {
    pub fn new(request_time: SimTime, size: u32, src: Position, dst: Position) -> Self {
        Self {
            request_time,
            size,
            src,
            dst,
        }
    }
}
