//! The timestamps `Metrics::record_dropoff` needs, lifted out of a
//! completed [`taxi_fleet::PassengerGroup`] once all four of its lifecycle
//! events have happened.

use taxi_core::SimTime;
use taxi_fleet::PassengerGroup;

#[derive(Copy, Clone, Debug)]
pub struct DispatchOutcome {
    pub request_time: SimTime,
    pub dispatch_time: SimTime,
    pub pickup_time: SimTime,
    pub dropoff_time: SimTime,
}

impl DispatchOutcome {
    /// Build from a group whose full lifecycle has completed.
    ///
    /// # Panics
    /// Panics if any of `dispatch_time`/`pickup_time`/`dropoff_time` is
    /// still `None` — callers only build this once a dropoff has actually
    /// happened, at which point all three must be set.
    pub fn from_completed_group(group: &PassengerGroup) -> Self {
        Self {
            request_time: group.request_time,
            dispatch_time: group.dispatch_time.expect("dispatched before dropoff"),
            pickup_time: group.pickup_time.expect("picked up before dropoff"),
            dropoff_time: group.dropoff_time.expect("dropoff time just set"),
        }
    }
}
