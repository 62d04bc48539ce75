//! Passenger groups — one or more riders travelling together, from a single
//! request, who may later be split across two taxis under ridesharing.

use taxi_core::{GroupId, Position, SimTime};

/// A group of riders awaiting or undergoing a shared trip.
///
/// `request_time <= dispatch_time <= pickup_time <= dropoff_time` holds for
/// every timestamp that has been set; timestamps are `None` until the
/// corresponding lifecycle event happens.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PassengerGroup {
    /// Logical request identity. Stable across a split: both halves of a
    /// split group share the same `group_id`, so the dispatch loop can
    /// recognize them as "the same request" for the group-reuse shortcut.
    pub group_id: GroupId,
    /// Unique bookkeeping key `World` actually indexes on (`groups`,
    /// `dispatch_queue`, `pickup_list`, and every `Task::group_id` a taxi
    /// carries). Split siblings get a freshly minted one, since a taxi can
    /// hold pickup/dropoff tasks for both halves of the same split.
    pub entry_id: GroupId,
    pub size: u32,
    pub src: Position,
    pub dst: Position,
    pub request_time: SimTime,
    pub dispatch_time: Option<SimTime>,
    pub pickup_time: Option<SimTime>,
    pub dropoff_time: Option<SimTime>,
    /// Extra detour distance (metres) this group's ride may absorb for
    /// ridesharing before it is no longer considered a candidate match.
    /// `None` outside ridesharing mode.
    pub rs_distance_limit: Option<f64>,
}

impl PassengerGroup {
    pub fn new(group_id: GroupId, size: u32, src: Position, dst: Position, request_time: SimTime) -> Self {
        Self {
            group_id,
            entry_id: group_id,
            size,
            src,
            dst,
            request_time,
            dispatch_time: None,
            pickup_time: None,
            dropoff_time: None,
            rs_distance_limit: None,
        }
    }

    /// Split off a sibling group of `split_off_size` riders, sharing this
    /// group's `group_id`, route, `rs_distance_limit`, and every timestamp
    /// set so far, but keyed under its own `entry_id`. `self` shrinks by
    /// `split_off_size`.
    pub fn split(&mut self, split_off_size: u32, new_entry_id: GroupId) -> PassengerGroup {
        self.size -= split_off_size;
        PassengerGroup {
            group_id: self.group_id,
            entry_id: new_entry_id,
            size: split_off_size,
            src: self.src,
            dst: self.dst,
            request_time: self.request_time,
            dispatch_time: self.dispatch_time,
            pickup_time: self.pickup_time,
            dropoff_time: self.dropoff_time,
            rs_distance_limit: self.rs_distance_limit,
        }
    }

    #[inline]
    pub fn is_dispatched(&self) -> bool {
        self.dispatch_time.is_some()
    }

    #[inline]
    pub fn is_picked_up(&self) -> bool {
        self.pickup_time.is_some()
    }

    #[inline]
    pub fn is_dropped_off(&self) -> bool {
        self.dropoff_time.is_some()
    }
}
