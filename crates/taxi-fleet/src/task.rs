//! Taxi status, task kinds, and the seating-capacity action space.

use taxi_core::{GroupId, Position};

/// What a taxi is presently doing.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Status {
    /// No queued tasks — eligible for dispatch.
    Idle,
    /// Travelling to pick up a passenger group.
    Pickup,
    /// Travelling to drop a passenger group at its destination.
    Dropoff,
    /// Travelling to an unoccupied spot chosen at random, to rebalance
    /// coverage while idle.
    Repositioning,
}

/// The kind of a single queued task.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TaskKind {
    Pickup,
    Dropoff,
    Reposition,
}

/// A single queued stop on a taxi's route.
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Task {
    pub kind: TaskKind,
    pub target: Position,
    /// The group's `entry_id` (not its possibly-shared `group_id`) — `None`
    /// for `Reposition` tasks, which carry no passenger group.
    pub group_id: Option<GroupId>,
}

impl Task {
    pub fn pickup(target: Position, group_id: GroupId) -> Self {
        Self {
            kind: TaskKind::Pickup,
            target,
            group_id: Some(group_id),
        }
    }

    pub fn dropoff(target: Position, group_id: GroupId) -> Self {
        Self {
            kind: TaskKind::Dropoff,
            target,
            group_id: Some(group_id),
        }
    }

    pub fn reposition(target: Position) -> Self {
        Self {
            kind: TaskKind::Reposition,
            target,
            group_id: None,
        }
    }
}

/// A seating-capacity adjustment choice: shrink by one seat, hold steady, or
/// grow by one seat.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Choice {
    Decrease,
    Hold,
    Increase,
}

impl Choice {
    pub const ALL: [Choice; 3] = [Choice::Decrease, Choice::Hold, Choice::Increase];

    /// Index into a 3-slot Q-value array, in `[-1, 0, +1]` order.
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Choice::Decrease => 0,
            Choice::Hold => 1,
            Choice::Increase => 2,
        }
    }

    #[inline]
    pub fn from_index(i: usize) -> Choice {
        Choice::ALL[i]
    }

    /// The signed seat delta this choice applies.
    #[inline]
    pub fn delta(self) -> i32 {
        match self {
            Choice::Decrease => -1,
            Choice::Hold => 0,
            Choice::Increase => 1,
        }
    }
}
