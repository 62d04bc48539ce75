//! A `World`-owned passenger-group id generator.
//!
//! The reference implementation minted group ids from a module-level
//! `itertools.count()` — global mutable state shared across every world
//! instance in the process, including concurrently running training runs.
//! Owning the counter on `World` instead means two worlds (or two
//! sequential resets of the same world) never contend over id allocation
//! and never leak state between runs.

use taxi_core::GroupId;

#[derive(Clone, Debug, Default)]
pub struct GroupIdGen {
    next: u64,
}

impl GroupIdGen {
    pub fn new() -> Self {
        Self { next: 0 }
    }

    pub fn next(&mut self) -> GroupId {
        let id = GroupId(self.next);
        self.next += 1;
        id
    }
}
