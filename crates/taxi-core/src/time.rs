//! Wall-clock simulation time.
//!
//! A taxi request carries a real pickup time-of-day, and the dispatch queue
//! compares timestamps against timeout windows measured in minutes, so
//! `SimTime` wraps `chrono::NaiveDateTime` rather than an abstract tick
//! counter. `TICK_TIME` (see [`crate::params::Parameters`]) is the number of
//! seconds one call to `advance` moves the clock forward.

use std::fmt;

use chrono::{Duration, NaiveDateTime};

/// A point in simulated wall-clock time.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimTime(pub NaiveDateTime);

impl SimTime {
    #[inline]
    pub fn new(dt: NaiveDateTime) -> Self {
        Self(dt)
    }

    /// Advance the clock by `tick_secs` seconds.
    #[inline]
    pub fn advance(self, tick_secs: f64) -> SimTime {
        SimTime(self.0 + Duration::milliseconds((tick_secs * 1000.0) as i64))
    }

    /// Whole seconds elapsed from `earlier` to `self`.
    #[inline]
    pub fn since_secs(self, earlier: SimTime) -> f64 {
        (self.0 - earlier.0).num_milliseconds() as f64 / 1000.0
    }

    /// Minutes elapsed from `earlier` to `self`.
    #[inline]
    pub fn since_minutes(self, earlier: SimTime) -> f64 {
        self.since_secs(earlier) / 60.0
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d %H:%M:%S"))
    }
}
