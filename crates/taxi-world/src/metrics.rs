//! Aggregate per-run metrics.
//!
//! The running means here use a deliberately asymmetric denominator:
//! `mean_dispatch_time` averages over every group that left the dispatch
//! queue one way or another (`num_timeouts + num_dropoffs`), since a
//! dispatch-wait sample exists whether or not the ride ultimately
//! completed. `mean_pickup_time` and `mean_journey_time` only make sense
//! for groups that were actually picked up, so they divide by
//! `num_dropoffs` alone. This is not a bug to "fix" into a single shared
//! denominator — the two halves of the funnel measure different
//! populations.

use std::fmt;

use taxi_core::SimTime;

use crate::outcome::DispatchOutcome;

/// Running totals accumulated over a single simulated run (one day, or one
/// training episode).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Metrics {
    pub num_requests: u64,
    pub num_dropoffs: u64,
    pub num_timeouts: u64,

    dispatch_time_sum: f64,
    pickup_time_sum: f64,
    journey_time_sum: f64,
    wait_time_sum: f64,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_request(&mut self) {
        self.num_requests += 1;
    }

    /// Record a group that aged out of the dispatch queue without ever
    /// being matched to a taxi.
    pub fn record_timeout(&mut self, request_time: SimTime, timeout_time: SimTime) {
        self.num_timeouts += 1;
        self.dispatch_time_sum += timeout_time.since_secs(request_time);
    }

    /// Record a group that completed its ride, given the three lifecycle
    /// timestamps plus the time it was dispatched.
    pub fn record_dropoff(&mut self, outcome: DispatchOutcome) {
        self.num_dropoffs += 1;
        self.dispatch_time_sum += outcome.dispatch_time.since_secs(outcome.request_time);
        self.pickup_time_sum += outcome.pickup_time.since_secs(outcome.dispatch_time);
        self.journey_time_sum += outcome.dropoff_time.since_secs(outcome.pickup_time);
        self.wait_time_sum += outcome.pickup_time.since_secs(outcome.request_time);
    }

    /// Percentage of requested groups that timed out, in `[0, 100]`.
    pub fn timeout_percent(&self) -> f64 {
        if self.num_requests == 0 {
            return 0.0;
        }
        100.0 * self.num_timeouts as f64 / self.num_requests as f64
    }

    /// Mean seconds from request to dispatch, over every group that left
    /// the dispatch queue (timed out or successfully dispatched).
    pub fn mean_dispatch_time(&self) -> f64 {
        let denom = self.num_timeouts + self.num_dropoffs;
        if denom == 0 {
            return 0.0;
        }
        self.dispatch_time_sum / denom as f64
    }

    /// Mean seconds from dispatch to pickup, over completed rides.
    pub fn mean_pickup_time(&self) -> f64 {
        if self.num_dropoffs == 0 {
            return 0.0;
        }
        self.pickup_time_sum / self.num_dropoffs as f64
    }

    /// Mean seconds from pickup to dropoff, over completed rides.
    pub fn mean_journey_time(&self) -> f64 {
        if self.num_dropoffs == 0 {
            return 0.0;
        }
        self.journey_time_sum / self.num_dropoffs as f64
    }

    /// Mean seconds from request to pickup, over completed rides.
    pub fn mean_wait_time(&self) -> f64 {
        if self.num_dropoffs == 0 {
            return 0.0;
        }
        self.wait_time_sum / self.num_dropoffs as f64
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl fmt::Display for Metrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} requests, {} dropoffs, {} timeouts ({:.1}%), mean wait {:.1}s",
            self.num_requests,
            self.num_dropoffs,
            self.num_timeouts,
            self.timeout_percent(),
            self.mean_wait_time(),
        )
    }
}
