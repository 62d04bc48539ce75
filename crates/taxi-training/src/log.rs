//! The record a single training episode (or simulated day) produces.

use std::collections::BTreeMap;

use taxi_world::World;

/// Everything worth keeping from one [`Trainer::run_episode`][crate::Trainer::run_episode]
/// call: the day it replayed, the resulting fleet-size histogram, and the
/// metrics `World::run` accumulated.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EpisodeLog {
    pub run_count: u64,
    pub day: u32,
    /// Seating capacity -> number of taxis currently at that capacity.
    /// A `BTreeMap` so iteration order is stable for logging.
    pub size_histogram: BTreeMap<u32, u32>,
    pub requests: u64,
    pub timeouts: u64,
    pub timeout_percent: f64,
    pub mean_dispatch: f64,
    pub mean_pickup: f64,
    pub mean_wait: f64,
}

impl EpisodeLog {
    /// Snapshot `world`'s metrics and the fleet's current size distribution
    /// after an episode has finished running.
    pub fn from_world(run_count: u64, day: u32, world: &World) -> Self {
        let mut size_histogram = BTreeMap::new();
        for taxi in &world.taxis {
            *size_histogram.entry(taxi.size).or_insert(0) += 1;
        }

        Self {
            run_count,
            day,
            size_histogram,
            requests: world.metrics.num_requests,
            timeouts: world.metrics.num_timeouts,
            timeout_percent: world.metrics.timeout_percent(),
            mean_dispatch: world.metrics.mean_dispatch_time(),
            mean_pickup: world.metrics.mean_pickup_time(),
            mean_wait: world.metrics.mean_wait_time(),
        }
    }
}
