//! Multi-episode Q-learning training loop.

use std::collections::HashMap;

use chrono::NaiveDate;

use taxi_core::{Request, SimTime};
use taxi_world::World;

use crate::error::{TrainingError, TrainingResult};
use crate::log::EpisodeLog;
use crate::observer::TrainingObserver;

/// First run number (exclusive) at which exploration starts decaying.
const EXPLORE_DECAY_START: u64 = 1000;
/// Last run number (inclusive) at which exploration keeps decaying.
const EXPLORE_DECAY_END: u64 = 1500;
/// `p_explore` lost per run across the decay window — reaches exactly 0 by
/// `EXPLORE_DECAY_END` starting from a fresh `p_explore` of 1.0.
const EXPLORE_DECAY_STEP: f64 = 1.0 / (EXPLORE_DECAY_END - EXPLORE_DECAY_START) as f64;

/// The request corpus replays over a 29-day February, 1-indexed; a run
/// number maps onto a day by wrapping modulo 29, with the wrap-to-zero case
/// substituted for day 29 rather than day 0.
const CORPUS_DAYS: u32 = 29;

fn day_for_run(run_count: u64) -> u32 {
    let day = (run_count % CORPUS_DAYS as u64) as u32;
    if day == 0 { CORPUS_DAYS } else { day }
}

fn start_of_day(day: u32) -> SimTime {
    SimTime::new(
        NaiveDate::from_ymd_opt(2016, 2, day)
            .expect("day is in 1..=29")
            .and_hms_opt(8, 0, 0)
            .expect("8:00:00 is a valid time"),
    )
}

/// Drives `World` through repeated training episodes, running each day's
/// request corpus against the fleet's current Q-tables, then Bellman-
/// updating every taxi's seating-capacity policy from the reward it earned.
pub struct Trainer {
    pub world: World,
    pub run_count: u64,
    requests_by_day: HashMap<u32, Vec<Request>>,
}

impl Trainer {
    /// Start a fresh training run at `run_count = 0` against `world`.
    pub fn init(world: World, requests_by_day: HashMap<u32, Vec<Request>>) -> Self {
        Self {
            world,
            run_count: 0,
            requests_by_day,
        }
    }

    /// Resume training from a previously saved `run_count` (the fleet
    /// inside `world` is assumed to already reflect that many episodes of
    /// learning — e.g. loaded from a `taxi-output` fleet snapshot).
    pub fn resume(world: World, requests_by_day: HashMap<u32, Vec<Request>>, run_count: u64) -> Self {
        Self {
            world,
            run_count,
            requests_by_day,
        }
    }

    /// Play one more training episode: replay the next day's request
    /// corpus against the fleet's current policy, then update every taxi's
    /// Q-table and Monte-Carlo baseline from the reward it earned.
    pub fn run_episode(&mut self) -> TrainingResult<EpisodeLog> {
        self.run_count += 1;
        let day = day_for_run(self.run_count);
        let requests = self
            .requests_by_day
            .get(&day)
            .ok_or(TrainingError::MissingDay(day))?
            .clone();

        self.world.time = start_of_day(day);
        self.world.reset_metrics();
        self.world.reset_taxis();
        self.world.add_requests(requests);

        for taxi in &mut self.world.taxis {
            if self.run_count > EXPLORE_DECAY_START && self.run_count <= EXPLORE_DECAY_END {
                taxi.p_explore = (taxi.p_explore - EXPLORE_DECAY_STEP).max(0.0);
            }
            taxi.choose_action();
        }

        self.world.run(None);

        for taxi in &mut self.world.taxis {
            taxi.update_q_table(self.world.params.gamma, self.world.params.alpha);
            taxi.update_s_table();
        }

        Ok(EpisodeLog::from_world(self.run_count, day, &self.world))
    }

    /// Run episodes until `run_count` reaches `max_runs`, reporting each
    /// one to `observer`.
    pub fn run(&mut self, max_runs: u64, observer: &mut impl TrainingObserver) -> TrainingResult<Vec<EpisodeLog>> {
        let mut logs = Vec::new();
        while self.run_count < max_runs {
            observer.on_episode_start(self.run_count + 1);
            let log = self.run_episode()?;
            observer.on_episode_end(&log);
            logs.push(log);
        }
        Ok(logs)
    }
}
