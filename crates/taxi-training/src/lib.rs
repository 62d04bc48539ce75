//! `taxi-training` — the multi-episode Q-learning training loop.
//!
//! # One training episode
//!
//! ```text
//! run_count += 1
//! day = run_count wrapped into 1..=29
//! world.time = 08:00 on that day
//! world.reset_metrics(); world.reset_taxis()
//! world.add_requests(that day's corpus)
//! for taxi in fleet:
//!   decay taxi.p_explore if in the exploration-decay window
//!   taxi.choose_action()      — pick this episode's seating capacity
//! world.run()                 — simulate the whole day
//! for taxi in fleet:
//!   taxi.update_q_table(...)  — Bellman update from the reward earned
//!   taxi.update_s_table()     — fold into the Monte-Carlo baseline
//! ```
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use taxi_training::{NoopObserver, Trainer};
//!
//! let mut trainer = Trainer::init(world, requests_by_day);
//! let logs = trainer.run(2000, &mut NoopObserver)?;
//! ```

pub mod error;
pub mod log;
pub mod observer;
pub mod trainer;


pub use error::{TrainingError, TrainingResult};
pub use log::EpisodeLog;
pub use observer::{NoopObserver, TrainingObserver};
pub use trainer::Trainer;
