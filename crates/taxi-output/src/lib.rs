//! `taxi-output` — training logs and fleet persistence for taxi-world.
//!
//! Two things are written:
//!
//! | What             | Format | Written by                              |
//! |------------------|--------|------------------------------------------|
//! | per-episode logs | CSV    | [`CsvLogWriter`] / [`CsvTrainingObserver`] |
//! | fleet policy      | JSON   | [`save_fleet`] / [`load_fleet`]            |
//!
//! # Usage
//!
//! ```rust,ignore
//! use taxi_output::{CsvLogWriter, CsvTrainingObserver, save_fleet};
//!
//! let writer = CsvLogWriter::new(Path::new("./output"))?;
//! let mut obs = CsvTrainingObserver::new(writer);
//! let logs = trainer.run(2000, &mut obs)?;
//! obs.take_error().map(|e| eprintln!("output error: {e}"));
//! save_fleet(Path::new("./output/fleet.json"), trainer.run_count, &trainer.world.taxis)?;
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod snapshot;

#[cfg(test)]
mod tests;

pub use csv::CsvLogWriter;
pub use error::{OutputError, OutputResult};
pub use observer::CsvTrainingObserver;
pub use snapshot::{load_fleet, save_fleet, FleetSnapshot};
