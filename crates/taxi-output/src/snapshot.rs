//! JSON fleet snapshots — save and resume a training run's learned policy.
//!
//! A `Taxi` carries a `TaxiRng`, which wraps a `SmallRng` with no serde
//! support of its own. Rather than serialize generator state, a snapshot
//! stores each taxi's original seed and reconstructs its `TaxiRng`
//! deterministically on load via `Taxi::new` — the mid-episode sequence of
//! draws is not preserved, only the learned tables and current capacity,
//! which is all `taxi-training::Trainer::resume` needs.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use serde::{Deserialize, Serialize};

use taxi_core::{Position, TaxiId};
use taxi_fleet::{QTable, STable, Taxi};

use crate::OutputResult;

#[derive(Serialize, Deserialize)]
struct TaxiSnapshot {
    id: u32,
    position: Position,
    size: u32,
    maxsize: u32,
    seed: u64,
    q_table: QTable,
    s_table: STable,
    p_explore: f64,
}

impl TaxiSnapshot {
    fn capture(taxi: &Taxi) -> Self {
        Self {
            id: taxi.id.0,
            position: taxi.position,
            size: taxi.size,
            maxsize: taxi.q_table.maxsize(),
            seed: taxi.seed(),
            q_table: taxi.q_table.clone(),
            s_table: taxi.s_table.clone(),
            p_explore: taxi.p_explore,
        }
    }

    fn restore(self) -> Taxi {
        let mut taxi = Taxi::new(
            TaxiId(self.id),
            self.position,
            self.size,
            self.maxsize,
            self.seed,
        );
        taxi.q_table = self.q_table;
        taxi.s_table = self.s_table;
        taxi.p_explore = self.p_explore;
        taxi
    }
}

/// A whole fleet's learned policy plus the training run count it was
/// captured at, so a resumed `Trainer` keeps cycling through the same
/// day-of-month sequence instead of restarting at day 1.
#[derive(Serialize, Deserialize)]
pub struct FleetSnapshot {
    pub run_count: u64,
    taxis: Vec<TaxiSnapshot>,
}

impl FleetSnapshot {
    pub fn capture(run_count: u64, taxis: &[Taxi]) -> Self {
        Self {
            run_count,
            taxis: taxis.iter().map(TaxiSnapshot::capture).collect(),
        }
    }

    pub fn into_taxis(self) -> Vec<Taxi> {
        self.taxis.into_iter().map(TaxiSnapshot::restore).collect()
    }
}

/// Write `taxis`' learned policy and `run_count` to `path` as JSON.
pub fn save_fleet(path: &Path, run_count: u64, taxis: &[Taxi]) -> OutputResult<()> {
    let file = File::create(path)?;
    let snapshot = FleetSnapshot::capture(run_count, taxis);
    serde_json::to_writer_pretty(BufWriter::new(file), &snapshot)?;
    Ok(())
}

/// Read back a fleet snapshot written by [`save_fleet`].
pub fn load_fleet(path: &Path) -> OutputResult<(u64, Vec<Taxi>)> {
    let file = File::open(path)?;
    let snapshot: FleetSnapshot = serde_json::from_reader(file)?;
    let run_count = snapshot.run_count;
    Ok((run_count, snapshot.into_taxis()))
}
