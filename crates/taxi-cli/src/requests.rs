//! Loading and synthesizing request corpora.
//!
//! The real corpus is a year of historical trip records filtered into one
//! pickle file per day (`original_source/scripts/run_filter.py`), which is
//! out of scope for this workspace to ingest. `load_requests`/`load_corpus`
//! read the JSON equivalent instead; when no corpus is supplied on the
//! command line, `synthetic_day`/`synthetic_corpus` sample a stand-in
//! corpus from `taxi-region`'s built-in weighted zone table so `run-day`
//! and `train` still have something to dispatch against.

use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;

use taxi_core::{Request, SimTime, TaxiId, TaxiRng};
use taxi_region::ManhattanRegion;

/// The request corpus replays across a 29-day February, 1-indexed, mirroring
/// `taxi-training`'s day-cycling window.
pub const CORPUS_DAYS: u32 = 29;

pub fn start_of_day(day: u32) -> SimTime {
    SimTime::new(
        NaiveDate::from_ymd_opt(2016, 2, day)
            .expect("day is in 1..=29")
            .and_hms_opt(8, 0, 0)
            .expect("8:00:00 is a valid time"),
    )
}

/// Read a single day's requests from a JSON array of `Request`.
pub fn load_requests(path: &Path) -> Result<Vec<Request>> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let requests = serde_json::from_reader(file)
        .with_context(|| format!("parsing requests from {}", path.display()))?;
    Ok(requests)
}

/// Read a whole training corpus from `dir`, expecting one file per day
/// named `day-01.json` .. `day-29.json`.
pub fn load_corpus(dir: &Path) -> Result<HashMap<u32, Vec<Request>>> {
    let mut corpus = HashMap::with_capacity(CORPUS_DAYS as usize);
    for day in 1..=CORPUS_DAYS {
        let path = dir.join(format!("day-{day:02}.json"));
        corpus.insert(day, load_requests(&path)?);
    }
    Ok(corpus)
}

/// Sample `count` requests for `day`, spread uniformly over the four hours
/// following 08:00 — a compact stand-in for a real day's arrival pattern.
pub fn synthetic_day(day: u32, count: u32, seed: u64, region: &ManhattanRegion) -> Vec<Request> {
    let mut rng = TaxiRng::new(seed, TaxiId(day));
    let start = start_of_day(day);
    (0..count)
        .map(|_| {
            let offset_secs: f64 = rng.gen_range(0.0..4.0 * 3600.0);
            let size = rng.gen_range(1..=4);
            Request::new(
                start.advance(offset_secs),
                size,
                region.get_rand_pos(&mut rng),
                region.get_rand_pos(&mut rng),
            )
        })
        .collect()
}

/// Sample a full 29-day synthetic corpus, `count` requests per day.
pub fn synthetic_corpus(count: u32, seed: u64, region: &ManhattanRegion) -> HashMap<u32, Vec<Request>> {
    (1..=CORPUS_DAYS)
        .map(|day| (day, synthetic_day(day, count, seed, region)))
        .collect()
}
