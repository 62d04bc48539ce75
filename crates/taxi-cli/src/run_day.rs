//! `run-day` — replay a single day's requests against a fixed fleet. No
//! learning takes place; this mirrors `original_source/scripts/run_day.py`.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{bail, Result};
use clap::Args;

use taxi_core::Parameters;
use taxi_fleet::make_taxis;
use taxi_region::ManhattanRegion;
use taxi_world::World;

use crate::requests;

#[derive(Args)]
pub struct RunDayArgs {
    /// Day of the 29-day corpus to replay (1-29).
    #[arg(long, default_value_t = 1)]
    day: u32,

    /// Fleet size.
    #[arg(long, default_value_t = 5250)]
    num_taxis: u32,

    /// Enable ridesharing dispatch instead of one-group-per-taxi.
    #[arg(long)]
    sharing: bool,

    /// JSON file of requests for this day; if omitted, a synthetic day is
    /// sampled from taxi-region's built-in zone table.
    #[arg(long)]
    requests: Option<PathBuf>,

    /// Number of requests to synthesize when `--requests` is omitted.
    #[arg(long, default_value_t = 2000)]
    num_requests: u32,

    /// Global RNG seed.
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Write each taxi's per-tick position/pickup/dropoff trace as JSON to
    /// this path.
    #[arg(long)]
    save_paths: Option<PathBuf>,
}

pub fn run(args: RunDayArgs) -> Result<()> {
    if args.day < 1 || args.day > requests::CORPUS_DAYS {
        bail!("day must be between 1 and {}", requests::CORPUS_DAYS);
    }

    let region = ManhattanRegion::new();
    let reqs = match &args.requests {
        Some(path) => requests::load_requests(path)?,
        None => requests::synthetic_day(args.day, args.num_requests, args.seed, &region),
    };

    let mut taxis = make_taxis(args.num_taxis, 4, Parameters::default().maxsize, &region, args.seed);
    if args.save_paths.is_some() {
        taxis = taxis.into_iter().map(|t| t.with_path_log()).collect();
    }

    println!("=== taxi-cli run-day ===");
    println!(
        "day {}  |  {} taxis  |  {} requests  |  sharing: {}  |  seed {}",
        args.day,
        args.num_taxis,
        reqs.len(),
        args.sharing,
        args.seed
    );

    let mut world = World::new(
        region,
        Parameters::default(),
        args.sharing,
        requests::start_of_day(args.day),
    );
    world.add_taxis(taxis);
    world.add_requests(reqs);

    let t0 = Instant::now();
    world.run(None);
    let elapsed = t0.elapsed();

    println!("finished in {:.3}s", elapsed.as_secs_f64());
    println!("{}", world.metrics);

    if let Some(path) = args.save_paths {
        let paths: BTreeMap<u32, &taxi_fleet::PathLog> = world
            .taxis
            .iter()
            .filter_map(|t| t.path_log.as_ref().map(|log| (t.id.0, log)))
            .collect();
        let file = std::fs::File::create(&path)?;
        serde_json::to_writer_pretty(file, &paths)?;
        println!("wrote taxi paths to {}", path.display());
    }

    Ok(())
}
