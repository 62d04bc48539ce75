//! `train` — run repeated Q-learning episodes across the 29-day corpus,
//! mirroring `original_source/scripts/run_q_training_2000.py`.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use taxi_core::Parameters;
use taxi_fleet::make_taxis;
use taxi_output::{load_fleet, save_fleet, CsvLogWriter, CsvTrainingObserver};
use taxi_region::ManhattanRegion;
use taxi_training::Trainer;
use taxi_world::World;

use crate::requests;

#[derive(Args)]
pub struct TrainArgs {
    /// Number of training episodes to run (absolute run count, not a delta
    /// — matches `Trainer::run`'s `max_runs`).
    #[arg(long, default_value_t = 2000)]
    max_runs: u64,

    /// Fleet size (ignored when `--resume` supplies a fleet snapshot).
    #[arg(long, default_value_t = 50)]
    num_taxis: u32,

    /// Enable ridesharing dispatch.
    #[arg(long)]
    sharing: bool,

    /// Directory of `day-01.json` .. `day-29.json` request files; if
    /// omitted, a synthetic 29-day corpus is sampled.
    #[arg(long)]
    requests_dir: Option<PathBuf>,

    /// Requests per day when `--requests-dir` is omitted.
    #[arg(long, default_value_t = 500)]
    requests_per_day: u32,

    /// Global RNG seed.
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Directory to write `training_log.csv` into.
    #[arg(long, default_value = ".")]
    log_dir: PathBuf,

    /// Resume from a previously saved fleet snapshot.
    #[arg(long)]
    resume: Option<PathBuf>,

    /// Save the trained fleet's learned policy to this path when done.
    #[arg(long)]
    snapshot_out: Option<PathBuf>,
}

pub fn run(args: TrainArgs) -> Result<()> {
    let region = ManhattanRegion::new();
    let corpus = match &args.requests_dir {
        Some(dir) => requests::load_corpus(dir)?,
        None => requests::synthetic_corpus(args.requests_per_day, args.seed, &region),
    };

    let (run_count, taxis) = match &args.resume {
        Some(path) => load_fleet(path)?,
        None => (0, make_taxis(args.num_taxis, 4, Parameters::default().maxsize, &region, args.seed)),
    };

    println!("=== taxi-cli train ===");
    println!(
        "{} taxis  |  sharing: {}  |  seed {}  |  max_runs {}",
        taxis.len(),
        args.sharing,
        args.seed,
        args.max_runs
    );

    let mut world = World::new(region, Parameters::default(), args.sharing, requests::start_of_day(1));
    world.add_taxis(taxis);
    let mut trainer = Trainer::resume(world, corpus, run_count);

    std::fs::create_dir_all(&args.log_dir)?;
    let writer = CsvLogWriter::new(&args.log_dir)?;
    let mut observer = CsvTrainingObserver::new(writer);

    let logs = trainer.run(args.max_runs, &mut observer)?;

    if let Some(err) = observer.take_error() {
        eprintln!("warning: training log write error: {err}");
    }
    observer.into_writer().finish()?;

    println!("ran {} episodes (run_count now {})", logs.len(), trainer.run_count);
    if let Some(last) = logs.last() {
        println!(
            "last episode — day {}, {} requests, {:.1}% timeouts",
            last.day, last.requests, last.timeout_percent
        );
    }

    if let Some(path) = args.snapshot_out {
        save_fleet(&path, trainer.run_count, &trainer.world.taxis)?;
        println!("wrote fleet snapshot to {}", path.display());
    }

    Ok(())
}
