//! CSV output for per-episode training logs.
//!
//! Creates a single file: `training_log.csv`.

use std::fs::File;
use std::path::Path;

use csv::Writer;
use taxi_training::EpisodeLog;

use crate::OutputResult;

/// Writes one row per training episode.
pub struct CsvLogWriter {
    writer: Writer<File>,
    finished: bool,
}

impl CsvLogWriter {
    /// Open (or create) `training_log.csv` in `dir` and write the header row.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut writer = Writer::from_path(dir.join("training_log.csv"))?;
        writer.write_record([
            "run_count",
            "day",
            "size_histogram",
            "requests",
            "timeouts",
            "timeout_percent",
            "mean_dispatch",
            "mean_pickup",
            "mean_wait",
        ])?;
        Ok(Self {
            writer,
            finished: false,
        })
    }

    pub fn write_log(&mut self, log: &EpisodeLog) -> OutputResult<()> {
        self.writer.write_record(&[
            log.run_count.to_string(),
            log.day.to_string(),
            format_histogram(&log.size_histogram),
            log.requests.to_string(),
            log.timeouts.to_string(),
            log.timeout_percent.to_string(),
            log.mean_dispatch.to_string(),
            log.mean_pickup.to_string(),
            log.mean_wait.to_string(),
        ])?;
        Ok(())
    }

    /// Flush and close the underlying file handle.
    ///
    /// Idempotent — safe to call more than once.
    pub fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.writer.flush()?;
        Ok(())
    }
}

/// `"size:count"` pairs joined by `;`, smallest size first — keeps the
/// histogram in one CSV cell instead of a variable number of columns.
fn format_histogram(histogram: &std::collections::BTreeMap<u32, u32>) -> String {
    histogram
        .iter()
        .map(|(size, count)| format!("{size}:{count}"))
        .collect::<Vec<_>>()
        .join(";")
}
