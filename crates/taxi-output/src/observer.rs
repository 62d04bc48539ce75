//! `CsvTrainingObserver` — bridges `taxi_training::TrainingObserver` to a
//! [`CsvLogWriter`].

use taxi_training::{EpisodeLog, TrainingObserver};

use crate::csv::CsvLogWriter;
use crate::OutputError;

/// A [`TrainingObserver`] that appends each episode's log to a CSV file.
///
/// Errors are stored internally because `TrainingObserver` methods have no
/// return value. After training finishes, check for errors with
/// [`take_error`][Self::take_error].
pub struct CsvTrainingObserver {
    writer: CsvLogWriter,
    last_error: Option<OutputError>,
}

impl CsvTrainingObserver {
    pub fn new(writer: CsvLogWriter) -> Self {
        Self {
            writer,
            last_error: None,
        }
    }

    /// Take the stored write error (if any) after training returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect the file after training).
    pub fn into_writer(self) -> CsvLogWriter {
        self.writer
    }
}

impl TrainingObserver for CsvTrainingObserver {
    fn on_episode_end(&mut self, log: &EpisodeLog) {
        if let Err(e) = self.writer.write_log(log) {
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}
