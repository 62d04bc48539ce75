use thiserror::Error;

#[derive(Debug, Error)]
pub enum TrainingError {
    #[error("training configuration error: {0}")]
    Config(String),

    #[error("no requests on file for day {0}")]
    MissingDay(u32),
}

pub type TrainingResult<T> = Result<T, TrainingError>;
