//! Error types for Spendcast

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Not enough history to train: {distinct_days} distinct days, need at least {required}")]
    InsufficientHistory { distinct_days: usize, required: usize },

    #[error("No training samples could be built from {distinct_days} distinct days")]
    NoTrainingSamples { distinct_days: usize },

    #[error("Training error: {0}")]
    Training(String),

    #[error("Invalid period: {0}")]
    InvalidPeriod(String),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Import error: {0}")]
    Import(String),
}

pub type Result<T> = std::result::Result<T, Error>;
