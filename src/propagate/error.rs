use chrono::{DateTime, Utc};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PropagationError {
    #[error("TLE path not found: {0}")]
    PathNotFound(String),
    #[error("TLE read error: {0}")]
    FileRead(#[from] std::io::Error),
    #[error("invalid TLE format")]
    InvalidTleFormat,
    #[error("invalid TLE in {file}: {message}")]
    InvalidTle { file: String, message: String },
    #[error("invalid TLE: {0}")]
    Tle(#[from] sgp4::TleError),
    #[error("elements error: {0}")]
    Elements(#[from] sgp4::ElementsError),
    #[error("no satellite with NORAD id {0} loaded")]
    UnknownSatellite(u64),
    #[error("propagation failed at {timestamp}: {message}")]
    AtTime {
        timestamp: DateTime<Utc>,
        message: String,
    },
}
