use std::path::PathBuf;

use thiserror::Error;

/// Errors returned when a control time cannot be computed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TimeError {
    #[error("invalid control distance: {0} km")]
    InvalidDistance(f64),
    #[error("unsupported brevet distance: {0} km (expected 200, 300, 400, 600 or 1000)")]
    UnsupportedBrevetDistance(f64),
    #[error("control time for {0} km is outside the representable time range")]
    OutOfRange(f64),
}

/// Errors raised while loading a brevet plan or building its schedule.
#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("plan path does not exist: {0}")]
    MissingPath(String),
    #[error("failed to read plan from {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse plan from {path}: {message}")]
    Parse { path: String, message: String },
    #[error("plan has no controls")]
    Empty,
    #[error("control #{index} at {distance_km} km is not after the previous control at {previous_km} km")]
    NotAscending {
        index: usize,
        distance_km: f64,
        previous_km: f64,
    },
    #[error("control #{index} at {distance_km} km is more than 20% beyond the {brevet_km} km brevet")]
    TooFarBeyondFinish {
        index: usize,
        distance_km: f64,
        brevet_km: f64,
    },
    #[error("control #{index}: {source}")]
    Control {
        index: usize,
        #[source]
        source: TimeError,
    },
    #[error(transparent)]
    Time(#[from] TimeError),
}

impl ScheduleError {
    pub fn from_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ScheduleError::Io {
            path: path.into().display().to_string(),
            source,
        }
    }

    pub fn parse_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        ScheduleError::Parse {
            path: path.into().display().to_string(),
            message: message.into(),
        }
    }
}
