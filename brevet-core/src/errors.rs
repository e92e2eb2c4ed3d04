use thiserror::Error;

/// Result type used across the brevet core crate.
pub type Result<T> = std::result::Result<T, BrevetError>;

/// Canonical error representation shared by the CLI and the service.
#[derive(Debug, Error)]
pub enum BrevetError {
    #[error("serialization error: {0}")]
    SerializationError(String),

    #[error("invalid start time: {0}")]
    InvalidStartTime(String),

    #[error("calculation error: {0}")]
    CalculationError(String),

    #[error("configuration error: {0}")]
    ConfigError(String),

    #[error("general error: {0}")]
    GeneralError(String),
}

/// Dedicated configuration error used by the configuration module.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for environment variable {key}: {source}")]
    InvalidEnvVar {
        key: String,
        #[source]
        source: std::env::VarError,
    },

    #[error("invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

impl From<ConfigError> for BrevetError {
    fn from(value: ConfigError) -> Self {
        BrevetError::ConfigError(value.to_string())
    }
}
