use std::env;

use chrono::{FixedOffset, Offset, Utc};

use crate::errors::{BrevetError, ConfigError};
use crate::timestamp::parse_offset;

/// Configuration shared by the CLI and the HTTP service.
#[derive(Debug, Clone)]
pub struct CoreConfig {
    pub node_name: String,
    pub http_bind: String,
    pub log_level: Option<String>,
    /// Offset applied to start times given without one.
    pub default_offset: FixedOffset,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            node_name: "brevet-node".to_string(),
            http_bind: "0.0.0.0:5000".to_string(),
            log_level: None,
            default_offset: Utc.fix(),
        }
    }
}

impl CoreConfig {
    /// Loads configuration from `BREVET_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_with_prefix("BREVET_")
    }

    /// Loads configuration from env vars prefixed with the provided value (e.g. `BREVET_`).
    pub fn from_env_with_prefix(prefix: &str) -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        let key = |suffix: &str| format!("{}{}", prefix, suffix);
        let defaults = Self::default();

        let node_name = read_var(&key("NODE_NAME"))?.unwrap_or(defaults.node_name);
        let http_bind = read_var(&key("HTTP_BIND"))?.unwrap_or(defaults.http_bind);
        let log_level = read_var(&key("LOG"))?;

        let offset_key = key("DEFAULT_OFFSET");
        let default_offset = match read_var(&offset_key)? {
            Some(raw) => parse_offset(&raw).map_err(|err| ConfigError::InvalidValue {
                key: offset_key.clone(),
                message: err.to_string(),
            })?,
            None => defaults.default_offset,
        };

        Ok(Self {
            node_name,
            http_bind,
            log_level,
            default_offset,
        })
    }

    pub fn log_level(&self) -> Option<&str> {
        self.log_level.as_deref()
    }
}

/// Helper that loads config and converts to the canonical brevet error type.
pub fn load_core_config() -> Result<CoreConfig, BrevetError> {
    Ok(CoreConfig::from_env()?)
}

fn read_var(key: &str) -> Result<Option<String>, ConfigError> {
    match env::var(key) {
        Ok(value) if value.trim().is_empty() => Ok(None),
        Ok(value) => Ok(Some(value.trim().to_string())),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(err) => Err(ConfigError::InvalidEnvVar {
            key: key.to_string(),
            source: err,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_defaults_for_unset_prefix() {
        let cfg =
            CoreConfig::from_env_with_prefix("BREVET_TEST_UNSET_").expect("config should load");
        assert_eq!(cfg.http_bind, "0.0.0.0:5000");
        assert_eq!(cfg.default_offset.local_minus_utc(), 0);
    }

    #[test]
    fn reads_prefixed_values() {
        std::env::set_var("BREVET_TEST_READ_NODE_NAME", "controle-1");
        std::env::set_var("BREVET_TEST_READ_HTTP_BIND", "127.0.0.1:9000");
        std::env::set_var("BREVET_TEST_READ_DEFAULT_OFFSET", "-07:00");
        let cfg =
            CoreConfig::from_env_with_prefix("BREVET_TEST_READ_").expect("config should load");
        assert_eq!(cfg.node_name, "controle-1");
        assert_eq!(cfg.http_bind, "127.0.0.1:9000");
        assert_eq!(cfg.default_offset.local_minus_utc(), -7 * 3600);
    }

    #[test]
    fn rejects_bad_offset() {
        std::env::set_var("BREVET_TEST_BAD_DEFAULT_OFFSET", "pacific");
        let err = CoreConfig::from_env_with_prefix("BREVET_TEST_BAD_").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }
}
