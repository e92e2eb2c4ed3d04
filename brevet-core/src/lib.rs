//! Core shared library for the brevet tools.
//!
//! This crate exposes the primitives that the CLI and the HTTP service
//! depend on: common errors, configuration loading, logging setup, JSON
//! helpers and parsing of brevet start times.

pub mod config;
pub mod errors;
pub mod logging;
pub mod serde_utils;
pub mod timestamp;

pub use config::CoreConfig;
pub use errors::{BrevetError, ConfigError, Result as CoreResult};
pub use timestamp::{format_time, parse_offset, parse_start_time};
