//! HTTP API for ACP brevet control times.
//!
//! Exposes the calculator over REST so that web forms can fetch control
//! windows as the organiser types distances, plus whole-plan scheduling.

mod api;
mod error;

pub use api::{
    CalcTimesQuery, CalcTimesResponse, CalcTimesResult, ServiceApiBuilder, ServiceConfig,
};
pub use error::{ApiError, ErrorResponse};
