use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use brevet_core::BrevetError;
use brevet_times::{ScheduleError, TimeError};
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

/// Errors surfaced by the HTTP API as `{code, message}` bodies.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error(transparent)]
    Time(#[from] TimeError),
    #[error(transparent)]
    Schedule(#[from] ScheduleError),
    #[error(transparent)]
    Core(#[from] BrevetError),
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl ApiError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
            ApiError::Time(err) | ApiError::Schedule(ScheduleError::Time(err)) => time_code(err),
            ApiError::Schedule(ScheduleError::Control { source, .. }) => time_code(source),
            ApiError::Schedule(_) => (StatusCode::BAD_REQUEST, "invalid_plan"),
            ApiError::Core(BrevetError::InvalidStartTime(_)) => {
                (StatusCode::BAD_REQUEST, "invalid_start_time")
            }
            ApiError::Core(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal"),
        }
    }
}

fn time_code(err: &TimeError) -> (StatusCode, &'static str) {
    match err {
        TimeError::InvalidDistance(_) => (StatusCode::BAD_REQUEST, "invalid_distance"),
        TimeError::UnsupportedBrevetDistance(_) => {
            (StatusCode::BAD_REQUEST, "unsupported_brevet_distance")
        }
        TimeError::OutOfRange(_) => (StatusCode::UNPROCESSABLE_ENTITY, "out_of_range"),
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        debug!(%status, code, error = %self, "request rejected");
        let body = ErrorResponse {
            code: code.to_string(),
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
