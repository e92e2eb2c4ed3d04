use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use brevet_core::{format_time, parse_start_time, CoreConfig};
use brevet_times::{brackets, control_window, BrevetPlan, ControlSchedule, SpeedBracket};
use chrono::FixedOffset;
use serde::{Deserialize, Serialize};
use tokio::sync::oneshot;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::error::ApiError;

#[derive(Debug, Clone, Deserialize)]
pub struct CalcTimesQuery {
    pub km: f64,
    pub brevet_dist_km: f64,
    pub begin_date: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalcTimesResult {
    pub open: String,
    pub close: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalcTimesResponse {
    pub result: CalcTimesResult,
}

#[derive(Clone)]
struct ServiceState {
    default_offset: FixedOffset,
}

/// Configuration for the HTTP API.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub bind_address: String,
    /// Offset applied to `begin_date` values given without one.
    pub default_offset: FixedOffset,
}

impl From<&CoreConfig> for ServiceConfig {
    fn from(config: &CoreConfig) -> Self {
        Self {
            bind_address: config.http_bind.clone(),
            default_offset: config.default_offset,
        }
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self::from(&CoreConfig::default())
    }
}

/// Composes the REST router of the control time service.
#[derive(Clone)]
pub struct ServiceApiBuilder {
    state: ServiceState,
}

impl ServiceApiBuilder {
    pub fn new(config: &ServiceConfig) -> Self {
        Self {
            state: ServiceState {
                default_offset: config.default_offset,
            },
        }
    }

    pub fn into_router(self) -> Router {
        Router::new()
            .route("/health", get(health))
            .route("/_calc_times", get(calc_times))
            .route("/v1/brackets", get(list_brackets))
            .route("/v1/schedule", post(build_schedule))
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive())
            .with_state(self.state)
    }

    /// Spawns an HTTP server binding to the configured address.
    pub async fn serve(self, config: ServiceConfig) -> anyhow::Result<oneshot::Sender<()>> {
        let (tx, rx) = oneshot::channel();
        let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
        let app = self.into_router();

        tokio::spawn(async move {
            info!(address = %config.bind_address, "starting brevet service");
            if let Err(err) = axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    let _ = rx.await;
                })
                .await
            {
                error!(?err, "brevet service terminated with error");
            }
        });

        Ok(tx)
    }
}

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn calc_times(
    State(state): State<ServiceState>,
    query: Result<Query<CalcTimesQuery>, QueryRejection>,
) -> Result<Json<CalcTimesResponse>, ApiError> {
    let Query(query) = query.map_err(|err| ApiError::BadRequest(err.body_text()))?;
    let start = parse_start_time(&query.begin_date, state.default_offset)?;
    let window = control_window(query.km, query.brevet_dist_km, &start)?;

    Ok(Json(CalcTimesResponse {
        result: CalcTimesResult {
            open: format_time(&window.open),
            close: format_time(&window.close),
        },
    }))
}

async fn list_brackets() -> Json<Vec<SpeedBracket>> {
    Json(brackets())
}

async fn build_schedule(
    payload: Result<Json<BrevetPlan>, JsonRejection>,
) -> Result<Json<ControlSchedule>, ApiError> {
    let Json(plan) = payload.map_err(|err| ApiError::BadRequest(err.body_text()))?;
    let schedule = ControlSchedule::build(&plan)?;
    Ok(Json(schedule))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_config_follows_core_config() {
        let mut core = CoreConfig::default();
        core.http_bind = "127.0.0.1:5050".into();
        let config = ServiceConfig::from(&core);
        assert_eq!(config.bind_address, "127.0.0.1:5050");
        assert_eq!(config.default_offset.local_minus_utc(), 0);
    }
}
