//! Health check endpoint for container orchestration.
//!
//! Provides a liveness probe that returns 200 OK with a small JSON body when
//! the process is running. Used by orchestrators, dev runners and load
//! balancers to verify the service is alive.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::state::AppState;

/// Payload returned by `GET /health`.
///
/// Field order is the serialization order: `{"status":"ok","service":"..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub service: String,
}

impl HealthStatus {
    pub fn ok(service: impl Into<String>) -> Self {
        Self {
            status: "ok",
            service: service.into(),
        }
    }
}

/// Health check handler.
///
/// This is a liveness probe: it only checks that the process can respond to HTTP.
pub async fn health(State(state): State<AppState>) -> Json<HealthStatus> {
    tracing::debug!(service = %state.service_name(), "Health check");
    Json(HealthStatus::ok(state.service_name()))
}
