//! Health check endpoint for container orchestration.
//!
//! A liveness probe: returns 200 OK whenever the process can answer HTTP. It does
//! not look at the export file; `/prompts` reports that with a 503.

use axum::Json;
use serde::Serialize;

/// Body of the liveness response.
#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
}

/// Health check handler.
pub async fn health() -> Json<HealthStatus> {
    Json(HealthStatus { status: "ok" })
}
