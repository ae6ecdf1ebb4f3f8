//! Liveness and build information endpoints for container orchestration.

use axum::{extract::State, Json};

use crate::config::BuildInfo;
use crate::state::AppState;

/// Health check handler.
///
/// Returns a simple "ok" response to indicate the service is running.
/// This is a liveness probe - it only checks that the process can respond to HTTP.
pub async fn health() -> &'static str {
    "ok"
}

/// Build record of the running page: version, build number and environment.
pub async fn version(State(state): State<AppState>) -> Json<BuildInfo> {
    Json(state.build.as_ref().clone())
}
