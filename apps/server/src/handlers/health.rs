//! Health check endpoint.

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use tracing::warn;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub database: bool,
    pub migrations_applied: usize,
    pub migrations_total: usize,
    pub version: &'static str,
}

/// GET /healthz
///
/// 200 when the database answers and every embedded migration is applied,
/// 503 otherwise.
pub async fn healthz(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let (migrations_total, migrations_applied) = match state.db.migration_status().await {
        Ok(counts) => counts,
        Err(e) => {
            warn!(error = %e, "Migration status unavailable");
            (0, 0)
        }
    };
    let database = state.db.health_check().await
        && migrations_total > 0
        && migrations_applied == migrations_total;

    let (status, label) = if database {
        (StatusCode::OK, "ok")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "degraded")
    };

    (
        status,
        Json(HealthResponse {
            status: label,
            database,
            migrations_applied,
            migrations_total,
            version: env!("CARGO_PKG_VERSION"),
        }),
    )
}
