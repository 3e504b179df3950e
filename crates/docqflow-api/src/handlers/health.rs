//! Health check handler.

use axum::Json;
use axum::extract::State;

use crate::dto::response::HealthResponse;
use crate::state::AppState;

/// GET /api/health
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let database = match docqflow_database::connection::health_check(&state.db_pool).await {
        Ok(true) => "up",
        _ => "down",
    };

    Json(HealthResponse {
        status: if database == "up" { "ok" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: database.to_string(),
    })
}
