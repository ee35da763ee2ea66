use crate::api::AppState;
use crate::api::schemas::health::HealthResponse;
use axum::{Json, extract::State};

/// Reports process liveness and whether the storage connection is established.
///
/// Always answers 200; the `database` field carries the readiness state.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let database = if state.health_service.database_connected() { "connected" } else { "disconnected" };

    Json(HealthResponse { status: "ok".to_string(), database: database.to_string() })
}
