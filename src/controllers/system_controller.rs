use axum::{extract::State, Json};

use crate::models::api::HealthStatus;
use crate::shared_state::AppState;

/// GET /api/health
#[utoipa::path(
    get,
    path = "/api/health",
    responses((status = 200, description = "Service health", body = HealthStatus))
)]
pub async fn get_health(State(state): State<AppState>) -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.uptime().as_secs(),
        has_prediction: state.current_prediction().is_some(),
    })
}
