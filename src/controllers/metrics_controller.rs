use axum::{extract::State, Json};

use crate::error::ApiError;
use crate::models::api::FetchMetricsRequest;
use crate::models::metrics::SolarMetrics;
use crate::shared_state::AppState;

/// POST /api/metrics/fetch
/// Fetch live metrics from an external endpoint
///
/// Issues a single GET to the given URL and normalizes the JSON body. Metric
/// keys may be camelCase (`totalYield`) or labels (`"Total Yield"`); missing
/// values read as 0.
#[utoipa::path(
    post,
    path = "/api/metrics/fetch",
    request_body = FetchMetricsRequest,
    responses(
        (status = 200, description = "Normalized metrics", body = SolarMetrics),
        (status = 400, description = "Empty URL"),
        (status = 502, description = "Upstream HTTP or transport failure")
    )
)]
pub async fn fetch_metrics(
    State(state): State<AppState>,
    Json(body): Json<FetchMetricsRequest>,
) -> Result<Json<SolarMetrics>, ApiError> {
    let metrics = state.metrics.fetch(&body.url).await?;
    Ok(Json(metrics))
}
