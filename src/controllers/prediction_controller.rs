use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::config::Config;
use crate::error::ApiError;
use crate::models::api::{PredictionForm, PredictionResponse};
use crate::models::metrics::SolarMetrics;
use crate::models::prediction::ChartBucket;
use crate::services::chart_service;
use crate::services::kpi_service::KpiReport;
use crate::services::prediction_service;
use crate::shared_state::{AppState, StoredPrediction};

fn to_response(stored: StoredPrediction) -> PredictionResponse {
    let chart = chart_service::to_chart_buckets(&stored.result);
    let kpis = KpiReport::from_prediction(&stored.request, &stored.result);
    PredictionResponse {
        id: stored.id,
        created_at: stored.created_at,
        location: stored.request.location,
        result: stored.result,
        chart,
        kpis,
    }
}

fn current(state: &AppState) -> Result<StoredPrediction, ApiError> {
    state
        .current_prediction()
        .ok_or_else(|| ApiError::NotFound("No prediction generated yet".to_string()))
}

/// POST /api/predictions
/// Generate a prediction
///
/// Simulates daily output for the submitted panel and horizon, replacing the
/// session's current prediction.
#[utoipa::path(
    post,
    path = "/api/predictions",
    request_body = PredictionForm,
    responses(
        (status = 201, description = "Prediction generated", body = PredictionResponse),
        (status = 422, description = "Invalid capacity, tilt angle or duration")
    )
)]
pub async fn create_prediction(
    State(state): State<AppState>,
    State(config): State<Config>,
    Json(form): Json<PredictionForm>,
) -> Result<impl IntoResponse, ApiError> {
    let (request, result) = prediction_service::run_prediction(&form, &config.prediction)?;
    let stored = state.store_prediction(request, result);
    Ok((StatusCode::CREATED, Json(to_response(stored))))
}

/// GET /api/predictions/current
/// Get the current prediction
#[utoipa::path(
    get,
    path = "/api/predictions/current",
    responses(
        (status = 200, description = "Current prediction", body = PredictionResponse),
        (status = 404, description = "No prediction generated yet")
    )
)]
pub async fn get_current_prediction(
    State(state): State<AppState>,
) -> Result<Json<PredictionResponse>, ApiError> {
    Ok(Json(to_response(current(&state)?)))
}

/// GET /api/predictions/current/chart
/// Get chart buckets for the current prediction
///
/// Daily for a week or custom range, weekly for 3 months, monthly for 6 months and a year.
#[utoipa::path(
    get,
    path = "/api/predictions/current/chart",
    responses(
        (status = 200, description = "Chart buckets", body = Vec<ChartBucket>),
        (status = 404, description = "No prediction generated yet")
    )
)]
pub async fn get_current_chart(
    State(state): State<AppState>,
) -> Result<Json<Vec<ChartBucket>>, ApiError> {
    let stored = current(&state)?;
    Ok(Json(chart_service::to_chart_buckets(&stored.result)))
}

/// GET /api/predictions/current/kpis
/// Get KPIs for the current prediction
#[utoipa::path(
    get,
    path = "/api/predictions/current/kpis",
    responses(
        (status = 200, description = "Derived KPIs", body = KpiReport),
        (status = 404, description = "No prediction generated yet")
    )
)]
pub async fn get_current_kpis(
    State(state): State<AppState>,
) -> Result<Json<KpiReport>, ApiError> {
    let stored = current(&state)?;
    Ok(Json(KpiReport::from_prediction(&stored.request, &stored.result)))
}

/// GET /api/predictions/current/metrics
/// Get the current prediction in live-metrics shape
///
/// Yield, performance ratio and capacity factor are derived; the remaining
/// fields come from the configured site assumptions.
#[utoipa::path(
    get,
    path = "/api/predictions/current/metrics",
    responses(
        (status = 200, description = "Prediction as solar metrics", body = SolarMetrics),
        (status = 404, description = "No prediction generated yet")
    )
)]
pub async fn get_current_metrics(
    State(state): State<AppState>,
    State(config): State<Config>,
) -> Result<Json<SolarMetrics>, ApiError> {
    let stored = current(&state)?;
    let kpis = KpiReport::from_prediction(&stored.request, &stored.result);
    Ok(Json(kpis.to_solar_metrics(&config.site)))
}
