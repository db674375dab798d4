use utoipa::OpenApi;
use crate::controllers::{metrics_controller, prediction_controller, session_controller, system_controller};
use crate::models::{api, metrics, prediction};
use crate::services::kpi_service;

#[derive(OpenApi)]
#[openapi(
    paths(
        prediction_controller::create_prediction,
        prediction_controller::get_current_prediction,
        prediction_controller::get_current_chart,
        prediction_controller::get_current_kpis,
        prediction_controller::get_current_metrics,
        metrics_controller::fetch_metrics,
        session_controller::login,
        session_controller::logout,
        session_controller::get_session,
        system_controller::get_health
    ),
    components(
        schemas(
            api::PredictionForm,
            api::DateRange,
            api::PredictionResponse,
            api::FetchMetricsRequest,
            api::LoginRequest,
            api::SessionInfo,
            api::HealthStatus,
            prediction::Direction,
            prediction::Weather,
            prediction::PredictionRequest,
            prediction::PredictionResult,
            prediction::ChartBucket,
            metrics::SolarMetrics,
            kpi_service::KpiReport
        )
    ),
    tags(
        (name = "solar-forecast", description = "Solar Output Forecast API")
    )
)]
pub struct ApiDoc;
