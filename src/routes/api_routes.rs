use axum::{routing::{get, post}, Router};
use crate::controllers::{
    // Prediction engine
    prediction_controller::{
        create_prediction, get_current_prediction, get_current_chart,
        get_current_kpis, get_current_metrics,
    },
    // Live metrics
    metrics_controller::fetch_metrics,
    // Session & system
    session_controller::{login, logout, get_session},
    system_controller::get_health,
};
use crate::shared_state::SharedState;

/// Build the `/api/*` sub-router.
/// Handlers extract `State<AppState>` and/or `State<Config>` via
/// `FromRef<SharedState>` — a single `.with_state(shared)` covers both.
pub fn api_routes(shared: SharedState) -> Router {
    Router::new()
        .route("/predictions",                 post(create_prediction))
        .route("/predictions/current",         get(get_current_prediction))
        .route("/predictions/current/chart",   get(get_current_chart))
        .route("/predictions/current/kpis",    get(get_current_kpis))
        .route("/predictions/current/metrics", get(get_current_metrics))
        .route("/metrics/fetch",               post(fetch_metrics))
        .route("/session",                     get(get_session))
        .route("/session/login",               post(login))
        .route("/session/logout",              post(logout))
        .route("/health",                      get(get_health))
        .with_state(shared)
}
