use std::net::SocketAddr;
use axum::{Router, routing::get, response::Html};
use solar_forecast::api_docs::ApiDoc;
use solar_forecast::config::Config;
use solar_forecast::error::ConfigError;
use solar_forecast::routes::api_routes::api_routes;
use solar_forecast::shared_state::SharedState;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;
use utoipa::OpenApi;
use utoipa_scalar::Scalar;

const CONFIG_ENV: &str = "SOLAR_FORECAST_CONFIG";

fn init_tracing() {
    let default_level = if cfg!(feature = "verbose_log") { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn load_config() -> Result<Config, ConfigError> {
    let path = std::env::var(CONFIG_ENV).unwrap_or_else(|_| "config.json".to_string());
    match Config::load(&path) {
        Ok(c) => Ok(c),
        Err(ConfigError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
            warn!("{} not found, using defaults", path);
            Ok(Config::default())
        }
        Err(e) => Err(e),
    }
}

#[tokio::main]
async fn main() {
    init_tracing();

    // 1. Load configuration
    let config = match load_config() {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return;
        }
    };
    info!(
        "Configuration loaded: default horizon '{}', metrics timeout {}s",
        config.prediction.default_duration, config.metrics.timeout_s
    );

    // 2. Initialize shared state
    let shared = match SharedState::new(config.clone()) {
        Ok(s) => s,
        Err(e) => {
            error!("Failed to initialize state: {}", e);
            return;
        }
    };

    // 3. Start Axum HTTP server
    let app = Router::new()
        .nest("/api", api_routes(shared))
        .route("/scalar", get(|| async {
            Html(Scalar::new(ApiDoc::openapi()).to_html())
        }))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    info!("API Server listening on http://{}", addr);
    info!("Scalar UI: http://{}/scalar", addr);

    if let Err(e) = axum_server::bind(addr)
        .serve(app.into_make_service())
        .await
    {
        error!("HTTP server error: {}", e);
    }
}
