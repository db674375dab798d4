use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::NaiveDate;
use thiserror::Error;

/// Input errors raised before any day is sampled.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PredictionError {
    #[error("Invalid duration: '{0}' (expected '1 week', '3 months', '6 months', '1 year' or '<N> days')")]
    InvalidDuration(String),

    #[error("Invalid capacity: {0} kW (must be a positive number)")]
    InvalidCapacity(f64),

    #[error("Invalid tilt angle: {0}° (must be within 0..=90)")]
    InvalidTiltAngle(f64),

    #[error("Invalid date range: {start} → {end} (end must be after start)")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },
}

/// Failures of the external live-metrics fetch. None of them is retried.
#[derive(Debug, Error)]
pub enum MetricsError {
    #[error("Please enter a valid API URL")]
    EmptyUrl,

    #[error("HTTP error! status: {status}")]
    Http { status: u16 },

    #[error("Transport error: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("Failed to decode metrics body: {0}")]
    Decode(#[source] reqwest::Error),

    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Errors surfaced by the HTTP handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Prediction(#[from] PredictionError),

    #[error(transparent)]
    Metrics(#[from] MetricsError),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    BadRequest(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Prediction(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Metrics(MetricsError::EmptyUrl) => StatusCode::BAD_REQUEST,
            ApiError::Metrics(MetricsError::ClientBuild(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Metrics(_) => StatusCode::BAD_GATEWAY,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let mut body = serde_json::json!({ "error": self.to_string() });
        if let ApiError::Metrics(MetricsError::Http { status: upstream }) = &self {
            body["upstream_status"] = serde_json::json!(upstream);
        }
        (status, Json(body)).into_response()
    }
}
