use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::prediction::{ChartBucket, Direction, PredictionResult};
use crate::services::kpi_service::KpiReport;

// ─── Prediction ──────────────────────────────────────────────────────────────

/// Body of `POST /api/predictions`, shaped like the dashboard form.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct PredictionForm {
    #[serde(default)]
    pub location: String,
    pub capacity_kw: f64,
    pub tilt_angle_deg: f64,
    pub direction: Direction,
    /// Preset or custom label, e.g. "3 months" or "12 days"
    #[serde(default)]
    pub duration: Option<String>,
    /// Custom range; takes precedence over `duration`
    #[serde(default)]
    pub date_range: Option<DateRange>,
    /// Fixes the weather draws for reproducible runs
    #[serde(default)]
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PredictionResponse {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub location: String,
    pub result: PredictionResult,
    pub chart: Vec<ChartBucket>,
    pub kpis: KpiReport,
}

// ─── Live metrics ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct FetchMetricsRequest {
    pub url: String,
}

// ─── Session ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub username: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SessionInfo {
    pub authenticated: bool,
    pub user: Option<String>,
}

// ─── System ──────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthStatus {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub has_prediction: bool,
}
