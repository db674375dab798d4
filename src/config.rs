use std::path::Path;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::ConfigError;

fn default_port() -> u16 { 8080 }
fn default_timeout_s() -> u64 { 10 }
fn default_duration() -> String { "1 week".to_string() }

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub metrics: MetricsConfig,
    pub prediction: PredictionConfig,
    pub site: SiteAssumptions,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { port: default_port() }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct MetricsConfig {
    /// Request timeout for the live-metrics fetch
    #[serde(default = "default_timeout_s")]
    pub timeout_s: u64,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self { timeout_s: default_timeout_s() }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct PredictionConfig {
    /// Horizon used when a form names neither a duration nor a date range
    #[serde(default = "default_duration")]
    pub default_duration: String,
}

impl Default for PredictionConfig {
    fn default() -> Self {
        Self { default_duration: default_duration() }
    }
}

/// Site conditions the estimate does not model, reported alongside
/// derived KPIs.
#[derive(Debug, Deserialize, Serialize, Clone, ToSchema)]
#[serde(default)]
pub struct SiteAssumptions {
    pub insolation_kwh_m2: f64,
    pub irradiance_w_m2: f64,
    pub ambient_temp_c: f64,
    pub module_temp_c: f64,
    pub uptime_pct: f64,
    pub downtime_pct: f64,
    pub roi_pct: f64,
    pub technical_availability_pct: f64,
}

impl Default for SiteAssumptions {
    fn default() -> Self {
        Self {
            insolation_kwh_m2: 5.2,
            irradiance_w_m2: 800.0,
            ambient_temp_c: 25.0,
            module_temp_c: 45.0,
            uptime_pct: 98.5,
            downtime_pct: 1.5,
            roi_pct: 15.2,
            technical_availability_pct: 99.2,
        }
    }
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(content)?)
    }
}
