use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Live plant metrics as exposed by an external monitoring endpoint,
/// normalized to fixed camelCase keys.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct SolarMetrics {
    /// Energy output (kWh)
    pub total_yield: f64,
    /// Performance ratio (%)
    pub performance_ratio: f64,
    /// Sky-facing insolation (kWh/m²)
    pub insolation: f64,
    /// Sky-facing irradiance (W/m²)
    pub irradiance: f64,
    /// °C
    pub ambient_temperature: f64,
    /// °C
    pub module_temperature: f64,
    /// %
    pub uptime: f64,
    /// %
    pub downtime: f64,
    /// %
    pub capacity_factor: f64,
    /// Annual return on investment (%)
    pub roi: f64,
    /// %
    pub technical_availability: f64,
}
