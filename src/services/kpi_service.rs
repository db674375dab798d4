use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::config::SiteAssumptions;
use crate::models::metrics::SolarMetrics;
use crate::models::prediction::{PredictionRequest, PredictionResult, Weather};
use crate::services::solar_algorithm::{round1, round2};

const HOURS_PER_DAY: f64 = 24.0;

/// Presentation KPIs derived from one prediction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct KpiReport {
    /// Total yield over the horizon (kWh)
    pub total_yield_kwh: f64,
    /// Same as the prediction's efficiency (%)
    pub performance_ratio_pct: f64,
    /// Yield over rated-capacity energy for the horizon (%, 1 dp)
    pub capacity_factor_pct: f64,
    /// kWh per kWp installed
    pub specific_yield_kwh_kwp: f64,
    pub average_daily_kwh: f64,
    pub peak_daily_kwh: f64,
    pub sunny_days: usize,
    pub partly_cloudy_days: usize,
    pub cloudy_days: usize,
    pub days: usize,
}

impl KpiReport {
    pub fn from_prediction(request: &PredictionRequest, result: &PredictionResult) -> Self {
        let days = result.day_count();
        let total = result.total_output;
        let capacity = request.capacity_kw;

        let count = |w: Weather| result.weather_conditions.iter().filter(|&&c| c == w).count();

        let (capacity_factor_pct, average_daily_kwh) = if days == 0 || capacity <= 0.0 {
            (0.0, 0.0)
        } else {
            let rated_kwh = capacity * HOURS_PER_DAY * days as f64;
            (round1(total / rated_kwh * 100.0), round2(total / days as f64))
        };

        let specific_yield_kwh_kwp = if capacity > 0.0 { round2(total / capacity) } else { 0.0 };

        Self {
            total_yield_kwh: total,
            performance_ratio_pct: result.efficiency_pct,
            capacity_factor_pct,
            specific_yield_kwh_kwp,
            average_daily_kwh,
            peak_daily_kwh: result.daily_output.iter().copied().fold(0.0, f64::max),
            sunny_days: count(Weather::Sunny),
            partly_cloudy_days: count(Weather::PartlyCloudy),
            cloudy_days: count(Weather::Cloudy),
            days,
        }
    }

    /// Projects the report onto the live-metrics shape. Quantities the
    /// estimate does not model come from the configured site assumptions.
    pub fn to_solar_metrics(&self, site: &SiteAssumptions) -> SolarMetrics {
        SolarMetrics {
            total_yield: self.total_yield_kwh,
            performance_ratio: self.performance_ratio_pct,
            insolation: site.insolation_kwh_m2,
            irradiance: site.irradiance_w_m2,
            ambient_temperature: site.ambient_temp_c,
            module_temperature: site.module_temp_c,
            uptime: site.uptime_pct,
            downtime: site.downtime_pct,
            capacity_factor: self.capacity_factor_pct,
            roi: site.roi_pct,
            technical_availability: site.technical_availability_pct,
        }
    }
}
