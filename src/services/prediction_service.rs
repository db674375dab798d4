use tracing::{debug, info};

use crate::config::PredictionConfig;
use crate::error::PredictionError;
use crate::models::api::PredictionForm;
use crate::models::duration::{resolve_day_count, DurationSpec};
use crate::models::prediction::{PredictionRequest, PredictionResult};
use crate::services::solar_algorithm;
use crate::services::weather::RandomWeather;

/// Resolves the horizon of a submitted form: an explicit date range wins,
/// then the duration label, then the configured default.
pub fn resolve_duration(
    form: &PredictionForm,
    config: &PredictionConfig,
) -> Result<DurationSpec, PredictionError> {
    if let Some(range) = form.date_range {
        return DurationSpec::from_date_range(range.start, range.end);
    }
    match form.duration.as_deref() {
        Some(label) => label.parse(),
        None => config.default_duration.parse(),
    }
}

pub fn build_request(
    form: &PredictionForm,
    config: &PredictionConfig,
) -> Result<PredictionRequest, PredictionError> {
    Ok(PredictionRequest {
        location: form.location.trim().to_string(),
        capacity_kw: form.capacity_kw,
        tilt_angle_deg: form.tilt_angle_deg,
        direction: form.direction,
        duration: resolve_duration(form, config)?,
    })
}

/// Runs one prediction for a submitted form. Unseeded forms draw fresh
/// weather on every call.
pub fn run_prediction(
    form: &PredictionForm,
    config: &PredictionConfig,
) -> Result<(PredictionRequest, PredictionResult), PredictionError> {
    let request = build_request(form, config)?;
    debug!("[PREDICT] Resolved request: {:?}", request);

    let result = match form.seed {
        Some(seed) => solar_algorithm::predict(&request, &mut RandomWeather::seeded(seed))?,
        None => solar_algorithm::predict(&request, &mut RandomWeather::from_entropy())?,
    };

    info!(
        "[PREDICT] Location: {} | {} kW @ {:.0}° {:?} | {} ({} days) | Total: {:.2} kWh | Efficiency: {:.1}%",
        if request.location.is_empty() { "-" } else { request.location.as_str() },
        request.capacity_kw,
        request.tilt_angle_deg,
        request.direction,
        request.duration,
        resolve_day_count(&request.duration),
        result.total_output,
        result.efficiency_pct
    );

    Ok((request, result))
}
