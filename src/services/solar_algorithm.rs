/// ============================================================
///  Daily Solar Output Estimation Engine
///
///  Algorithm pipeline:
///   1. Validation       – capacity > 0, tilt within 0..=90, bounded horizon
///   2. Day count        – resolved from the duration spec
///   3. Weather draw     – one condition per day from a WeatherSource
///   4. Daily output     – P_nom × η_tilt × k_weather × k_direction
///   5. Aggregation      – total yield + weather-independent efficiency
///
///  The tilt model is linear (η = 0.7 + 0.3 × tilt/100), not an
///  insolation model; expected outputs depend on it being exact.
/// ============================================================

use crate::error::PredictionError;
use crate::models::duration::{MAX_CUSTOM_DAYS, resolve_day_count};
use crate::models::prediction::{DailySample, Direction, PredictionRequest, PredictionResult};
use crate::services::weather::WeatherSource;

// ─── Model constants ─────────────────────────────────────────
const BASE_EFFICIENCY: f64 = 0.7;
const TILT_GAIN: f64 = 0.3;
const MAX_TILT_DEG: f64 = 90.0;

// Absorbs binary error so that e.g. 2.7649999999999997 rounds like 2.765.
const ROUNDING_NUDGE: f64 = 1e-9;

/// Round half away from zero to `places` decimals.
pub fn round_to(value: f64, places: i32) -> f64 {
    let scale = 10f64.powi(places);
    let scaled = value * scale;
    (scaled + scaled.signum() * ROUNDING_NUDGE).round() / scale
}

#[inline]
pub fn round2(value: f64) -> f64 {
    round_to(value, 2)
}

#[inline]
pub fn round1(value: f64) -> f64 {
    round_to(value, 1)
}

/// Tilt efficiency; increases monotonically with the angle.
pub fn efficiency_factor(tilt_angle_deg: f64) -> f64 {
    BASE_EFFICIENCY + (tilt_angle_deg / 100.0) * TILT_GAIN
}

pub fn direction_multiplier(direction: Direction) -> f64 {
    direction.multiplier()
}

/// Totals derived from a sampled series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aggregate {
    pub total_output: f64,
    pub efficiency_pct: f64,
}

/// Rejects requests the sampler must never see.
pub fn validate(request: &PredictionRequest) -> Result<(), PredictionError> {
    if !request.capacity_kw.is_finite() || request.capacity_kw <= 0.0 {
        return Err(PredictionError::InvalidCapacity(request.capacity_kw));
    }
    if !request.tilt_angle_deg.is_finite()
        || !(0.0..=MAX_TILT_DEG).contains(&request.tilt_angle_deg)
    {
        return Err(PredictionError::InvalidTiltAngle(request.tilt_angle_deg));
    }
    if resolve_day_count(&request.duration) > MAX_CUSTOM_DAYS {
        return Err(PredictionError::InvalidDuration(request.duration.to_string()));
    }
    Ok(())
}

/// Draws `day_count` independent days. Never fails for a validated request.
pub fn sample<W: WeatherSource>(
    request: &PredictionRequest,
    day_count: u32,
    weather: &mut W,
) -> Vec<DailySample> {
    let eta = efficiency_factor(request.tilt_angle_deg);
    let k_dir = direction_multiplier(request.direction);

    (0..day_count)
        .map(|_| {
            let condition = weather.next_weather();
            let output = round2(request.capacity_kw * eta * condition.multiplier() * k_dir);
            DailySample { output, weather: condition }
        })
        .collect()
}

pub fn aggregate(request: &PredictionRequest, samples: &[DailySample]) -> Aggregate {
    let total: f64 = samples.iter().map(|s| s.output).sum();
    let eta = efficiency_factor(request.tilt_angle_deg);
    let k_dir = direction_multiplier(request.direction);

    Aggregate {
        total_output: round2(total),
        efficiency_pct: round1(eta * k_dir * 100.0),
    }
}

/// Main entry point – one call per submitted form.
pub fn predict<W: WeatherSource>(
    request: &PredictionRequest,
    weather: &mut W,
) -> Result<PredictionResult, PredictionError> {
    validate(request)?;

    let day_count = resolve_day_count(&request.duration);
    let samples = sample(request, day_count, weather);
    let totals = aggregate(request, &samples);

    let (daily_output, weather_conditions): (Vec<f64>, Vec<_>) =
        samples.iter().map(|s| (s.output, s.weather)).unzip();

    Ok(PredictionResult {
        daily_output,
        weather_conditions,
        total_output: totals.total_output,
        efficiency_pct: totals.efficiency_pct,
        duration: request.duration,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::duration::{DurationPreset, DurationSpec};
    use crate::models::prediction::Weather;
    use crate::services::weather::{RandomWeather, ScriptedWeather};

    fn request(capacity_kw: f64, tilt: f64, direction: Direction, duration: DurationSpec) -> PredictionRequest {
        PredictionRequest {
            location: "New York".to_string(),
            capacity_kw,
            tilt_angle_deg: tilt,
            direction,
            duration,
        }
    }

    fn week(capacity_kw: f64, tilt: f64, direction: Direction) -> PredictionRequest {
        request(capacity_kw, tilt, direction, DurationSpec::Preset(DurationPreset::Week))
    }

    #[test]
    fn test_rounding() {
        assert_eq!(round2(2.7649999999999997), 2.77);
        assert_eq!(round2(1.234), 1.23);
        assert_eq!(round2(0.0), 0.0);
        assert_eq!(round1(78.99999999999999), 79.0);
        assert_eq!(round2(-1.005), -1.01);
    }

    #[test]
    fn test_reference_scenario_south_30deg() {
        let req = week(5.0, 30.0, Direction::South);
        let mut weather = ScriptedWeather::new([Weather::Sunny, Weather::PartlyCloudy, Weather::Cloudy]);
        let result = predict(&req, &mut weather).unwrap();

        assert_eq!(result.efficiency_pct, 79.0);
        assert_eq!(result.daily_output, vec![3.95, 2.77, 1.58, 3.95, 2.77, 1.58, 3.95]);
        assert_eq!(
            result.weather_conditions,
            vec![
                Weather::Sunny,
                Weather::PartlyCloudy,
                Weather::Cloudy,
                Weather::Sunny,
                Weather::PartlyCloudy,
                Weather::Cloudy,
                Weather::Sunny
            ]
        );
        assert_eq!(result.total_output, 20.55);
        assert_eq!(result.duration, DurationSpec::Preset(DurationPreset::Week));
    }

    #[test]
    fn test_length_matches_day_count() {
        for label in ["1 week", "3 months", "6 months", "1 year", "12 days", "0 days"] {
            let spec: DurationSpec = label.parse().unwrap();
            let req = request(4.0, 20.0, Direction::East, spec);
            let result = predict(&req, &mut RandomWeather::from_entropy()).unwrap();
            assert_eq!(result.daily_output.len() as u32, resolve_day_count(&spec), "{}", label);
            assert_eq!(result.weather_conditions.len(), result.daily_output.len());
        }
    }

    #[test]
    fn test_total_is_rounded_sum() {
        let req = request(7.5, 42.0, Direction::West, DurationSpec::Preset(DurationPreset::Year));
        for _ in 0..5 {
            let result = predict(&req, &mut RandomWeather::from_entropy()).unwrap();
            let sum: f64 = result.daily_output.iter().sum();
            assert_eq!(result.total_output, round2(sum));
        }
    }

    #[test]
    fn test_efficiency_ignores_weather() {
        let req = week(3.0, 15.0, Direction::North);
        let sunny = predict(&req, &mut ScriptedWeather::constant(Weather::Sunny)).unwrap();
        let cloudy = predict(&req, &mut ScriptedWeather::constant(Weather::Cloudy)).unwrap();
        let random = predict(&req, &mut RandomWeather::from_entropy()).unwrap();
        assert_eq!(sunny.efficiency_pct, cloudy.efficiency_pct);
        assert_eq!(sunny.efficiency_pct, random.efficiency_pct);
        // (0.7 + 0.045) * 0.6 * 100
        assert_eq!(sunny.efficiency_pct, 44.7);
    }

    #[test]
    fn test_zero_days_is_empty() {
        let req = request(5.0, 30.0, Direction::South, "0 days".parse().unwrap());
        let result = predict(&req, &mut RandomWeather::from_entropy()).unwrap();
        assert!(result.daily_output.is_empty());
        assert!(result.weather_conditions.is_empty());
        assert_eq!(result.total_output, 0.0);
    }

    #[test]
    fn test_invalid_capacity_rejected() {
        for capacity in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let req = week(capacity, 30.0, Direction::South);
            let err = predict(&req, &mut ScriptedWeather::constant(Weather::Sunny)).unwrap_err();
            assert!(matches!(err, PredictionError::InvalidCapacity(_)));
        }
    }

    #[test]
    fn test_invalid_tilt_rejected() {
        for tilt in [-0.5, 90.5, f64::NAN] {
            let req = week(5.0, tilt, Direction::South);
            let err = predict(&req, &mut ScriptedWeather::constant(Weather::Sunny)).unwrap_err();
            assert!(matches!(err, PredictionError::InvalidTiltAngle(_)));
        }
        assert!(validate(&week(5.0, 0.0, Direction::South)).is_ok());
        assert!(validate(&week(5.0, 90.0, Direction::South)).is_ok());
    }

    #[test]
    fn test_oversized_horizon_rejected_before_sampling() {
        let at_cap = request(5.0, 30.0, Direction::South, DurationSpec::CustomDays(MAX_CUSTOM_DAYS));
        let result = predict(&at_cap, &mut ScriptedWeather::constant(Weather::Sunny)).unwrap();
        assert_eq!(result.daily_output.len(), 366);

        let req = request(5.0, 30.0, Direction::South, DurationSpec::CustomDays(u32::MAX));
        let err = predict(&req, &mut ScriptedWeather::constant(Weather::Sunny)).unwrap_err();
        assert_eq!(err, PredictionError::InvalidDuration("4294967295 days".to_string()));
    }

    #[test]
    fn test_tilt_monotonicity() {
        let mut prev = efficiency_factor(0.0);
        for tilt in 1..=90 {
            let eta = efficiency_factor(tilt as f64);
            assert!(eta >= prev, "efficiency dropped at {}°", tilt);
            prev = eta;
        }
    }

    #[test]
    fn test_south_never_below_north() {
        for tilt in [0.0, 15.0, 30.0, 60.0, 90.0] {
            let south = aggregate(&week(5.0, tilt, Direction::South), &[]);
            let north = aggregate(&week(5.0, tilt, Direction::North), &[]);
            assert!(south.efficiency_pct >= north.efficiency_pct);
        }
    }

    #[test]
    fn test_seeded_runs_match() {
        let req = request(6.0, 25.0, Direction::South, DurationSpec::Preset(DurationPreset::ThreeMonths));
        let a = predict(&req, &mut RandomWeather::seeded(2024)).unwrap();
        let b = predict(&req, &mut RandomWeather::seeded(2024)).unwrap();
        assert_eq!(a, b);
    }
}
