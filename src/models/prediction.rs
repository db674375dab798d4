use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::duration::DurationSpec;

// ─── Panel orientation ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, ToSchema)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    /// Orientation penalty relative to a south-facing panel.
    pub fn multiplier(self) -> f64 {
        match self {
            Direction::South => 1.0,
            Direction::East | Direction::West => 0.8,
            Direction::North => 0.6,
        }
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "north" | "n" => Ok(Direction::North),
            "south" | "s" => Ok(Direction::South),
            "east" | "e" => Ok(Direction::East),
            "west" | "w" => Ok(Direction::West),
            other => Err(format!("unknown panel direction '{}'", other)),
        }
    }
}

impl<'de> Deserialize<'de> for Direction {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

// ─── Weather ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum Weather {
    Sunny,
    #[serde(rename = "Partly Cloudy")]
    PartlyCloudy,
    Cloudy,
}

impl Weather {
    pub const ALL: [Weather; 3] = [Weather::Sunny, Weather::PartlyCloudy, Weather::Cloudy];

    /// Fraction of a clear day's yield.
    pub fn multiplier(self) -> f64 {
        match self {
            Weather::Sunny => 1.0,
            Weather::PartlyCloudy => 0.7,
            Weather::Cloudy => 0.4,
        }
    }
}

impl fmt::Display for Weather {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Weather::Sunny => "Sunny",
            Weather::PartlyCloudy => "Partly Cloudy",
            Weather::Cloudy => "Cloudy",
        })
    }
}

// ─── Engine input / output ───────────────────────────────────────────────────

/// Panel specification plus forecast horizon. Immutable per call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PredictionRequest {
    /// Free text, descriptive only
    pub location: String,
    /// Rated capacity (kW)
    pub capacity_kw: f64,
    /// Panel tilt (deg), 0..=90
    pub tilt_angle_deg: f64,
    pub direction: Direction,
    #[schema(value_type = String, example = "1 week")]
    pub duration: DurationSpec,
}

/// One simulated day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DailySample {
    /// Energy generated that day (kWh, 2 dp)
    pub output: f64,
    pub weather: Weather,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PredictionResult {
    pub daily_output: Vec<f64>,
    pub weather_conditions: Vec<Weather>,
    /// Sum of `daily_output` (kWh, 2 dp)
    pub total_output: f64,
    /// Weather-independent efficiency (%, 1 dp)
    pub efficiency_pct: f64,
    #[schema(value_type = String, example = "1 week")]
    pub duration: DurationSpec,
}

impl PredictionResult {
    pub fn samples(&self) -> impl Iterator<Item = DailySample> + '_ {
        self.daily_output
            .iter()
            .zip(&self.weather_conditions)
            .map(|(&output, &weather)| DailySample { output, weather })
    }

    pub fn day_count(&self) -> usize {
        self.daily_output.len()
    }
}

/// One bar of the output chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ChartBucket {
    pub label: String,
    /// kWh, 2 dp
    pub output: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_parsing() {
        assert_eq!("South".parse::<Direction>().unwrap(), Direction::South);
        assert_eq!(" west ".parse::<Direction>().unwrap(), Direction::West);
        assert_eq!("N".parse::<Direction>().unwrap(), Direction::North);
        assert!("Up".parse::<Direction>().is_err());

        let d: Direction = serde_json::from_str("\"east\"").unwrap();
        assert_eq!(d, Direction::East);
        assert_eq!(serde_json::to_string(&Direction::East).unwrap(), "\"East\"");
    }

    #[test]
    fn test_weather_wire_names() {
        assert_eq!(serde_json::to_string(&Weather::PartlyCloudy).unwrap(), "\"Partly Cloudy\"");
        assert_eq!(Weather::PartlyCloudy.to_string(), "Partly Cloudy");
        let w: Weather = serde_json::from_str("\"Cloudy\"").unwrap();
        assert_eq!(w, Weather::Cloudy);
    }

    #[test]
    fn test_samples_zip_parallel_arrays() {
        let result = PredictionResult {
            daily_output: vec![3.95, 1.58],
            weather_conditions: vec![Weather::Sunny, Weather::Cloudy],
            total_output: 5.53,
            efficiency_pct: 79.0,
            duration: DurationSpec::CustomDays(2),
        };
        let samples: Vec<_> = result.samples().collect();
        assert_eq!(samples.len(), 2);
        assert_eq!(samples[1], DailySample { output: 1.58, weather: Weather::Cloudy });
    }
}
