use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::PredictionError;

/// Longest custom horizon accepted, one leap year.
pub const MAX_CUSTOM_DAYS: u32 = 366;

/// Named forecast horizons offered by the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DurationPreset {
    Week,
    ThreeMonths,
    SixMonths,
    Year,
}

impl DurationPreset {
    pub const ALL: [DurationPreset; 4] = [
        DurationPreset::Week,
        DurationPreset::ThreeMonths,
        DurationPreset::SixMonths,
        DurationPreset::Year,
    ];

    pub fn label(self) -> &'static str {
        match self {
            DurationPreset::Week => "1 week",
            DurationPreset::ThreeMonths => "3 months",
            DurationPreset::SixMonths => "6 months",
            DurationPreset::Year => "1 year",
        }
    }

    pub fn day_count(self) -> u32 {
        match self {
            DurationPreset::Week => 7,
            DurationPreset::ThreeMonths => 90,
            DurationPreset::SixMonths => 180,
            DurationPreset::Year => 365,
        }
    }
}

/// Forecast horizon, resolved once from its label at the boundary.
///
/// Serialized as its label (`"1 week"`, `"12 days"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum DurationSpec {
    Preset(DurationPreset),
    CustomDays(u32),
}

impl DurationSpec {
    /// Whole-day span between two dates, as picked in a custom range.
    pub fn from_date_range(start: NaiveDate, end: NaiveDate) -> Result<Self, PredictionError> {
        let days = end.signed_duration_since(start).num_days();
        if days <= 0 {
            return Err(PredictionError::InvalidDateRange { start, end });
        }
        if days > i64::from(MAX_CUSTOM_DAYS) {
            return Err(PredictionError::InvalidDuration(format!("{} days", days)));
        }
        let days = u32::try_from(days).map_err(|_| PredictionError::InvalidDateRange { start, end })?;
        Ok(DurationSpec::CustomDays(days))
    }
}

/// Number of days sampled for a horizon.
pub fn resolve_day_count(spec: &DurationSpec) -> u32 {
    match spec {
        DurationSpec::Preset(preset) => preset.day_count(),
        DurationSpec::CustomDays(days) => *days,
    }
}

impl fmt::Display for DurationSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DurationSpec::Preset(preset) => f.write_str(preset.label()),
            DurationSpec::CustomDays(days) => write!(f, "{} days", days),
        }
    }
}

impl FromStr for DurationSpec {
    type Err = PredictionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || PredictionError::InvalidDuration(s.to_string());

        let normalized = s.trim().to_lowercase();
        let normalized = normalized
            .strip_prefix("last ")
            .map(str::trim_start)
            .unwrap_or(normalized.as_str());

        if let Some(preset) = DurationPreset::ALL.iter().find(|p| p.label() == normalized) {
            return Ok(DurationSpec::Preset(*preset));
        }

        let count = normalized
            .strip_suffix("days")
            .or_else(|| normalized.strip_suffix("day"))
            .ok_or_else(invalid)?
            .trim_end();
        if count.is_empty() || !count.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        match count.parse::<u32>() {
            Ok(days) if days <= MAX_CUSTOM_DAYS => Ok(DurationSpec::CustomDays(days)),
            _ => Err(invalid()),
        }
    }
}

impl TryFrom<String> for DurationSpec {
    type Error = PredictionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DurationSpec> for String {
    fn from(value: DurationSpec) -> Self {
        value.to_string()
    }
}
