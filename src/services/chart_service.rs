//! Re-buckets a daily series for charting.
//!
//! Month and week cut-offs are fixed spans (7-day weeks, 30-day months), not
//! calendar-aware. A year chart shows 12 × 30 days, so days 361–365 never
//! appear in it.

use crate::models::duration::{DurationPreset, DurationSpec};
use crate::models::prediction::{ChartBucket, PredictionResult};
use crate::services::solar_algorithm::round2;

const WEEKS_PER_QUARTER: usize = 13;
const DAYS_PER_WEEK: usize = 7;
const HALF_YEAR_MONTHS: usize = 6;
const DAYS_PER_MONTH: usize = 30;
const MONTHS_PER_YEAR: usize = 12;
const DAYS_PER_YEAR: usize = 365;

pub fn bucket(daily_output: &[f64], duration: &DurationSpec) -> Vec<ChartBucket> {
    match duration {
        DurationSpec::Preset(DurationPreset::Week) | DurationSpec::CustomDays(_) => per_day(daily_output),
        DurationSpec::Preset(DurationPreset::ThreeMonths) => {
            grouped(daily_output, WEEKS_PER_QUARTER, DAYS_PER_WEEK, "Week")
        }
        DurationSpec::Preset(DurationPreset::SixMonths) => {
            grouped(daily_output, HALF_YEAR_MONTHS, DAYS_PER_MONTH, "Month")
        }
        DurationSpec::Preset(DurationPreset::Year) => grouped(
            daily_output,
            MONTHS_PER_YEAR,
            DAYS_PER_YEAR / MONTHS_PER_YEAR,
            "Month",
        ),
    }
}

/// Buckets by a raw duration label. An exact label is parsed; otherwise the
/// first keyword found in it ("week", "3 months", "6 months", "year",
/// "days") picks the shape. A label with none of them charts nothing.
pub fn bucket_by_label(daily_output: &[f64], label: &str) -> Vec<ChartBucket> {
    match label.parse::<DurationSpec>().ok().or_else(|| shape_from_keyword(label)) {
        Some(spec) => bucket(daily_output, &spec),
        None => Vec::new(),
    }
}

fn shape_from_keyword(label: &str) -> Option<DurationSpec> {
    let label = label.to_lowercase();
    let preset = |p| Some(DurationSpec::Preset(p));
    if label.contains("week") {
        preset(DurationPreset::Week)
    } else if label.contains("3 months") {
        preset(DurationPreset::ThreeMonths)
    } else if label.contains("6 months") {
        preset(DurationPreset::SixMonths)
    } else if label.contains("year") {
        preset(DurationPreset::Year)
    } else if label.contains("days") {
        // per-day charts ignore the count
        Some(DurationSpec::CustomDays(0))
    } else {
        None
    }
}

pub fn to_chart_buckets(result: &PredictionResult) -> Vec<ChartBucket> {
    bucket(&result.daily_output, &result.duration)
}

fn per_day(daily_output: &[f64]) -> Vec<ChartBucket> {
    daily_output
        .iter()
        .enumerate()
        .map(|(i, &output)| ChartBucket {
            label: format!("Day {}", i + 1),
            output: round2(output),
        })
        .collect()
}

/// Exactly `count` buckets of `span` days; ranges past the end sum to 0.
fn grouped(daily_output: &[f64], count: usize, span: usize, prefix: &str) -> Vec<ChartBucket> {
    let n = daily_output.len();
    (0..count)
        .map(|i| {
            let start = (i * span).min(n);
            let end = (start + span).min(n);
            let total: f64 = daily_output[start..end].iter().sum();
            ChartBucket {
                label: format!("{} {}", prefix, i + 1),
                output: round2(total),
            }
        })
        .collect()
}
