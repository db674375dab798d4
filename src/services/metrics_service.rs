//! Live metrics from an externally supplied monitoring endpoint.
//!
//! The endpoint may name each metric either in camelCase or by its
//! dashboard label ("Total Yield"). Normalization is a merge over a fixed
//! key table: the first key holding a non-zero number wins, otherwise 0.
//! Nothing is coerced and a single failed fetch is final.

use std::time::Duration;

use reqwest::Client;
use serde_json::{Map, Value};
use tracing::{debug, error, info};

use crate::error::MetricsError;
use crate::models::metrics::SolarMetrics;

/// internal key → accepted source keys, in priority order
pub const METRIC_KEYS: [(&str, [&str; 2]); 11] = [
    ("totalYield", ["totalYield", "Total Yield"]),
    ("performanceRatio", ["performanceRatio", "Performance Ratio"]),
    ("insolation", ["insolation", "Insolation (Sky Facing)"]),
    ("irradiance", ["irradiance", "Irradiance (Sky Facing)"]),
    ("ambientTemperature", ["ambientTemperature", "Ambient Temperature"]),
    ("moduleTemperature", ["moduleTemperature", "Module Temperature"]),
    ("uptime", ["uptime", "Uptime"]),
    ("downtime", ["downtime", "Downtime"]),
    ("capacityFactor", ["capacityFactor", "Capacity Factor"]),
    ("roi", ["roi", "ROI"]),
    ("technicalAvailability", ["technicalAvailability", "Technical Availability"]),
];

fn truthy_number(value: &Value) -> Option<f64> {
    value.as_f64().filter(|v| *v != 0.0 && !v.is_nan())
}

/// Maps an arbitrary JSON body onto [`SolarMetrics`]. A non-object body
/// normalizes to all zeros.
pub fn normalize_metrics(body: &Value) -> SolarMetrics {
    let empty = Map::new();
    let source = body.as_object().unwrap_or(&empty);

    // bindings follow METRIC_KEYS order
    let [
        total_yield,
        performance_ratio,
        insolation,
        irradiance,
        ambient_temperature,
        module_temperature,
        uptime,
        downtime,
        capacity_factor,
        roi,
        technical_availability,
    ] = METRIC_KEYS.map(|(_, accepted)| {
        accepted
            .iter()
            .find_map(|key| source.get(*key).and_then(truthy_number))
            .unwrap_or(0.0)
    });

    SolarMetrics {
        total_yield,
        performance_ratio,
        insolation,
        irradiance,
        ambient_temperature,
        module_temperature,
        uptime,
        downtime,
        capacity_factor,
        roi,
        technical_availability,
    }
}

#[derive(Debug, Clone)]
pub struct MetricsClient {
    client: Client,
}

impl MetricsClient {
    pub fn new(timeout: Duration) -> Result<Self, MetricsError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(MetricsError::ClientBuild)?;
        Ok(Self { client })
    }

    /// GET `url` and normalize its JSON body.
    pub async fn fetch(&self, url: &str) -> Result<SolarMetrics, MetricsError> {
        let url = url.trim();
        if url.is_empty() {
            return Err(MetricsError::EmptyUrl);
        }

        info!("[METRICS] Fetching solar metrics from: {}", url);
        let response = self.client.get(url).send().await.map_err(|e| {
            error!("[METRICS] Transport failure for {}: {}", url, e);
            MetricsError::Transport(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            error!("[METRICS] {} answered HTTP {}", url, status.as_u16());
            return Err(MetricsError::Http { status: status.as_u16() });
        }

        let body: Value = response.json().await.map_err(|e| {
            error!("[METRICS] Invalid JSON from {}: {}", url, e);
            MetricsError::Decode(e)
        })?;
        debug!("[METRICS] API response: {}", body);

        Ok(normalize_metrics(&body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;
    use serde_json::json;

    fn client() -> MetricsClient {
        MetricsClient::new(Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_label_and_camel_keys() {
        let metrics = normalize_metrics(&json!({ "Total Yield": 120, "uptime": 98.5 }));
        assert_eq!(metrics.total_yield, 120.0);
        assert_eq!(metrics.uptime, 98.5);
        assert_eq!(
            metrics,
            SolarMetrics { total_yield: 120.0, uptime: 98.5, ..SolarMetrics::default() }
        );
    }

    #[test]
    fn test_camel_key_wins_over_label() {
        let metrics = normalize_metrics(&json!({ "roi": 12.5, "ROI": 99.0 }));
        assert_eq!(metrics.roi, 12.5);
    }

    #[test]
    fn test_falsy_camel_value_falls_back_to_label() {
        let metrics = normalize_metrics(&json!({
            "performanceRatio": 0,
            "Performance Ratio": 81.2,
            "irradiance": null,
            "Irradiance (Sky Facing)": 640
        }));
        assert_eq!(metrics.performance_ratio, 81.2);
        assert_eq!(metrics.irradiance, 640.0);
    }

    #[test]
    fn test_every_label_is_accepted() {
        let body: Map<String, Value> = METRIC_KEYS
            .iter()
            .map(|(_, accepted)| (accepted[1].to_string(), json!(1.5)))
            .collect();
        let metrics = normalize_metrics(&Value::Object(body));
        let round_trip = serde_json::to_value(&metrics).unwrap();
        for (internal, _) in METRIC_KEYS {
            assert_eq!(round_trip[internal], json!(1.5), "{}", internal);
        }
    }

    #[test]
    fn test_each_key_lands_in_its_own_field() {
        let metrics = normalize_metrics(&json!({
            "totalYield": 1, "performanceRatio": 2, "insolation": 3, "irradiance": 4,
            "ambientTemperature": 5, "moduleTemperature": 6, "uptime": 7, "downtime": 8,
            "capacityFactor": 9, "roi": 10, "technicalAvailability": 11
        }));
        assert_eq!(
            metrics,
            SolarMetrics {
                total_yield: 1.0,
                performance_ratio: 2.0,
                insolation: 3.0,
                irradiance: 4.0,
                ambient_temperature: 5.0,
                module_temperature: 6.0,
                uptime: 7.0,
                downtime: 8.0,
                capacity_factor: 9.0,
                roi: 10.0,
                technical_availability: 11.0,
            }
        );
    }

    #[test]
    fn test_non_numeric_and_non_object_bodies() {
        let metrics = normalize_metrics(&json!({ "uptime": "98.5", "downtime": true }));
        assert_eq!(metrics, SolarMetrics::default());
        assert_eq!(normalize_metrics(&json!([1, 2, 3])), SolarMetrics::default());
        assert_eq!(normalize_metrics(&Value::Null), SolarMetrics::default());
    }

    #[tokio::test]
    async fn test_fetch_success() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/solar-metrics")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(json!({ "Total Yield": 120, "uptime": 98.5 }).to_string())
            .create_async()
            .await;

        let url = format!("{}/solar-metrics", server.url());
        let metrics = client().fetch(&url).await.unwrap();

        assert_eq!(metrics.total_yield, 120.0);
        assert_eq!(metrics.uptime, 98.5);
        assert_eq!(metrics.roi, 0.0);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_http_error() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/solar-metrics")
            .with_status(503)
            .create_async()
            .await;

        let url = format!("{}/solar-metrics", server.url());
        let result = client().fetch(&url).await;

        assert!(matches!(result, Err(MetricsError::Http { status: 503 })));
        // exactly one hit: no retry
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_invalid_json() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/solar-metrics")
            .with_status(200)
            .with_body("not json")
            .create_async()
            .await;

        let url = format!("{}/solar-metrics", server.url());
        let result = client().fetch(&url).await;
        assert!(matches!(result, Err(MetricsError::Decode(_))));
    }

    #[tokio::test]
    async fn test_fetch_transport_error() {
        // Port 9 (discard) on loopback is closed in test environments.
        let result = client().fetch("http://127.0.0.1:9/metrics").await;
        assert!(matches!(result, Err(MetricsError::Transport(_))));
    }

    #[tokio::test]
    async fn test_fetch_empty_url() {
        let result = client().fetch("   ").await;
        assert!(matches!(result, Err(MetricsError::EmptyUrl)));
    }
}
