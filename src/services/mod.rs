pub mod chart_service;
pub mod kpi_service;
pub mod metrics_service;
pub mod prediction_service;
pub mod solar_algorithm;
pub mod weather;
