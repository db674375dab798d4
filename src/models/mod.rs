pub mod api;
pub mod duration;
pub mod metrics;
pub mod prediction;
