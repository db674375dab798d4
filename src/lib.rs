//! Solar output forecasting: simulates daily energy for a panel setup over a
//! horizon, derives KPIs and chart buckets, and serves them over HTTP.

pub mod api_docs;
pub mod config;
pub mod controllers;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod shared_state;
