pub mod api;
pub mod app;
pub mod clients;
pub mod config;
pub mod metrics;
pub mod research;
pub mod telemetry;
