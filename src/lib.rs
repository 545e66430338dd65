pub mod config;
pub mod error;
pub mod infra;
pub mod telemetry;
pub mod workflows;
