//! # Tentvakt Telemetry
//!
//! Structured logging and metrics for the proctoring monitor.

pub mod logging;
pub mod metrics;

pub use logging::EventLogger;
pub use metrics::MetricsRecorder;
