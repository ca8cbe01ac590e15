//! # bgplab-telemetry
//!
//! Observability for the simulation controller: tracing subscriber
//! bootstrap and a Prometheus metrics recorder.

pub mod logging;
pub mod metrics;

pub use logging::EventLogger;
pub use metrics::MetricsRecorder;
