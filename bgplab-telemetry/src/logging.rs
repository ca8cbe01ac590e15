//! Tracing subscriber bootstrap.
//!
//! Diagnostic logging is distinct from the operator-facing output log in
//! `bgplab-core`: the former is for developers and honors `RUST_LOG`,
//! the latter is rendered in the UI and capped at 50 entries.

use tracing_subscriber::{fmt, EnvFilter};

#[derive(Clone)]
pub struct EventLogger;

impl EventLogger {
    /// Installs the global subscriber. Defaults to `info` when
    /// `RUST_LOG` is unset.
    pub fn init() {
        fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .with_target(false)
            .init()
    }
}

#[cfg(test)]
mod tests {
    use tracing_test::traced_test;

    #[traced_test]
    #[test]
    fn emits_through_tracing() {
        tracing::info!("controller telemetry online");
        assert!(logs_contain("controller telemetry online"));
    }
}
