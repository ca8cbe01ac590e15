//! Prometheus metrics for controller activity.

use prometheus::{Counter, Registry};

#[derive(Debug, Clone)]
pub struct MetricsRecorder {
    pub registry: Registry,
    pub steps_total: Counter,
    pub commands_total: Counter,
    pub errors_total: Counter,
}

impl Default for MetricsRecorder {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsRecorder {
    pub fn new() -> Self {
        let registry = Registry::new();
        let steps_total =
            Counter::new("bgplab_steps_total", "Simulation steps applied").unwrap();
        let commands_total =
            Counter::new("bgplab_commands_total", "Operator commands accepted").unwrap();
        let errors_total =
            Counter::new("bgplab_errors_total", "Failed controller operations").unwrap();

        registry.register(Box::new(steps_total.clone())).unwrap();
        registry.register(Box::new(commands_total.clone())).unwrap();
        registry.register(Box::new(errors_total.clone())).unwrap();

        Self {
            registry,
            steps_total,
            commands_total,
            errors_total,
        }
    }

    /// Renders the registry in the Prometheus text exposition format.
    pub fn gather_metrics(&self) -> Result<String, prometheus::Error> {
        use prometheus::Encoder;
        let encoder = prometheus::TextEncoder::new();
        let mut buffer = Vec::<u8>::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8(buffer).unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_start_at_zero_and_increment() {
        let metrics = MetricsRecorder::new();
        assert_eq!(metrics.steps_total.get(), 0.0);
        metrics.steps_total.inc();
        metrics.errors_total.inc();
        assert_eq!(metrics.steps_total.get(), 1.0);
        assert_eq!(metrics.errors_total.get(), 1.0);
    }

    #[test]
    fn gather_includes_registered_metrics() {
        let metrics = MetricsRecorder::new();
        metrics.commands_total.inc();
        let text = metrics.gather_metrics().unwrap();
        assert!(text.contains("bgplab_commands_total"));
    }
}
