//! Prometheus metrics for the proctoring pipeline.

use prometheus::{Counter, Histogram, HistogramOpts, Registry};

#[derive(Debug, Clone)]
pub struct MetricsRecorder {
    pub registry: Registry,
    /// Raw signals delivered to the runtime, accepted or not.
    pub signals_observed: Counter,
    /// Accepted violations (classified and recorded).
    pub violations_recorded: Counter,
    /// Sessions that entered the locked state.
    pub sessions_locked: Counter,
    /// Per-signal handling time (gate, classify, record, evaluate).
    pub handling_latency: Histogram,
}

impl Default for MetricsRecorder {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsRecorder {
    pub fn new() -> Self {
        let registry = Registry::new();

        let signals_observed = Counter::new(
            "tentvakt_signals_observed_total",
            "Raw signals delivered to the session runtime",
        )
        .unwrap();
        let violations_recorded = Counter::new(
            "tentvakt_violations_recorded_total",
            "Accepted violations recorded against sessions",
        )
        .unwrap();
        let sessions_locked = Counter::new(
            "tentvakt_sessions_locked_total",
            "Sessions that transitioned to the locked state",
        )
        .unwrap();
        let handling_latency = Histogram::with_opts(
            HistogramOpts::new(
                "tentvakt_signal_handling_latency_ns",
                "Per-signal handling time in the runtime",
            )
            .buckets(vec![1_000.0, 10_000.0, 100_000.0, 1_000_000.0]),
        )
        .unwrap();

        registry
            .register(Box::new(signals_observed.clone()))
            .unwrap();
        registry
            .register(Box::new(violations_recorded.clone()))
            .unwrap();
        registry.register(Box::new(sessions_locked.clone())).unwrap();
        registry
            .register(Box::new(handling_latency.clone()))
            .unwrap();

        Self {
            registry,
            signals_observed,
            violations_recorded,
            sessions_locked,
            handling_latency,
        }
    }

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
    fn counters_start_at_zero_and_accumulate() {
        let metrics = MetricsRecorder::new();
        assert_eq!(metrics.violations_recorded.get() as u64, 0);
        metrics.signals_observed.inc();
        metrics.violations_recorded.inc();
        assert_eq!(metrics.signals_observed.get() as u64, 1);
    }

    #[test]
    fn text_encoding_includes_registered_metrics() {
        let metrics = MetricsRecorder::new();
        metrics.sessions_locked.inc();
        let text = metrics.gather_metrics().unwrap();
        assert!(text.contains("tentvakt_sessions_locked_total"));
    }
}
