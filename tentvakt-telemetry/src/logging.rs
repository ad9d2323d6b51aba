//! Structured logging with tracing and OpenTelemetry attributes.
//!
//! Security events are logged inside a dedicated span so downstream
//! collectors can correlate a session's notifications.

use opentelemetry::KeyValue;
use tracing::{info_span, Instrument};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Clone)]
pub struct EventLogger;

impl EventLogger {
    /// Installs the global fmt subscriber. `RUST_LOG` overrides the
    /// default `info` filter.
    pub fn init() {
        fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .with_span_events(FmtSpan::CLOSE)
            .init()
    }

    /// Logs one classified security event with structured attributes.
    pub async fn log_security_event(kind: &str, severity: &str, message: &str) {
        let metadata = vec![
            KeyValue::new("kind", kind.to_string()),
            KeyValue::new("severity", severity.to_string()),
        ];

        let span = info_span!(
            "security_event",
            kind = kind,
            severity = severity,
            otel.kind = "INTERNAL"
        );

        async {
            tracing::info!(metadata = ?metadata, detail = message, "Security event recorded");
        }
        .instrument(span)
        .await
    }
}
