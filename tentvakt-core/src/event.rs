//! Classified security events.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::signal::SignalKind;

/// Qualitative impact tier attached to an event. Used for display and
/// notification urgency, never for threshold logic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable record of one accepted violation.
///
/// Created by the classifier, destroyed only by ledger reset or
/// oldest-first eviction. Never mutated after creation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityEvent {
    /// Monotonic id, unique within a session.
    pub id: u64,
    pub kind: SignalKind,
    /// Human-readable description, context included where relevant.
    pub message: String,
    /// Nanosecond timestamp from the session's time source.
    pub occurred_at_ns: u64,
    pub severity: Severity,
}
