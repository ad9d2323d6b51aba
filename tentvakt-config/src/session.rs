//! Session parameters.
//!
//! Thresholds governing the lockout state machine and the session clock.

use serde::{Deserialize, Serialize};
use validator::{self, Validate};

/// Session configuration parameters.
#[derive(Debug, Serialize, Deserialize, Validate, Clone)]
pub struct SessionConfig {
    /// Nth accepted violation that locks the session, counted inclusively.
    #[validate(range(min = 1, max = 1000))]
    #[serde(default = "default_lockout_threshold")]
    pub lockout_threshold: u64,

    /// Number of events retained for display. The violation counter is
    /// independent of this bound.
    #[validate(range(min = 1, max = 100))]
    #[serde(default = "default_retention")]
    pub retention: usize,

    /// Session duration in whole seconds. `null` runs an unbounded
    /// elapsed-time counter that never expires.
    #[validate(range(min = 1, max = 86400))]
    #[serde(default = "default_time_limit")]
    pub time_limit_secs: Option<u64>,
}

fn default_lockout_threshold() -> u64 {
    5
}
fn default_retention() -> usize {
    10
}
fn default_time_limit() -> Option<u64> {
    Some(3600)
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            lockout_threshold: default_lockout_threshold(),
            retention: default_retention(),
            time_limit_secs: default_time_limit(),
        }
    }
}
