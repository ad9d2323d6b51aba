//! Signal catalog configuration.
//!
//! The severity profile, the blocked-shortcut set, and the devtools
//! heuristic are configuration data: the state machine never hard-codes
//! them.

use serde::{Deserialize, Serialize};
use validator::{self, Validate};

use crate::validation;

/// Signal catalog configuration parameters.
#[derive(Debug, Serialize, Deserialize, Validate, Clone)]
pub struct CatalogConfig {
    /// Severity profile: `primary` (window-blur is high) or `compact`
    /// (window-blur is medium).
    #[validate(custom(function = validation::validate_profile))]
    #[serde(default = "default_profile")]
    pub profile: String,

    /// Key combinations reported as `blocked-shortcut` violations.
    #[validate(custom(function = validation::validate_shortcut_list))]
    #[serde(default = "default_blocked_shortcuts")]
    pub blocked_shortcuts: Vec<String>,

    /// Devtools heuristic parameters.
    #[validate(nested)]
    pub devtools: DevtoolsConfig,
}

fn default_profile() -> String {
    "primary".into()
}

fn default_blocked_shortcuts() -> Vec<String> {
    [
        "Ctrl+C",
        "Ctrl+V",
        "Ctrl+A",
        "Ctrl+S",
        "Ctrl+P",
        "Ctrl+Shift+I",
        "Ctrl+Shift+J",
        "Ctrl+Shift+C",
        "F12",
        "Ctrl+U",
        "PrintScreen",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            profile: default_profile(),
            blocked_shortcuts: default_blocked_shortcuts(),
            devtools: DevtoolsConfig::default(),
        }
    }
}

/// Devtools detection heuristic parameters.
#[derive(Debug, Serialize, Deserialize, Validate, Clone)]
pub struct DevtoolsConfig {
    /// Outer/inner viewport delta (logical units) above which an attached
    /// inspector pane is suspected.
    #[validate(range(min = 40, max = 2000))]
    #[serde(default = "default_devtools_threshold")]
    pub threshold: u32,

    /// Poll cadence in whole seconds.
    #[validate(range(min = 1, max = 60))]
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,
}

fn default_devtools_threshold() -> u32 {
    160
}
fn default_poll_interval() -> u64 {
    1
}

impl Default for DevtoolsConfig {
    fn default() -> Self {
        Self {
            threshold: default_devtools_threshold(),
            poll_interval_secs: default_poll_interval(),
        }
    }
}
