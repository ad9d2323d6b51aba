//! Runtime parameters for the proctoring engine.

use serde::{Deserialize, Serialize};
use validator::{self, Validate};

/// Engine configuration parameters.
#[derive(Debug, Serialize, Deserialize, Validate, Clone)]
pub struct EngineConfig {
    /// Capacity of the notification queue between the session runtime and
    /// its sinks. Events beyond this bound are dropped with a warning.
    #[validate(range(min = 16, max = 65536))]
    #[serde(default = "default_bus_capacity")]
    pub bus_capacity: usize,
}

fn default_bus_capacity() -> usize {
    256
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            bus_capacity: default_bus_capacity(),
        }
    }
}
