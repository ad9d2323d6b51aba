//! Scenario files.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use tentvakt_core::devtools::ViewportSample;
use tentvakt_core::signal::Signal;

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("Scenario I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Scenario parse error: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// One scripted step of a proctoring session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScenarioStep {
    /// Deliver a raw signal.
    Signal(Signal),
    /// Advance the session clock by this many whole seconds.
    Tick(u64),
    /// Feed a viewport sample to the devtools heuristic.
    Viewport(ViewportSample),
    /// Open the monitoring gate.
    StartMonitoring,
    /// Record the stop marker and close the gate.
    StopMonitoring,
    /// Explicit external reset.
    Reset,
}

/// A replayable session script.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub name: String,

    pub steps: Vec<ScenarioStep>,

    /// Expected state hash for replay validation; `None` skips the check.
    #[serde(default)]
    pub expected_hash: Option<String>,
}

impl Scenario {
    pub fn from_yaml_str(input: &str) -> Result<Self, ScenarioError> {
        Ok(serde_yaml::from_str(input)?)
    }

    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self, ScenarioError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&raw)
    }

    pub fn to_yaml(&self) -> Result<String, ScenarioError> {
        Ok(serde_yaml::to_string(self)?)
    }
}
