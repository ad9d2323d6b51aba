//! Diagnostic reports for failed scenario validation.

use std::collections::HashMap;
use std::io;
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Debug, Default)]
pub struct DiagnosticsCollector {
    reports: Vec<String>,
    scenario_hashes: HashMap<String, String>,
}

impl DiagnosticsCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes a mismatch report to the working directory and returns the
    /// filename.
    pub fn record_mismatch(
        &mut self,
        scenario: &str,
        expected: &str,
        actual: &str,
    ) -> io::Result<String> {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        let filename = format!("scenario_mismatch_{timestamp}.txt");
        let body = format!(
            "Scenario validation failed: {scenario}\nExpected: {expected}\nActual:   {actual}\n"
        );
        std::fs::write(&filename, body)?;
        self.reports.push(filename.clone());
        Ok(filename)
    }

    pub fn record_scenario_hash(&mut self, scenario: &str, hash: &str) {
        self.scenario_hashes
            .insert(scenario.to_string(), hash.to_string());
    }

    pub fn reports(&self) -> &[String] {
        &self.reports
    }

    pub fn scenario_hash(&self, scenario: &str) -> Option<&str> {
        self.scenario_hashes.get(scenario).map(String::as_str)
    }
}
