//! Seeded random signal streams.
//!
//! Generates arbitrary-but-reproducible step sequences to exercise the
//! state machine the way fuzzing exercises a parser: the same seed always
//! yields the same scenario.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use tentvakt_core::signal::Signal;

use crate::scenario::{Scenario, ScenarioStep};

/// Reproducible generator over the signal catalog.
pub struct RandomSignalDriver {
    rng: SmallRng,
}

impl RandomSignalDriver {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Draws one step: mostly signals, occasionally a clock tick.
    pub fn next_step(&mut self) -> ScenarioStep {
        if self.rng.random_bool(0.2) {
            return ScenarioStep::Tick(self.rng.random_range(1..=3));
        }
        ScenarioStep::Signal(self.next_signal())
    }

    fn next_signal(&mut self) -> Signal {
        const SHORTCUTS: [&str; 4] = ["Ctrl+C", "Ctrl+Shift+I", "F12", "PrintScreen"];
        match self.rng.random_range(0..11u32) {
            0 => Signal::TabHidden,
            1 => Signal::WindowBlur,
            2 => Signal::WindowFocusRegained,
            3 => Signal::MouseLeftViewport,
            4 => Signal::ContextMenuAttempt,
            5 => Signal::CopyAttempt,
            6 => Signal::PasteAttempt,
            7 => Signal::BlockedShortcut {
                key: SHORTCUTS[self.rng.random_range(0..SHORTCUTS.len())].to_string(),
            },
            8 => Signal::FullscreenExited,
            9 => Signal::NavigationAttempted,
            _ => Signal::DevtoolsSuspected,
        }
    }

    /// Builds a full scenario: open the gate, then `count` random steps.
    pub fn scenario(seed: u64, count: usize) -> Scenario {
        let mut driver = Self::new(seed);
        let mut steps = Vec::with_capacity(count + 1);
        steps.push(ScenarioStep::StartMonitoring);
        for _ in 0..count {
            steps.push(driver.next_step());
        }
        Scenario {
            name: format!("random-{seed}"),
            steps,
            expected_hash: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_scenario() {
        let a = RandomSignalDriver::scenario(7, 50);
        let b = RandomSignalDriver::scenario(7, 50);
        assert_eq!(a.steps, b.steps);
    }

    #[test]
    fn different_seeds_diverge() {
        let a = RandomSignalDriver::scenario(1, 50);
        let b = RandomSignalDriver::scenario(2, 50);
        assert_ne!(a.steps, b.steps);
    }

    #[test]
    fn scenario_opens_the_monitoring_gate_first() {
        let scenario = RandomSignalDriver::scenario(3, 10);
        assert_eq!(scenario.steps[0], ScenarioStep::StartMonitoring);
        assert_eq!(scenario.steps.len(), 11);
    }
}
