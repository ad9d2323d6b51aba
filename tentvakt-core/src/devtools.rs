//! Devtools detection heuristic.
//!
//! Compares outer/inner viewport dimension deltas against a fixed
//! threshold. The surface samples dimensions; the engine polls the latest
//! sample at a fixed cadence (1 Hz) rather than reacting to events.
//! False positives (docked side panels) and false negatives (undocked
//! inspector windows) are accepted, documented behavior.

use serde::{Deserialize, Serialize};

/// Outer and inner viewport dimensions in logical units.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewportSample {
    pub outer_width: u32,
    pub outer_height: u32,
    pub inner_width: u32,
    pub inner_height: u32,
}

/// Dimension-delta heuristic for a suspected attached inspector pane.
#[derive(Clone, Copy, Debug)]
pub struct DevtoolsHeuristic {
    threshold: u32,
}

impl DevtoolsHeuristic {
    pub const DEFAULT_THRESHOLD: u32 = 160;

    pub fn new(threshold: u32) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    /// True when either axis delta exceeds the threshold.
    pub fn suspects(&self, sample: &ViewportSample) -> bool {
        let width_delta = sample.outer_width.saturating_sub(sample.inner_width);
        let height_delta = sample.outer_height.saturating_sub(sample.inner_height);
        width_delta > self.threshold || height_delta > self.threshold
    }
}

impl Default for DevtoolsHeuristic {
    fn default() -> Self {
        Self::new(Self::DEFAULT_THRESHOLD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(outer_w: u32, outer_h: u32, inner_w: u32, inner_h: u32) -> ViewportSample {
        ViewportSample {
            outer_width: outer_w,
            outer_height: outer_h,
            inner_width: inner_w,
            inner_height: inner_h,
        }
    }

    #[test]
    fn clean_viewport_not_suspected() {
        let heuristic = DevtoolsHeuristic::default();
        assert!(!heuristic.suspects(&sample(1920, 1080, 1920, 1040)));
    }

    #[test]
    fn wide_delta_suspected_on_either_axis() {
        let heuristic = DevtoolsHeuristic::default();
        assert!(heuristic.suspects(&sample(1920, 1080, 1500, 1080)));
        assert!(heuristic.suspects(&sample(1920, 1080, 1920, 700)));
    }

    #[test]
    fn threshold_is_exclusive() {
        let heuristic = DevtoolsHeuristic::default();
        // A delta of exactly 160 must not fire.
        assert!(!heuristic.suspects(&sample(1920, 1080, 1760, 1080)));
        assert!(heuristic.suspects(&sample(1920, 1080, 1759, 1080)));
    }

    #[test]
    fn inner_larger_than_outer_is_harmless() {
        let heuristic = DevtoolsHeuristic::default();
        assert!(!heuristic.suspects(&sample(100, 100, 2000, 2000)));
    }
}
