//! # Tentvakt Simulator
//!
//! Deterministic scripted sessions for the proctoring monitor.
//!
//! A scenario is a YAML-described sequence of steps (signals, clock ticks,
//! viewport samples, lifecycle commands) replayed against a fresh session.
//! With a virtual clock for timestamps, the same scenario always produces
//! the same event stream and the same state hash, which makes scenarios a
//! regression vehicle. A seeded random driver generates signal streams for
//! fuzz-style exercise of the state machine.

pub mod random;
pub mod scenario;
pub mod virtual_clock;

pub use random::RandomSignalDriver;
pub use scenario::{Scenario, ScenarioError, ScenarioStep};
pub use virtual_clock::VirtualClock;
