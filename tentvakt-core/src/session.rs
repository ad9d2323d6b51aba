//! Lockout controller.
//!
//! Explicit state machine over `{Active, Locked}` combining the violation
//! counter and clock expiry. The controller is the exclusive owner of the
//! ledger, the clock, and the event-id counter; every transition method
//! checks session state first so that a signal arriving after lockout
//! leaves zero side effects.

use serde::Serialize;
use tracing::{debug, info};

use crate::classifier::Classifier;
use crate::clock::{ClockStatus, SessionClock};
use crate::event::SecurityEvent;
use crate::ledger::ViolationLedger;
use crate::signal::Signal;

/// Why a session locked. Surfaced distinctly so the lockout screen can
/// explain the trigger.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum LockReason {
    ViolationThreshold,
    TimeExpired,
}

impl std::fmt::Display for LockReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LockReason::ViolationThreshold => f.write_str("violation threshold reached"),
            LockReason::TimeExpired => f.write_str("session time expired"),
        }
    }
}

/// Session lifecycle state. `Locked` is terminal for the running session;
/// only an explicit reset leaves it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    Active,
    Locked(LockReason),
}

/// Outcome of delivering one signal to the controller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Observation {
    /// Signal accepted: classified and recorded. The session may have
    /// locked on exactly this event.
    Recorded {
        event: SecurityEvent,
        violation_count: u64,
    },
    /// Monitoring gate closed or session locked: no event, no counter
    /// increment, no ledger write.
    Suppressed,
}

/// Tunable parameters for one session.
#[derive(Clone, Copy, Debug)]
pub struct SessionParams {
    /// Nth accepted violation that locks the session, counted inclusively.
    pub lockout_threshold: u64,
    /// Events retained for display; does not bound the counter.
    pub retention: usize,
    /// Session duration in whole seconds; `None` never expires.
    pub limit_secs: Option<u64>,
}

impl Default for SessionParams {
    fn default() -> Self {
        Self {
            lockout_threshold: 5,
            retention: 10,
            limit_secs: Some(3600),
        }
    }
}

/// Read-only snapshot for collaborators (UI, notification sinks).
#[derive(Clone, Debug)]
pub struct SessionProjection {
    pub state: SessionState,
    pub violation_count: u64,
    pub elapsed_secs: u64,
    pub remaining_secs: Option<u64>,
    pub monitoring: bool,
    /// Retained events, most recent first.
    pub recent_events: Vec<SecurityEvent>,
}

/// The violation/lockout state machine.
#[derive(Debug)]
pub struct LockoutController {
    classifier: Classifier,
    ledger: ViolationLedger,
    clock: SessionClock,
    state: SessionState,
    monitoring: bool,
    lockout_threshold: u64,
    next_event_id: u64,
}

impl LockoutController {
    pub fn new(classifier: Classifier, params: SessionParams) -> Self {
        Self {
            classifier,
            ledger: ViolationLedger::new(params.retention),
            clock: SessionClock::new(params.limit_secs),
            state: SessionState::Active,
            monitoring: false,
            lockout_threshold: params.lockout_threshold,
            next_event_id: 0,
        }
    }

    /// Delivers one raw signal as a single logical unit:
    /// gate -> classify -> record -> evaluate lockout.
    ///
    /// The state gate comes first: while locked or while the monitoring
    /// gate is closed, the signal is fully ignored.
    pub fn observe(&mut self, signal: &Signal, now_ns: u64) -> Observation {
        if self.state != SessionState::Active || !self.monitoring {
            return Observation::Suppressed;
        }

        let id = self.next_event_id;
        self.next_event_id += 1;

        let event = self.classifier.classify(signal, id, now_ns);
        let violation_count = self.ledger.record(event.clone());
        debug!(
            kind = %event.kind,
            severity = %event.severity,
            violation_count,
            "violation recorded"
        );

        if violation_count >= self.lockout_threshold {
            self.lock(LockReason::ViolationThreshold);
        }

        Observation::Recorded {
            event,
            violation_count,
        }
    }

    /// Advances the session clock by one second. Ticking a locked session
    /// is a no-op: the clock must neither advance nor re-fire expiry.
    pub fn tick(&mut self) -> ClockStatus {
        if self.state != SessionState::Active {
            return self.clock.status();
        }

        let status = self.clock.tick();
        if status == ClockStatus::Expired {
            self.lock(LockReason::TimeExpired);
        }
        status
    }

    /// Opens the monitoring gate. Starting does not record an event; the
    /// session begins with a clean counter.
    pub fn start_monitoring(&mut self) {
        if self.state != SessionState::Active {
            return;
        }
        if !self.monitoring {
            self.monitoring = true;
            info!("monitoring started");
        }
    }

    /// Records the `monitoring-stopped` marker while the gate is still
    /// open, then closes it. Signals delivered afterwards are suppressed.
    pub fn stop_monitoring(&mut self, now_ns: u64) -> Observation {
        let observation = self.observe(&Signal::MonitoringStopped, now_ns);
        if self.monitoring {
            self.monitoring = false;
            info!("monitoring stopped");
        }
        observation
    }

    /// Atomic reset: the only transition out of `Locked`, also valid while
    /// `Active`. Clears the ledger, zeroes the counter, restores the clock
    /// bound, closes the monitoring gate, and restores `Active`.
    pub fn reset(&mut self) {
        self.ledger.reset();
        self.clock.reset();
        self.state = SessionState::Active;
        self.monitoring = false;
        self.next_event_id = 0;
        info!("session reset");
    }

    fn lock(&mut self, reason: LockReason) {
        if matches!(self.state, SessionState::Locked(_)) {
            return;
        }
        self.state = SessionState::Locked(reason);
        info!(%reason, violations = self.ledger.count(), "session locked");
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_locked(&self) -> bool {
        matches!(self.state, SessionState::Locked(_))
    }

    pub fn monitoring(&self) -> bool {
        self.monitoring
    }

    pub fn violation_count(&self) -> u64 {
        self.ledger.count()
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    pub fn projection(&self) -> SessionProjection {
        SessionProjection {
            state: self.state,
            violation_count: self.ledger.count(),
            elapsed_secs: self.clock.elapsed_secs(),
            remaining_secs: self.clock.remaining_secs(),
            monitoring: self.monitoring,
            recent_events: self.ledger.recent().cloned().collect(),
        }
    }
}
