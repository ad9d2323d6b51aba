//! # tentvakt-engine
//!
//! Runtime coordinating the proctoring pipeline: a signal source at the
//! boundary, the lockout controller in the middle, telemetry sinks at the
//! end.
//!
//! The engine owns the two periodic timers (one-second session tick and
//! the devtools viewport poll) for exactly the scope of a run: both stop
//! when the session locks, when the source is exhausted, and on teardown,
//! on every exit path. Each incoming signal is handled as a single
//! synchronous unit with the session-state check first.

mod config;
mod diagnostics;
mod error;
mod runtime;
mod scripted;
mod source;

pub use diagnostics::DiagnosticsCollector;
pub use error::EngineError;
pub use runtime::ProctorRuntime;
pub use scripted::ScenarioReport;
pub use source::{SignalSource, SourceCommand};

pub mod prelude {
    pub use crate::{
        DiagnosticsCollector, EngineError, ProctorRuntime, ScenarioReport, SignalSource,
        SourceCommand,
    };
}
