//! Signal source boundary.

use async_trait::async_trait;

use tentvakt_core::devtools::ViewportSample;
use tentvakt_core::signal::Signal;

use crate::error::EngineError;

/// A command from the host surface.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SourceCommand {
    /// Raw environmental signal.
    Signal(Signal),
    /// Latest viewport dimensions, consumed by the devtools poll.
    Viewport(ViewportSample),
    /// Open the monitoring gate.
    StartMonitoring,
    /// Record the stop marker and close the gate.
    StopMonitoring,
    /// Explicit external reset.
    Reset,
}

/// Boundary producing raw environmental signals.
///
/// The host surface (browser shim, stdin protocol, scripted replay)
/// implements this; the engine owns everything downstream of it.
#[async_trait]
pub trait SignalSource: Send {
    /// Next command from the surface; `None` ends the session run.
    async fn next_command(&mut self) -> Result<Option<SourceCommand>, EngineError>;
}
