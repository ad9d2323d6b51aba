//! Session runtime.
//!
//! Drives a [`SignalSource`] against the lockout controller. All state
//! transitions happen on the runtime's own task; collaborators observe the
//! session through a watch-channel projection and the notification queue.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval, sleep};
use tracing::{debug, info, instrument, trace, warn};

use tentvakt_config::TentvaktConfig;
use tentvakt_core::bus::EventBus;
use tentvakt_core::classifier::Classifier;
use tentvakt_core::devtools::{DevtoolsHeuristic, ViewportSample};
use tentvakt_core::session::{LockoutController, Observation, SessionProjection, SessionState};
use tentvakt_core::signal::Signal;
use tentvakt_telemetry::{EventLogger, MetricsRecorder};

use crate::config::{catalog_from, params_from};
use crate::diagnostics::DiagnosticsCollector;
use crate::error::EngineError;
use crate::source::{SignalSource, SourceCommand};

fn unix_now_ns() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

/// Coordinates one proctoring session: source, controller, sinks.
pub struct ProctorRuntime {
    pub(crate) config: Arc<TentvaktConfig>,
    pub(crate) session: LockoutController,
    pub(crate) heuristic: DevtoolsHeuristic,
    pub(crate) last_viewport: Option<ViewportSample>,
    pub(crate) bus: Arc<EventBus>,
    pub(crate) metrics: Arc<MetricsRecorder>,
    pub(crate) diagnostics: DiagnosticsCollector,
    projection_tx: watch::Sender<SessionProjection>,
}

impl ProctorRuntime {
    pub fn new(config: TentvaktConfig) -> Self {
        debug!("Session config: {:?}", config.session);

        let classifier = Classifier::new(catalog_from(&config.catalog));
        let session = LockoutController::new(classifier, params_from(&config.session));
        let heuristic = DevtoolsHeuristic::new(config.catalog.devtools.threshold);
        let bus = Arc::new(EventBus::with_capacity(config.engine.bus_capacity));
        let (projection_tx, _) = watch::channel(session.projection());

        Self {
            config: Arc::new(config),
            session,
            heuristic,
            last_viewport: None,
            bus,
            metrics: Arc::new(MetricsRecorder::new()),
            diagnostics: DiagnosticsCollector::new(),
            projection_tx,
        }
    }

    /// Read-only projection stream for UI and notification consumers.
    pub fn subscribe(&self) -> watch::Receiver<SessionProjection> {
        self.projection_tx.subscribe()
    }

    pub fn projection(&self) -> SessionProjection {
        self.session.projection()
    }

    pub fn metrics(&self) -> Arc<MetricsRecorder> {
        self.metrics.clone()
    }

    /// Runs a live session until the source is exhausted or the session
    /// locks. The session tick and devtools poll intervals live exactly as
    /// long as this loop; dropping them on exit stops both timers on every
    /// path.
    #[instrument(skip_all)]
    pub async fn run_live<S: SignalSource>(
        &mut self,
        source: &mut S,
    ) -> Result<SessionProjection, EngineError> {
        info!("Starting live proctoring session");

        let terminate = Arc::new(AtomicBool::new(false));
        let notifier = self.spawn_notifier(terminate.clone());

        let mut session_tick = interval(Duration::from_secs(1));
        let mut devtools_poll = interval(Duration::from_secs(
            self.config.catalog.devtools.poll_interval_secs,
        ));
        // The first tick of a tokio interval completes immediately; consume
        // both so the session clock starts at zero.
        session_tick.tick().await;
        devtools_poll.tick().await;

        let outcome = loop {
            tokio::select! {
                command = source.next_command() => match command {
                    Ok(Some(command)) => self.handle_command(command, unix_now_ns()),
                    Ok(None) => break Ok(()),
                    Err(e) => break Err(e),
                },
                _ = session_tick.tick() => self.handle_tick(),
                _ = devtools_poll.tick() => self.poll_devtools(unix_now_ns()),
            }

            if self.session.is_locked() {
                break Ok(());
            }
        };

        // Both intervals die with this scope; the notifier is drained and
        // joined even when the source failed.
        terminate.store(true, Ordering::Release);
        notifier.await?;
        outcome?;

        info!("Live session run complete");
        Ok(self.session.projection())
    }

    pub(crate) fn handle_command(&mut self, command: SourceCommand, now_ns: u64) {
        match command {
            SourceCommand::Signal(signal) => self.handle_signal(&signal, now_ns),
            SourceCommand::Viewport(sample) => self.last_viewport = Some(sample),
            SourceCommand::StartMonitoring => {
                self.session.start_monitoring();
                self.publish_projection();
            }
            SourceCommand::StopMonitoring => {
                let was_locked = self.session.is_locked();
                let observation = self.session.stop_monitoring(now_ns);
                self.finish_observation(observation, was_locked);
            }
            SourceCommand::Reset => {
                self.session.reset();
                self.publish_projection();
            }
        }
    }

    /// One signal, one logical unit: gate, classify, record, evaluate.
    pub(crate) fn handle_signal(&mut self, signal: &Signal, now_ns: u64) {
        // Shortcut signals outside the configured catalog are not
        // violations.
        if let Signal::BlockedShortcut { key } = signal {
            if !self.session.classifier().catalog().is_blocked_shortcut(key) {
                trace!(key = %key, "shortcut not in blocked catalog, ignoring");
                return;
            }
        }

        let started = Instant::now();
        self.metrics.signals_observed.inc();
        let was_locked = self.session.is_locked();
        let observation = self.session.observe(signal, now_ns);
        self.metrics
            .handling_latency
            .observe(started.elapsed().as_nanos() as f64);
        self.finish_observation(observation, was_locked);
    }

    fn finish_observation(&mut self, observation: Observation, was_locked: bool) {
        match observation {
            Observation::Recorded {
                event,
                violation_count,
            } => {
                self.metrics.violations_recorded.inc();
                trace!(id = event.id, kind = %event.kind, "event accepted");
                if let Err(e) = self.bus.publish(event) {
                    warn!("notification queue full, dropping event: {e}");
                }
                if !was_locked {
                    if let SessionState::Locked(reason) = self.session.state() {
                        self.metrics.sessions_locked.inc();
                        info!(%reason, violations = violation_count, "session locked");
                    }
                }
            }
            Observation::Suppressed => trace!("signal suppressed"),
        }
        self.publish_projection();
    }

    pub(crate) fn handle_tick(&mut self) {
        let was_locked = self.session.is_locked();
        let status = self.session.tick();
        trace!(?status, "session tick");
        if !was_locked {
            if let SessionState::Locked(reason) = self.session.state() {
                self.metrics.sessions_locked.inc();
                info!(%reason, "session locked");
            }
        }
        self.publish_projection();
    }

    /// Evaluates the devtools heuristic against the latest viewport
    /// sample. Runs at the configured cadence, not per resize event.
    pub(crate) fn poll_devtools(&mut self, now_ns: u64) {
        if let Some(sample) = self.last_viewport {
            if self.heuristic.suspects(&sample) {
                self.handle_signal(&Signal::DevtoolsSuspected, now_ns);
            }
        }
    }

    fn publish_projection(&self) {
        self.projection_tx.send_replace(self.session.projection());
    }

    /// Drains the notification queue towards the structured log. Runs
    /// until the runtime signals termination and the queue is empty.
    fn spawn_notifier(&self, terminate: Arc<AtomicBool>) -> JoinHandle<()> {
        let bus = self.bus.clone();
        tokio::spawn(async move {
            debug!("notification sink started");
            loop {
                match bus.drain_next() {
                    Some(event) => {
                        EventLogger::log_security_event(
                            event.kind.as_str(),
                            event.severity.as_str(),
                            &event.message,
                        )
                        .await;
                    }
                    None => {
                        if terminate.load(Ordering::Acquire) {
                            break;
                        }
                        sleep(Duration::from_millis(10)).await;
                    }
                }
            }
            debug!("notification sink stopped");
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use tentvakt_core::session::LockReason;

    struct VecSource {
        commands: std::vec::IntoIter<SourceCommand>,
    }

    impl VecSource {
        fn new(commands: Vec<SourceCommand>) -> Self {
            Self {
                commands: commands.into_iter(),
            }
        }
    }

    #[async_trait]
    impl SignalSource for VecSource {
        async fn next_command(&mut self) -> Result<Option<SourceCommand>, EngineError> {
            Ok(self.commands.next())
        }
    }

    fn signals(raw: Vec<Signal>) -> Vec<SourceCommand> {
        let mut commands = vec![SourceCommand::StartMonitoring];
        commands.extend(raw.into_iter().map(SourceCommand::Signal));
        commands
    }

    #[tokio::test]
    async fn five_violations_lock_the_live_session() {
        let mut runtime = ProctorRuntime::new(TentvaktConfig::default());
        let mut source = VecSource::new(signals(vec![
            Signal::TabHidden,
            Signal::WindowBlur,
            Signal::ContextMenuAttempt,
            Signal::CopyAttempt,
            Signal::PasteAttempt,
        ]));

        let projection = runtime.run_live(&mut source).await.unwrap();
        assert_eq!(
            projection.state,
            SessionState::Locked(LockReason::ViolationThreshold)
        );
        assert_eq!(projection.violation_count, 5);
    }

    #[tokio::test]
    async fn uncataloged_shortcut_is_not_a_violation() {
        let mut runtime = ProctorRuntime::new(TentvaktConfig::default());
        let mut source = VecSource::new(signals(vec![
            Signal::BlockedShortcut {
                key: "Ctrl+Z".into(),
            },
            Signal::BlockedShortcut {
                key: "Ctrl+Shift+I".into(),
            },
        ]));

        let projection = runtime.run_live(&mut source).await.unwrap();
        assert_eq!(projection.state, SessionState::Active);
        assert_eq!(projection.violation_count, 1);
    }

    #[tokio::test]
    async fn projection_watch_tracks_the_lockout() {
        let mut runtime = ProctorRuntime::new(TentvaktConfig::default());
        let watcher = runtime.subscribe();
        let mut source = VecSource::new(signals(vec![
            Signal::TabHidden,
            Signal::TabHidden,
            Signal::TabHidden,
            Signal::TabHidden,
            Signal::TabHidden,
        ]));

        runtime.run_live(&mut source).await.unwrap();
        assert!(matches!(
            watcher.borrow().state,
            SessionState::Locked(LockReason::ViolationThreshold)
        ));
    }

    #[tokio::test]
    async fn reset_command_reopens_a_locked_session() {
        let mut runtime = ProctorRuntime::new(TentvaktConfig::default());
        let mut commands = signals(vec![
            Signal::TabHidden,
            Signal::TabHidden,
            Signal::TabHidden,
            Signal::TabHidden,
            Signal::TabHidden,
        ]);
        commands.push(SourceCommand::Reset);
        let mut source = VecSource::new(commands);

        // The run ends at the lockout; the trailing reset is delivered to
        // a fresh run.
        let projection = runtime.run_live(&mut source).await.unwrap();
        assert!(matches!(projection.state, SessionState::Locked(_)));

        let projection = runtime.run_live(&mut source).await.unwrap();
        assert_eq!(projection.state, SessionState::Active);
        assert_eq!(projection.violation_count, 0);
    }

    #[tokio::test]
    async fn viewport_updates_feed_the_devtools_poll() {
        let mut runtime = ProctorRuntime::new(TentvaktConfig::default());
        runtime.handle_command(SourceCommand::StartMonitoring, 0);
        runtime.handle_command(
            SourceCommand::Viewport(ViewportSample {
                outer_width: 1920,
                outer_height: 1080,
                inner_width: 1500,
                inner_height: 1080,
            }),
            0,
        );
        runtime.poll_devtools(1);
        let projection = runtime.projection();
        assert_eq!(projection.violation_count, 1);
        assert_eq!(
            projection.recent_events[0].kind,
            tentvakt_core::signal::SignalKind::DevtoolsSuspected
        );
    }
}
