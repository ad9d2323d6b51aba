//! Signal classification.
//!
//! Maps raw signals to severity-typed [`SecurityEvent`]s using a fixed
//! lookup table. The table and the blocked-shortcut set are configuration
//! data carried by [`SignalCatalog`]; extending the catalog never touches
//! the state machine.

use std::collections::HashMap;

use crate::event::{SecurityEvent, Severity};
use crate::signal::{Signal, SignalKind};

/// Severity table and blocked-shortcut set.
///
/// Two built-in profiles reproduce the observed variants: `primary`
/// (window-blur is high) and `compact` (window-blur is medium).
#[derive(Clone, Debug)]
pub struct SignalCatalog {
    severities: HashMap<SignalKind, Severity>,
    blocked_shortcuts: Vec<String>,
}

impl SignalCatalog {
    /// Primary severity profile.
    pub fn primary() -> Self {
        let severities = HashMap::from([
            (SignalKind::TabHidden, Severity::High),
            (SignalKind::WindowBlur, Severity::High),
            (SignalKind::WindowFocusRegained, Severity::Low),
            (SignalKind::MouseLeftViewport, Severity::Medium),
            (SignalKind::ContextMenuAttempt, Severity::Medium),
            (SignalKind::CopyAttempt, Severity::Medium),
            (SignalKind::PasteAttempt, Severity::Medium),
            (SignalKind::BlockedShortcut, Severity::Medium),
            (SignalKind::DevtoolsSuspected, Severity::High),
            (SignalKind::FullscreenExited, Severity::High),
            (SignalKind::NavigationAttempted, Severity::High),
            (SignalKind::MonitoringStarted, Severity::Low),
            (SignalKind::MonitoringStopped, Severity::Low),
        ]);
        Self {
            severities,
            blocked_shortcuts: default_blocked_shortcuts(),
        }
    }

    /// Compact severity profile: window-blur downgraded to medium.
    pub fn compact() -> Self {
        let mut catalog = Self::primary();
        catalog
            .severities
            .insert(SignalKind::WindowBlur, Severity::Medium);
        catalog
    }

    /// Severity for a signal kind. Kinds absent from the table default to
    /// medium so a trimmed custom table stays total.
    pub fn severity(&self, kind: SignalKind) -> Severity {
        self.severities
            .get(&kind)
            .copied()
            .unwrap_or(Severity::Medium)
    }

    pub fn set_severity(&mut self, kind: SignalKind, severity: Severity) {
        self.severities.insert(kind, severity);
    }

    /// Replaces the blocked-shortcut set.
    pub fn set_blocked_shortcuts(&mut self, shortcuts: Vec<String>) {
        self.blocked_shortcuts = shortcuts;
    }

    pub fn blocked_shortcuts(&self) -> &[String] {
        &self.blocked_shortcuts
    }

    /// Case-insensitive membership check against the shortcut set.
    pub fn is_blocked_shortcut(&self, key: &str) -> bool {
        self.blocked_shortcuts
            .iter()
            .any(|k| k.eq_ignore_ascii_case(key))
    }
}

impl Default for SignalCatalog {
    fn default() -> Self {
        Self::primary()
    }
}

fn default_blocked_shortcuts() -> Vec<String> {
    [
        "Ctrl+C",
        "Ctrl+V",
        "Ctrl+A",
        "Ctrl+S",
        "Ctrl+P",
        "Ctrl+Shift+I",
        "Ctrl+Shift+J",
        "Ctrl+Shift+C",
        "F12",
        "Ctrl+U",
        "PrintScreen",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

/// Pure mapping from raw signal to classified event.
///
/// Holds no session state and performs no writes; the lockout controller
/// enforces the monitoring gate before anything reaches `classify`.
#[derive(Clone, Debug, Default)]
pub struct Classifier {
    catalog: SignalCatalog,
}

impl Classifier {
    pub fn new(catalog: SignalCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &SignalCatalog {
        &self.catalog
    }

    /// Classifies one signal into an immutable event record.
    pub fn classify(&self, signal: &Signal, id: u64, occurred_at_ns: u64) -> SecurityEvent {
        let message = match signal {
            Signal::TabHidden => "Switched to another tab or minimized the window".to_string(),
            Signal::WindowBlur => "Window lost focus".to_string(),
            Signal::WindowFocusRegained => "Window regained focus".to_string(),
            Signal::MouseLeftViewport => "Mouse cursor left the assessment viewport".to_string(),
            Signal::ContextMenuAttempt => "Attempted to open the context menu".to_string(),
            Signal::CopyAttempt => "Attempted to copy content".to_string(),
            Signal::PasteAttempt => "Attempted to paste content".to_string(),
            Signal::BlockedShortcut { key } => format!("Blocked keyboard shortcut: {key}"),
            Signal::DevtoolsSuspected => "Developer tools may be open".to_string(),
            Signal::FullscreenExited => "Exited fullscreen mode".to_string(),
            Signal::NavigationAttempted => "Attempted to leave the page".to_string(),
            Signal::MonitoringStarted => "Monitoring activated".to_string(),
            Signal::MonitoringStopped => "Monitoring deactivated".to_string(),
        };

        SecurityEvent {
            id,
            kind: signal.kind(),
            message,
            occurred_at_ns,
            severity: self.catalog.severity(signal.kind()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primary_severity_table() {
        let catalog = SignalCatalog::primary();
        assert_eq!(catalog.severity(SignalKind::TabHidden), Severity::High);
        assert_eq!(catalog.severity(SignalKind::WindowBlur), Severity::High);
        assert_eq!(
            catalog.severity(SignalKind::WindowFocusRegained),
            Severity::Low
        );
        assert_eq!(
            catalog.severity(SignalKind::MouseLeftViewport),
            Severity::Medium
        );
        assert_eq!(
            catalog.severity(SignalKind::BlockedShortcut),
            Severity::Medium
        );
        assert_eq!(
            catalog.severity(SignalKind::DevtoolsSuspected),
            Severity::High
        );
        assert_eq!(
            catalog.severity(SignalKind::NavigationAttempted),
            Severity::High
        );
        assert_eq!(
            catalog.severity(SignalKind::MonitoringStarted),
            Severity::Low
        );
    }

    #[test]
    fn compact_downgrades_window_blur_only() {
        let catalog = SignalCatalog::compact();
        assert_eq!(catalog.severity(SignalKind::WindowBlur), Severity::Medium);
        assert_eq!(catalog.severity(SignalKind::TabHidden), Severity::High);
    }

    #[test]
    fn shortcut_membership_is_case_insensitive() {
        let catalog = SignalCatalog::default();
        assert!(catalog.is_blocked_shortcut("Ctrl+Shift+I"));
        assert!(catalog.is_blocked_shortcut("ctrl+shift+i"));
        assert!(!catalog.is_blocked_shortcut("Ctrl+Z"));
    }

    #[test]
    fn message_carries_the_blocked_key() {
        let classifier = Classifier::default();
        let event = classifier.classify(
            &Signal::BlockedShortcut {
                key: "Ctrl+U".into(),
            },
            7,
            42,
        );
        assert_eq!(event.id, 7);
        assert_eq!(event.occurred_at_ns, 42);
        assert_eq!(event.kind, SignalKind::BlockedShortcut);
        assert!(event.message.contains("Ctrl+U"));
    }

    #[test]
    fn classify_is_side_effect_free() {
        let classifier = Classifier::default();
        let a = classifier.classify(&Signal::TabHidden, 0, 0);
        let b = classifier.classify(&Signal::TabHidden, 0, 0);
        assert_eq!(a, b);
    }
}
