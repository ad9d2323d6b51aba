//! Raw environmental signals reported by the host surface.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A raw environmental occurrence, with per-variant context where the
/// surface provides it (the specific blocked key).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Signal {
    /// Page visibility changed to hidden (tab switch or minimize).
    TabHidden,
    /// Window lost focus.
    WindowBlur,
    /// Window regained focus.
    WindowFocusRegained,
    /// Mouse cursor left the assessment viewport.
    MouseLeftViewport,
    /// Context menu requested; the default action was suppressed.
    ContextMenuAttempt,
    CopyAttempt,
    PasteAttempt,
    /// A key combination from the blocked-shortcut catalog was pressed.
    BlockedShortcut { key: String },
    /// Viewport-delta heuristic fired (see [`crate::devtools`]).
    DevtoolsSuspected,
    FullscreenExited,
    /// Page unload attempted; the surface shows a confirmation prompt.
    NavigationAttempted,
    MonitoringStarted,
    MonitoringStopped,
}

impl Signal {
    /// Fieldless discriminant for catalog lookups.
    pub fn kind(&self) -> SignalKind {
        match self {
            Signal::TabHidden => SignalKind::TabHidden,
            Signal::WindowBlur => SignalKind::WindowBlur,
            Signal::WindowFocusRegained => SignalKind::WindowFocusRegained,
            Signal::MouseLeftViewport => SignalKind::MouseLeftViewport,
            Signal::ContextMenuAttempt => SignalKind::ContextMenuAttempt,
            Signal::CopyAttempt => SignalKind::CopyAttempt,
            Signal::PasteAttempt => SignalKind::PasteAttempt,
            Signal::BlockedShortcut { .. } => SignalKind::BlockedShortcut,
            Signal::DevtoolsSuspected => SignalKind::DevtoolsSuspected,
            Signal::FullscreenExited => SignalKind::FullscreenExited,
            Signal::NavigationAttempted => SignalKind::NavigationAttempted,
            Signal::MonitoringStarted => SignalKind::MonitoringStarted,
            Signal::MonitoringStopped => SignalKind::MonitoringStopped,
        }
    }
}

/// Discriminant of [`Signal`], used as the severity-table key and in
/// event records.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SignalKind {
    TabHidden,
    WindowBlur,
    WindowFocusRegained,
    MouseLeftViewport,
    ContextMenuAttempt,
    CopyAttempt,
    PasteAttempt,
    BlockedShortcut,
    DevtoolsSuspected,
    FullscreenExited,
    NavigationAttempted,
    MonitoringStarted,
    MonitoringStopped,
}

impl SignalKind {
    /// Every catalog entry, in table order.
    pub const ALL: [SignalKind; 13] = [
        SignalKind::TabHidden,
        SignalKind::WindowBlur,
        SignalKind::WindowFocusRegained,
        SignalKind::MouseLeftViewport,
        SignalKind::ContextMenuAttempt,
        SignalKind::CopyAttempt,
        SignalKind::PasteAttempt,
        SignalKind::BlockedShortcut,
        SignalKind::DevtoolsSuspected,
        SignalKind::FullscreenExited,
        SignalKind::NavigationAttempted,
        SignalKind::MonitoringStarted,
        SignalKind::MonitoringStopped,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SignalKind::TabHidden => "tab-hidden",
            SignalKind::WindowBlur => "window-blur",
            SignalKind::WindowFocusRegained => "window-focus-regained",
            SignalKind::MouseLeftViewport => "mouse-left-viewport",
            SignalKind::ContextMenuAttempt => "context-menu-attempt",
            SignalKind::CopyAttempt => "copy-attempt",
            SignalKind::PasteAttempt => "paste-attempt",
            SignalKind::BlockedShortcut => "blocked-shortcut",
            SignalKind::DevtoolsSuspected => "devtools-suspected",
            SignalKind::FullscreenExited => "fullscreen-exited",
            SignalKind::NavigationAttempted => "navigation-attempted",
            SignalKind::MonitoringStarted => "monitoring-started",
            SignalKind::MonitoringStopped => "monitoring-stopped",
        }
    }
}

impl fmt::Display for SignalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_roundtrip_covers_catalog() {
        let shortcut = Signal::BlockedShortcut {
            key: "Ctrl+U".into(),
        };
        assert_eq!(shortcut.kind(), SignalKind::BlockedShortcut);
        assert_eq!(SignalKind::ALL.len(), 13);
    }

    #[test]
    fn kebab_case_names() {
        assert_eq!(SignalKind::TabHidden.to_string(), "tab-hidden");
        assert_eq!(
            SignalKind::WindowFocusRegained.to_string(),
            "window-focus-regained"
        );
    }
}
