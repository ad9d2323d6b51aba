//! Stdin line protocol.
//!
//! One command per line, for driving a live session from a terminal or a
//! piped surface adapter:
//!
//! ```text
//! start                        # open the monitoring gate
//! tab-hidden
//! shortcut Ctrl+Shift+I
//! viewport 1920 1080 1600 900  # outer then inner dimensions
//! stop
//! reset
//! ```
//!
//! Blank lines and `#` comments are skipped; unrecognized lines are
//! logged and skipped rather than aborting the session.

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing::warn;

use tentvakt_core::devtools::ViewportSample;
use tentvakt_core::signal::Signal;
use tentvakt_engine::{EngineError, SignalSource, SourceCommand};

pub struct StdinSource {
    lines: Lines<BufReader<Stdin>>,
}

impl StdinSource {
    pub fn new() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
        }
    }
}

#[async_trait]
impl SignalSource for StdinSource {
    async fn next_command(&mut self) -> Result<Option<SourceCommand>, EngineError> {
        loop {
            let Some(line) = self.lines.next_line().await? else {
                return Ok(None);
            };
            match parse_line(&line) {
                Ok(Some(command)) => return Ok(Some(command)),
                Ok(None) => continue,
                Err(reason) => warn!(line = %line, reason, "ignoring unrecognized input"),
            }
        }
    }
}

/// Parses one protocol line. `Ok(None)` for blanks and comments.
fn parse_line(line: &str) -> Result<Option<SourceCommand>, &'static str> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let mut parts = line.split_whitespace();
    let head = parts.next().ok_or("empty command")?;

    let command = match head {
        "start" => SourceCommand::StartMonitoring,
        "stop" => SourceCommand::StopMonitoring,
        "reset" => SourceCommand::Reset,
        "tab-hidden" => SourceCommand::Signal(Signal::TabHidden),
        "window-blur" => SourceCommand::Signal(Signal::WindowBlur),
        "window-focus" => SourceCommand::Signal(Signal::WindowFocusRegained),
        "mouse-leave" => SourceCommand::Signal(Signal::MouseLeftViewport),
        "context-menu" => SourceCommand::Signal(Signal::ContextMenuAttempt),
        "copy" => SourceCommand::Signal(Signal::CopyAttempt),
        "paste" => SourceCommand::Signal(Signal::PasteAttempt),
        "devtools" => SourceCommand::Signal(Signal::DevtoolsSuspected),
        "fullscreen-exit" => SourceCommand::Signal(Signal::FullscreenExited),
        "navigate" => SourceCommand::Signal(Signal::NavigationAttempted),
        "shortcut" => {
            let key = parts.next().ok_or("shortcut requires a key")?;
            SourceCommand::Signal(Signal::BlockedShortcut {
                key: key.to_string(),
            })
        }
        "viewport" => {
            let mut dimension = || -> Result<u32, &'static str> {
                parts
                    .next()
                    .ok_or("viewport requires four dimensions")?
                    .parse()
                    .map_err(|_| "viewport dimensions must be integers")
            };
            let outer_width = dimension()?;
            let outer_height = dimension()?;
            let inner_width = dimension()?;
            let inner_height = dimension()?;
            SourceCommand::Viewport(ViewportSample {
                outer_width,
                outer_height,
                inner_width,
                inner_height,
            })
        }
        _ => return Err("unknown command"),
    };

    Ok(Some(command))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_signals() {
        assert_eq!(
            parse_line("tab-hidden").unwrap(),
            Some(SourceCommand::Signal(Signal::TabHidden))
        );
        assert_eq!(
            parse_line("  paste  ").unwrap(),
            Some(SourceCommand::Signal(Signal::PasteAttempt))
        );
    }

    #[test]
    fn parses_shortcut_with_key() {
        assert_eq!(
            parse_line("shortcut Ctrl+Shift+I").unwrap(),
            Some(SourceCommand::Signal(Signal::BlockedShortcut {
                key: "Ctrl+Shift+I".into()
            }))
        );
        assert!(parse_line("shortcut").is_err());
    }

    #[test]
    fn parses_viewport_dimensions() {
        assert_eq!(
            parse_line("viewport 1920 1080 1600 900").unwrap(),
            Some(SourceCommand::Viewport(ViewportSample {
                outer_width: 1920,
                outer_height: 1080,
                inner_width: 1600,
                inner_height: 900,
            }))
        );
        assert!(parse_line("viewport 1920 1080").is_err());
        assert!(parse_line("viewport a b c d").is_err());
    }

    #[test]
    fn skips_blanks_and_comments() {
        assert_eq!(parse_line("").unwrap(), None);
        assert_eq!(parse_line("# note").unwrap(), None);
    }

    #[test]
    fn rejects_unknown_commands() {
        assert!(parse_line("self-destruct").is_err());
    }
}
