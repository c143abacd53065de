//! Copying generated source and token exports out of the shell.
//!
//! The OSC 52 escape goes first so copies also land on the local machine
//! over SSH. The desktop clipboard is only tried when stdout rejects it.

use std::fmt;
use std::io::{self, Write};

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

/// Where a copy ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyTarget {
    Terminal,
    Desktop,
}

/// Both transports failed.
#[derive(Debug)]
pub struct ClipboardError {
    terminal: io::Error,
    desktop: String,
}

impl fmt::Display for ClipboardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Copy failed (terminal: {}, desktop: {})",
            self.terminal, self.desktop
        )
    }
}

impl std::error::Error for ClipboardError {}

/// Puts `text` on the clipboard.
///
/// # Errors
/// Returns both causes when neither the terminal nor the desktop clipboard
/// accepted the text.
pub fn copy_text(text: &str) -> Result<CopyTarget, ClipboardError> {
    let terminal = match write_osc52(&mut io::stdout(), text) {
        Ok(()) => return Ok(CopyTarget::Terminal),
        Err(e) => e,
    };
    tracing::debug!("OSC 52 copy failed, trying desktop clipboard: {terminal}");

    arboard::Clipboard::new()
        .and_then(|mut board| board.set_text(text))
        .map(|()| CopyTarget::Desktop)
        .map_err(|e| ClipboardError {
            terminal,
            desktop: e.to_string(),
        })
}

/// `ESC ] 52 ; c ; <base64> ESC \`
fn write_osc52(out: &mut impl Write, text: &str) -> io::Result<()> {
    write!(out, "\x1b]52;c;{}\x1b\\", STANDARD.encode(text))?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Closed;

    impl Write for Closed {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn osc52_wraps_base64_payload() {
        let mut out = Vec::new();
        write_osc52(&mut out, "<div></div>").unwrap();
        assert_eq!(out, b"\x1b]52;c;PGRpdj48L2Rpdj4=\x1b\\");
    }

    #[test]
    fn osc52_reports_write_failure() {
        let err = write_osc52(&mut Closed, "x").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }

    #[test]
    fn error_names_both_transports() {
        let err = ClipboardError {
            terminal: io::Error::new(io::ErrorKind::BrokenPipe, "closed"),
            desktop: "no display".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Copy failed (terminal: closed, desktop: no display)"
        );
    }
}
