//! Status line and action indicator

use std::io::Write;

use serde::{Deserialize, Serialize};

use super::Renderer;

/// Bold on
const BOLD: &[u8] = b"\x1b[1m";
/// Reset all attributes
const RESET: &[u8] = b"\x1b[0m";
/// Shown in the action slot before any key is pressed, or for keys that
/// have no printable form
const NO_ACTION: u8 = b':';

/// SGR colors for the status line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusStyle {
    /// Foreground SGR code (30-37, 90-97)
    pub fg: u8,
    /// Background SGR code (40-47, 100-107)
    pub bg: u8,
}

impl Default for StatusStyle {
    fn default() -> Self {
        // Black on white
        Self { fg: 30, bg: 47 }
    }
}

impl Renderer {
    /// Emit the status line (unless minimal) followed by the action indicator
    pub fn status(&self, current_page: usize, page_count: usize, last_action: Option<u8>, frame: &mut Vec<u8>) {
        if !self.options.minimal {
            let styled = self.options.style || self.options.color;
            if self.options.style {
                frame.extend_from_slice(BOLD);
            }
            if self.options.color {
                // Writing into a Vec cannot fail
                let _ = write!(frame, "\x1b[{};{}m", self.status.fg, self.status.bg);
            }
            let _ = write!(frame, "PAGE {}/{}", current_page + 1, page_count);
            if styled {
                frame.extend_from_slice(RESET);
            }
            frame.push(b'\n');
        }

        frame.push(action_indicator(last_action));
    }
}

/// The character displayed for the last key pressed
pub(crate) fn action_indicator(last_action: Option<u8>) -> u8 {
    match last_action {
        Some(key) if key.is_ascii_graphic() => key,
        _ => NO_ACTION,
    }
}
