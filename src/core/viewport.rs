//! Viewport geometry and display options

use serde::{Deserialize, Serialize};

/// Lines reserved below the page content for the action indicator
const ACTION_LINES: u16 = 1;

/// Lines reserved for the status line (absent in minimal mode)
const STATUS_LINES: u16 = 1;

/// Display switches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayOptions {
    /// Echo escape sequences found in the input
    pub color: bool,
    /// Bold the status line
    pub style: bool,
    /// Wrap long lines instead of truncating them
    pub wrap: bool,
    /// Hide the status line
    pub minimal: bool,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            color: true,
            style: true,
            wrap: false,
            minimal: false,
        }
    }
}

/// Area available to page content, in character cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub cols: usize,
    pub rows: usize,
}

impl Viewport {
    /// Create a content area directly; both dimensions are clamped to at least 1
    pub fn new(cols: usize, rows: usize) -> Self {
        Self {
            cols: cols.max(1),
            rows: rows.max(1),
        }
    }

    /// Derive the content area from the full terminal size, leaving room
    /// for the action line and, unless `minimal`, the status line
    pub fn for_terminal(cols: u16, rows: u16, minimal: bool) -> Self {
        let mut reserved = ACTION_LINES;
        if !minimal {
            reserved += STATUS_LINES;
        }
        Self::new(cols as usize, rows.saturating_sub(reserved) as usize)
    }
}
