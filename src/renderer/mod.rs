//! Page renderer
//!
//! Walks the input buffer from a page's start offset and produces the
//! bytes of one screen: page content, blank padding, the status line and
//! the action indicator. Column accounting skips escape sequences so that
//! colored input wraps and truncates at the same place as plain text.
//!
//! Overflow is checked before a visible byte is emitted: a byte that would
//! land past the last column either starts a new row (wrap) or is replaced
//! by the truncation marker (no wrap).
//!
//! Truncation suppresses visible bytes only. Escape bytes on the rest of a
//! truncated row are still echoed when color is on, so attribute changes
//! such as a trailing `ESC[0m` keep taking effect on the following rows.

mod status;

pub use status::StatusStyle;

use crate::core::{DisplayOptions, Viewport};
use crate::parser::Classifier;

/// Clear the whole screen
pub const CLEAR_SCREEN: &[u8] = b"\x1b[2J";
/// Move the cursor to the top-left corner
pub const CURSOR_HOME: &[u8] = b"\x1b[0;0f";
/// Marks a truncated row: step back onto the last column and print `$`
pub const TRUNCATION_MARKER: &[u8] = b"\x1b[1D\x1b[1C$";

/// Result of walking one page of input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWalk {
    /// Rows started on screen (the row counter at the end of the walk)
    pub rows: usize,
    /// Offset of the first byte that did not fit, if the page filled up
    pub next_page: Option<usize>,
}

/// Maps buffered bytes to screen rows and columns
#[derive(Debug, Clone)]
pub struct Renderer {
    viewport: Viewport,
    options: DisplayOptions,
    status: StatusStyle,
}

impl Renderer {
    /// Create a renderer for the given content area
    pub fn new(viewport: Viewport, options: DisplayOptions, status: StatusStyle) -> Self {
        Self {
            viewport,
            options,
            status,
        }
    }

    /// Content area
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Display options
    pub fn options(&self) -> DisplayOptions {
        self.options
    }

    /// Emit the page content starting at `start`.
    ///
    /// Stops once the content area is full; `next_page` then holds the
    /// offset of the first unread byte.
    pub fn walk_page(&self, data: &[u8], start: usize, frame: &mut Vec<u8>) -> PageWalk {
        let Viewport { cols, rows } = self.viewport;
        let mut classifier = Classifier::new();
        let mut row = 0;
        let mut col = 0;
        let mut overflowed = false;
        let mut pos = start;

        while pos < data.len() {
            let byte = data[pos];

            if byte == b'\n' {
                frame.push(b'\n');
                pos += 1;
                row += 1;
                col = 0;
                overflowed = false;
                classifier.reset();
                if row >= rows {
                    return PageWalk {
                        rows: row,
                        next_page: Some(pos),
                    };
                }
                continue;
            }

            if !classifier.classify(byte) {
                if self.options.color {
                    frame.push(byte);
                }
                pos += 1;
                continue;
            }

            if overflowed {
                pos += 1;
                continue;
            }

            if col >= cols {
                if self.options.wrap {
                    frame.push(b'\n');
                    row += 1;
                    col = 0;
                    if row >= rows {
                        return PageWalk {
                            rows: row,
                            next_page: Some(pos),
                        };
                    }
                } else {
                    frame.extend_from_slice(TRUNCATION_MARKER);
                    overflowed = true;
                    pos += 1;
                    continue;
                }
            }

            frame.push(byte);
            col += 1;
            pos += 1;
        }

        PageWalk {
            rows: row,
            next_page: None,
        }
    }

    /// Pad with blank lines so the status line always lands on the same row
    pub fn pad(&self, used_rows: usize, frame: &mut Vec<u8>) {
        let blank = self.viewport.rows.saturating_sub(used_rows);
        frame.resize(frame.len() + blank, b'\n');
    }
}
