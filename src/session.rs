//! Pager Session
//!
//! Ties together the input buffer, page index, navigator and renderer.
//! The session is the only owner of the buffer and the page index, so every
//! mutation goes through here.

use serde::Serialize;

use crate::core::{DisplayOptions, InputBuffer, PageIndex, Viewport};
use crate::input::Navigator;
use crate::renderer::{Renderer, StatusStyle, CLEAR_SCREEN, CURSOR_HOME};

/// Summary of the page table, for scripted inspection
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageReport {
    /// Bytes buffered
    pub bytes: usize,
    /// Pages discovered
    pub page_count: usize,
    /// Start offset of each page
    pub offsets: Vec<usize>,
}

/// One pager session over one input stream
#[derive(Debug, Clone)]
pub struct Session {
    buffer: InputBuffer,
    pages: PageIndex,
    navigator: Navigator,
    renderer: Renderer,
}

impl Session {
    /// Create a session with a default-sized input buffer
    pub fn new(viewport: Viewport, options: DisplayOptions) -> Self {
        Self::with_parts(InputBuffer::new(), viewport, options, StatusStyle::default())
    }

    /// Create a session from an explicitly configured buffer and status style
    pub fn with_parts(buffer: InputBuffer, viewport: Viewport, options: DisplayOptions, status: StatusStyle) -> Self {
        Self {
            buffer,
            pages: PageIndex::new(),
            navigator: Navigator::new(),
            renderer: Renderer::new(viewport, options, status),
        }
    }

    /// The input buffer
    pub fn buffer(&self) -> &InputBuffer {
        &self.buffer
    }

    /// Discovered page boundaries
    pub fn pages(&self) -> &PageIndex {
        &self.pages
    }

    /// Number of pages discovered so far
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Page currently displayed (0-based)
    pub fn current_page(&self) -> usize {
        self.navigator.current_page()
    }

    /// Last key pressed
    pub fn last_action(&self) -> Option<u8> {
        self.navigator.last_action()
    }

    /// Whether the reader asked to quit
    pub fn should_quit(&self) -> bool {
        self.navigator.should_quit()
    }

    /// Content area
    pub fn viewport(&self) -> Viewport {
        self.renderer.viewport()
    }

    /// Display options
    pub fn options(&self) -> DisplayOptions {
        self.renderer.options()
    }

    /// Append freshly read input
    pub fn append(&mut self, bytes: &[u8]) {
        self.buffer.append(bytes);
    }

    /// Handle one key press. Returns `true` if the current page changed.
    pub fn handle_key(&mut self, key: u8) -> bool {
        self.navigator.handle_key(key, self.pages.len())
    }

    /// Render the current page into a new frame
    pub fn render(&mut self) -> Vec<u8> {
        let mut frame = Vec::with_capacity(self.buffer.len().min(64 * 1024) + 64);
        self.render_into(&mut frame);
        frame
    }

    /// Render the current page, appending the screen bytes to `frame`.
    ///
    /// If the page fills the screen and it is the last page known, the
    /// start of the following page is recorded. Later renders of the same
    /// page leave the index untouched.
    pub fn render_into(&mut self, frame: &mut Vec<u8>) {
        let current = self.navigator.current_page();
        let start = self.pages.start(current).unwrap_or(0);

        frame.extend_from_slice(CLEAR_SCREEN);
        frame.extend_from_slice(CURSOR_HOME);

        let walk = self.renderer.walk_page(self.buffer.as_bytes(), start, frame);
        if let Some(next) = walk.next_page {
            if current + 1 == self.pages.len() {
                self.pages.push(next);
            }
        }

        self.renderer.pad(walk.rows, frame);
        self.renderer
            .status(current, self.pages.len(), self.navigator.last_action(), frame);
    }

    /// Render page after page until no new boundary turns up, then return
    /// to the page that was current. Used by non-interactive callers that
    /// want the complete page table for the input received so far.
    pub fn discover_all(&mut self) {
        let home = self.navigator.current_page();
        let mut scratch = Vec::new();

        loop {
            scratch.clear();
            self.render_into(&mut scratch);
            let page = self.navigator.current_page();
            if page + 1 >= self.pages.len() {
                break;
            }
            self.navigator.jump_to(page + 1);
        }

        self.navigator.jump_to(home);
    }

    /// Render forward until `page` (0-based) is current or no later page
    /// turns up. Returns the page reached. No key press is recorded.
    pub fn seek_page(&mut self, page: usize) -> usize {
        let mut scratch = Vec::new();

        while self.navigator.current_page() < page {
            scratch.clear();
            self.render_into(&mut scratch);
            let current = self.navigator.current_page();
            if current + 1 >= self.pages.len() {
                break;
            }
            self.navigator.jump_to(current + 1);
        }

        self.navigator.current_page()
    }

    /// Move directly to `page`, clamped to the pages discovered so far
    pub fn goto_page(&mut self, page: usize) {
        self.navigator.jump_to(page.min(self.pages.last_page()));
    }

    /// Snapshot of the page table
    pub fn report(&self) -> PageReport {
        PageReport {
            bytes: self.buffer.len(),
            page_count: self.pages.len(),
            offsets: self.pages.offsets().to_vec(),
        }
    }
}
