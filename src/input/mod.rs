//! Keyboard Navigation Module
//!
//! Maps single raw key bytes read from the controlling terminal to page
//! movements. Navigation only moves between pages that are already known;
//! discovering new pages is the renderer's job.
//!
//! # Keys
//!
//! - `n`: next page (no-op on the last discovered page)
//! - `b`: previous page (no-op on the first page)
//! - `q`: quit
//!
//! Every other byte is remembered as the last action but changes nothing.

/// A decoded key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    NextPage,
    PreviousPage,
    Quit,
    Other(u8),
}

impl Command {
    /// Decode a raw key byte
    pub fn from_key(key: u8) -> Self {
        match key {
            b'n' => Command::NextPage,
            b'b' => Command::PreviousPage,
            b'q' => Command::Quit,
            other => Command::Other(other),
        }
    }
}

/// Navigation state: where the reader is and what they last pressed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Navigator {
    current_page: usize,
    last_action: Option<u8>,
    quit: bool,
}

impl Navigator {
    /// Start on the first page with no action recorded
    pub fn new() -> Self {
        Self::default()
    }

    /// Page currently displayed (0-based)
    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// Last key pressed, if any
    pub fn last_action(&self) -> Option<u8> {
        self.last_action
    }

    /// Whether `q` has been pressed
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Handle one key press against `page_count` known pages.
    ///
    /// Returns `true` if the current page changed.
    pub fn handle_key(&mut self, key: u8, page_count: usize) -> bool {
        self.last_action = Some(key);

        let command = Command::from_key(key);
        let moved = match command {
            Command::NextPage => self.advance(page_count),
            Command::PreviousPage => self.regress(),
            Command::Quit => {
                self.quit = true;
                false
            },
            Command::Other(_) => false,
        };

        tracing::debug!(?command, page = self.current_page, moved, "key handled");
        moved
    }

    /// Move to `page` without recording a key press. The caller checks
    /// that the page is known.
    pub(crate) fn jump_to(&mut self, page: usize) {
        self.current_page = page;
    }

    fn advance(&mut self, page_count: usize) -> bool {
        if self.current_page + 1 >= page_count {
            return false;
        }
        self.current_page += 1;
        true
    }

    fn regress(&mut self) -> bool {
        if self.current_page == 0 {
            return false;
        }
        self.current_page -= 1;
        true
    }
}
