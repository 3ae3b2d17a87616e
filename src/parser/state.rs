//! Classifier State Machine
//!
//! Tracks progress through a single ANSI CSI sequence of the form
//! `ESC [ digits (; digits)* final`.
//!
//! # State Machine
//!
//! States:
//! - Idle: Normal text, every byte is visible
//! - EscapeSeen: After ESC, waiting for `[`
//! - BracketSeen: After `ESC [`, waiting for the first digit
//! - InNumber: Collecting a numeric parameter
//! - InSemicolon: After a parameter separator
//! - SequenceEnded: The final byte was consumed; the next byte is
//!   re-examined from Idle
//!
//! Malformed input never errors. Any byte that does not fit the current
//! state drops the machine back to Idle.

/// Classifier state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClassifierState {
    #[default]
    Idle,
    EscapeSeen,
    BracketSeen,
    InNumber,
    InSemicolon,
    SequenceEnded,
}

/// Escape introducer
const ESC: u8 = 0x1B;

/// The escape sequence classifier
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Classifier {
    state: ClassifierState,
}

impl Classifier {
    /// Create a new classifier in the idle state
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state
    pub fn state(&self) -> ClassifierState {
        self.state
    }

    /// Reset to idle. The renderer calls this on every newline.
    pub fn reset(&mut self) {
        self.state = ClassifierState::Idle;
    }

    /// Classify one byte, returning `true` if it occupies a visible column.
    ///
    /// A byte that aborts an `ESC` without `[` is swallowed: it is not
    /// reclassified. The final byte of a sequence is swallowed as well, but
    /// the byte after it gets a fresh idle decision on the same call.
    pub fn classify(&mut self, byte: u8) -> bool {
        loop {
            match self.state {
                ClassifierState::Idle => {
                    if byte != ESC {
                        return true;
                    }
                    self.state = ClassifierState::EscapeSeen;
                },
                ClassifierState::EscapeSeen => {
                    self.state = if byte == b'[' {
                        ClassifierState::BracketSeen
                    } else {
                        ClassifierState::Idle
                    };
                },
                ClassifierState::BracketSeen => {
                    self.state = if byte.is_ascii_digit() {
                        ClassifierState::InNumber
                    } else {
                        ClassifierState::Idle
                    };
                },
                ClassifierState::InNumber => {
                    if byte.is_ascii_digit() {
                        // still in the parameter
                    } else if byte == b';' {
                        self.state = ClassifierState::InSemicolon;
                    } else if byte > b' ' {
                        self.state = ClassifierState::SequenceEnded;
                    } else {
                        self.state = ClassifierState::Idle;
                    }
                },
                ClassifierState::InSemicolon => {
                    self.state = if byte.is_ascii_digit() {
                        ClassifierState::InNumber
                    } else {
                        ClassifierState::SequenceEnded
                    };
                },
                ClassifierState::SequenceEnded => {
                    self.state = ClassifierState::Idle;
                    continue;
                },
            }
            return false;
        }
    }

    /// Count the visible bytes in `data`, continuing from the current state
    pub fn visible_width(&mut self, data: &[u8]) -> usize {
        data.iter().filter(|&&byte| self.classify(byte)).count()
    }
}
