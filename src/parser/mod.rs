//! Escape sequence classifier
//!
//! A push-model state machine that answers, one byte at a time, whether a
//! byte advances the visible column or belongs to an ANSI CSI sequence.
//! It never buffers input and never looks ahead.

mod state;

pub use state::{Classifier, ClassifierState};
