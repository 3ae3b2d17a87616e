//! Bulk Pager Library
//!
//! A streaming terminal pager. Input is buffered as it arrives and shown
//! one screen at a time, with ANSI escape sequences excluded from column
//! counts so colored text wraps and truncates correctly.
//!
//! - `parser`: escape sequence classifier
//! - `core`: input buffer, page index, viewport
//! - `renderer`: page walk, status line
//! - `input`: key navigation
//! - `session`: the pager state tying these together
//! - `tty`: raw mode, non-blocking reads, SIGINT handling
//! - `app`: configuration, command line, event loop

pub mod app;
pub mod core;
pub mod input;
pub mod parser;
pub mod renderer;
pub mod session;
pub mod tty;

pub use session::{PageReport, Session};
