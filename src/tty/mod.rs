//! Terminal handling for the pager
//!
//! Thin wrappers over the POSIX terminal interfaces the pager needs: raw
//! keyboard mode, non-blocking reads, window size queries, and SIGINT
//! delivery as a cancellation token.

mod interrupt;
#[cfg(unix)]
mod unix;

pub use interrupt::{InterruptWatcher, StopToken};
#[cfg(unix)]
pub use unix::{window_size, FdSource, NonBlocking, RawMode, TtyKeys};

/// Error type for terminal operations
#[derive(Debug, thiserror::Error)]
pub enum TtyError {
    #[error("Failed to read terminal attributes: {0}")]
    GetAttr(#[source] nix::Error),

    #[error("Failed to set terminal attributes: {0}")]
    SetAttr(#[source] nix::Error),

    #[error("Failed to query window size: {0}")]
    GetWinsize(#[source] nix::Error),

    #[error("Failed to set non-blocking mode: {0}")]
    SetNonBlocking(#[source] nix::Error),

    #[error("Failed to poll: {0}")]
    Poll(#[source] nix::Error),

    #[error("Failed to read: {0}")]
    Read(#[source] nix::Error),

    #[error("Failed to block SIGINT: {0}")]
    SignalMask(#[source] nix::Error),

    #[error("Failed to install SIGINT handler: {0}")]
    SignalHandler(#[source] nix::Error),

    #[error("Failed to create signalfd: {0}")]
    SignalFd(#[source] nix::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for terminal operations
pub type TtyResult<T> = Result<T, TtyError>;

/// Terminal size in character cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowSize {
    pub cols: u16,
    pub rows: u16,
}

impl WindowSize {
    /// Create a new window size
    pub fn new(cols: u16, rows: u16) -> Self {
        Self { cols, rows }
    }

    /// A size with no rows or no columns carries no information
    pub fn is_empty(&self) -> bool {
        self.cols == 0 || self.rows == 0
    }
}

impl Default for WindowSize {
    fn default() -> Self {
        Self::new(80, 24)
    }
}
