//! SIGINT as a cancellation token
//!
//! The pager loop only ever looks at the token. On Linux `InterruptWatcher`
//! blocks SIGINT for the thread and receives it through a non-blocking
//! signalfd. Elsewhere a handler sets a private flag. In both cases `poll`
//! drains what arrived and cancels the watcher's token, so Ctrl-C unwinds
//! through the normal exit path and the terminal guards get to run.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use super::TtyResult;
use crate::app::Interrupts;

/// Shared stop flag
#[derive(Debug, Clone, Default)]
pub struct StopToken {
    stopped: Arc<AtomicBool>,
}

impl StopToken {
    /// A token that has not been cancelled
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask every holder of this token to stop
    pub fn cancel(&self) {
        self.stopped.store(true, Ordering::SeqCst);
    }

    /// Whether `cancel` has been called on any clone
    pub fn is_cancelled(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
    }
}

/// Turns SIGINT into a cancelled [`StopToken`]
#[cfg(target_os = "linux")]
pub struct InterruptWatcher {
    token: StopToken,
    mask: nix::sys::signal::SigSet,
    fd: nix::sys::signalfd::SignalFd,
}

#[cfg(target_os = "linux")]
impl InterruptWatcher {
    /// Block SIGINT for this thread and start receiving it on a signalfd
    pub fn install(token: StopToken) -> TtyResult<Self> {
        use nix::sys::signal::{SigSet, Signal};
        use nix::sys::signalfd::{SfdFlags, SignalFd};

        use super::TtyError;

        let mut mask = SigSet::empty();
        mask.add(Signal::SIGINT);
        mask.thread_block().map_err(TtyError::SignalMask)?;

        let fd = match SignalFd::with_flags(&mask, SfdFlags::SFD_NONBLOCK | SfdFlags::SFD_CLOEXEC) {
            Ok(fd) => fd,
            Err(e) => {
                let _ = mask.thread_unblock();
                return Err(TtyError::SignalFd(e));
            },
        };

        tracing::debug!("SIGINT routed to signalfd");
        Ok(Self { token, mask, fd })
    }

    /// The token cancelled on SIGINT
    pub fn token(&self) -> &StopToken {
        &self.token
    }
}

#[cfg(target_os = "linux")]
impl Interrupts for InterruptWatcher {
    fn poll(&mut self) -> bool {
        loop {
            match self.fd.read_signal() {
                Ok(Some(_)) => {
                    tracing::info!("interrupted");
                    self.token.cancel();
                },
                Ok(None) => break,
                Err(e) => {
                    tracing::warn!("signalfd read failed: {}", e);
                    break;
                },
            }
        }
        self.token.is_cancelled()
    }
}

#[cfg(target_os = "linux")]
impl Drop for InterruptWatcher {
    fn drop(&mut self) {
        if let Err(e) = self.mask.thread_unblock() {
            tracing::warn!("failed to unblock SIGINT: {}", e);
        }
    }
}

/// Set by the SIGINT handler, drained by [`InterruptWatcher::poll`]
#[cfg(not(target_os = "linux"))]
static SIGINT_RECEIVED: AtomicBool = AtomicBool::new(false);

#[cfg(not(target_os = "linux"))]
extern "C" fn sigint_handler(_sig: nix::libc::c_int) {
    // Only async-signal-safe work here: a single atomic store
    SIGINT_RECEIVED.store(true, Ordering::SeqCst);
}

/// Turns SIGINT into a cancelled [`StopToken`]
///
/// Without signalfd a handler records the signal and `poll` moves it onto
/// the token. The previous disposition comes back on drop.
#[cfg(not(target_os = "linux"))]
pub struct InterruptWatcher {
    token: StopToken,
    previous: nix::sys::signal::SigAction,
}

#[cfg(not(target_os = "linux"))]
impl InterruptWatcher {
    /// Install a SIGINT handler that feeds this watcher's token
    pub fn install(token: StopToken) -> TtyResult<Self> {
        use nix::sys::signal::{sigaction, SaFlags, SigAction, SigHandler, SigSet, Signal};

        use super::TtyError;

        SIGINT_RECEIVED.store(false, Ordering::SeqCst);
        let action = SigAction::new(SigHandler::Handler(sigint_handler), SaFlags::SA_RESTART, SigSet::empty());
        // SAFETY: the handler only stores to an atomic
        let previous = unsafe { sigaction(Signal::SIGINT, &action) }.map_err(TtyError::SignalHandler)?;

        tracing::debug!("SIGINT handler installed");
        Ok(Self { token, previous })
    }

    /// The token cancelled on SIGINT
    pub fn token(&self) -> &StopToken {
        &self.token
    }
}

#[cfg(not(target_os = "linux"))]
impl Interrupts for InterruptWatcher {
    fn poll(&mut self) -> bool {
        if SIGINT_RECEIVED.swap(false, Ordering::SeqCst) {
            tracing::info!("interrupted");
            self.token.cancel();
        }
        self.token.is_cancelled()
    }
}

#[cfg(not(target_os = "linux"))]
impl Drop for InterruptWatcher {
    fn drop(&mut self) {
        use nix::sys::signal::{sigaction, Signal};

        // SAFETY: reinstating the disposition that was active before install
        if let Err(e) = unsafe { sigaction(Signal::SIGINT, &self.previous) } {
            tracing::warn!("failed to restore SIGINT disposition: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stop_token() {
        let token = StopToken::new();
        let clone = token.clone();
        assert!(!token.is_cancelled());
        clone.cancel();
        assert!(token.is_cancelled());
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_sigint_cancels_token() {
        use nix::sys::signal::{raise, Signal};

        let mut watcher = InterruptWatcher::install(StopToken::new()).unwrap();
        assert!(!watcher.poll());

        // raise() targets the calling thread, where SIGINT is blocked, so it
        // stays pending for the signalfd
        raise(Signal::SIGINT).unwrap();
        assert!(watcher.poll());
        assert!(watcher.token().is_cancelled());
    }

    #[cfg(not(target_os = "linux"))]
    #[test]
    fn test_sigint_handler_cancels_token() {
        use nix::sys::signal::{raise, Signal};

        let mut watcher = InterruptWatcher::install(StopToken::new()).unwrap();
        assert!(!watcher.poll());

        // The handler runs before raise() returns instead of killing the process
        raise(Signal::SIGINT).unwrap();
        assert!(watcher.poll());
        assert!(watcher.token().is_cancelled());
    }
}
