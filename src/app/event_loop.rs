//! Pager event loop
//!
//! Single-threaded polling loop. One iteration:
//!
//! 1. Observe interrupts and the stop token
//! 2. Read at most one chunk of input and append it
//! 3. Read at most one key and navigate
//! 4. Re-render if anything changed, otherwise idle briefly
//!
//! All reads are non-blocking. The session is the single writer of the
//! buffer and the page index, so no locking is involved.

use std::io::{self, Write};

use crate::session::Session;
use crate::tty::StopToken;

/// What a non-blocking read produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadOutcome {
    /// `n` bytes were read
    Data(usize),
    /// Nothing available right now
    Pending,
    /// The stream is exhausted
    Eof,
}

/// The stream being paged
pub trait ByteSource {
    /// Read whatever is available, up to `buf.len()` bytes, without blocking
    fn read_chunk(&mut self, buf: &mut [u8]) -> io::Result<ReadOutcome>;
}

/// The keyboard
pub trait KeySource {
    /// Read one pending key without blocking
    fn read_key(&mut self) -> io::Result<Option<u8>>;

    /// Wait up to `timeout_ms` for a key after an iteration with no work
    fn idle(&mut self, _timeout_ms: u64) -> io::Result<()> {
        Ok(())
    }
}

/// Interrupt delivery
pub trait Interrupts {
    /// Drain pending interrupts; `true` once the loop should stop
    fn poll(&mut self) -> bool;
}

/// Never interrupts
#[derive(Debug, Default, Clone, Copy)]
pub struct NoInterrupts;

impl Interrupts for NoInterrupts {
    fn poll(&mut self) -> bool {
        false
    }
}

/// Why the loop ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopExit {
    /// The reader pressed `q`
    Quit,
    /// The stop token was cancelled
    Interrupted,
}

/// Drives a [`Session`] from a data source and a keyboard
pub struct EventLoop<S, K, I> {
    session: Session,
    source: S,
    keys: K,
    interrupts: I,
    stop: StopToken,
    read_chunk: usize,
    idle_ms: u64,
    eof: bool,
}

impl<S: ByteSource, K: KeySource, I: Interrupts> EventLoop<S, K, I> {
    /// Create a loop reading `read_chunk` bytes per iteration
    pub fn new(session: Session, source: S, keys: K, interrupts: I, stop: StopToken, read_chunk: usize) -> Self {
        Self {
            session,
            source,
            keys,
            interrupts,
            stop,
            read_chunk: read_chunk.max(1),
            idle_ms: 0,
            eof: false,
        }
    }

    /// How long an idle iteration waits on the keyboard
    pub fn with_idle_timeout(mut self, idle_ms: u64) -> Self {
        self.idle_ms = idle_ms;
        self
    }

    /// The session being driven
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Consume the loop, returning the session
    pub fn into_session(self) -> Session {
        self.session
    }

    /// Whether the input has been exhausted
    pub fn input_exhausted(&self) -> bool {
        self.eof
    }

    /// Run until quit or interrupt, writing every frame to `out`
    pub fn run<W: Write>(&mut self, out: &mut W) -> io::Result<LoopExit> {
        let mut chunk = vec![0u8; self.read_chunk];
        let mut frame = Vec::new();
        let mut first = true;

        loop {
            if self.interrupts.poll() {
                self.stop.cancel();
            }
            if self.stop.is_cancelled() {
                return Ok(LoopExit::Interrupted);
            }
            if self.session.should_quit() {
                return Ok(LoopExit::Quit);
            }

            let read = self.read_input(&mut chunk);
            let key = self.keys.read_key()?;
            if let Some(key) = key {
                self.session.handle_key(key);
                if self.session.should_quit() {
                    return Ok(LoopExit::Quit);
                }
            }

            if first || read > 0 || key.is_some() {
                first = false;
                frame.clear();
                self.session.render_into(&mut frame);
                out.write_all(&frame)?;
                out.flush()?;
            } else {
                self.keys.idle(self.idle_ms)?;
            }
        }
    }

    /// Read one chunk into the session, returning the number of bytes added
    fn read_input(&mut self, chunk: &mut [u8]) -> usize {
        if self.eof {
            return 0;
        }

        match self.source.read_chunk(chunk) {
            Ok(ReadOutcome::Data(n)) => {
                self.session.append(&chunk[..n]);
                n
            },
            Ok(ReadOutcome::Pending) => 0,
            Ok(ReadOutcome::Eof) => {
                tracing::info!(bytes = self.session.buffer().len(), "input exhausted");
                self.eof = true;
                0
            },
            Err(e) => {
                tracing::warn!("read failed, treating as end of input: {}", e);
                self.eof = true;
                0
            },
        }
    }
}
