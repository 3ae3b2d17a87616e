//! Unix terminal implementation
//!
//! Raw keyboard mode through termios, non-blocking data reads, and the
//! `TIOCGWINSZ` size query, all on plain file descriptors.

use std::fs::File;
use std::io;
use std::os::fd::BorrowedFd;
use std::os::unix::io::{AsRawFd, RawFd};

use nix::errno::Errno;
use nix::fcntl::{fcntl, FcntlArg, OFlag};
use nix::libc::{self, STDERR_FILENO, STDIN_FILENO};
use nix::poll::{poll, PollFd, PollFlags};
use nix::sys::termios::{self, LocalFlags, SetArg, SpecialCharacterIndices, Termios};
use nix::unistd::read;

use super::{TtyError, TtyResult, WindowSize};
use crate::app::{ByteSource, KeySource, ReadOutcome};

/// Keyboard in non-canonical, no-echo mode with zero-timeout reads.
///
/// The original attributes are restored on drop. `ISIG` stays set so
/// Ctrl-C still raises SIGINT.
pub struct RawMode {
    fd: RawFd,
    original: Termios,
}

impl RawMode {
    /// Switch `fd` to raw keyboard mode
    pub fn enable(fd: RawFd) -> TtyResult<Self> {
        // SAFETY: the caller keeps fd open for the lifetime of the guard
        let borrowed_fd = unsafe { BorrowedFd::borrow_raw(fd) };
        let original = termios::tcgetattr(borrowed_fd).map_err(TtyError::GetAttr)?;

        let mut raw = original.clone();
        raw.local_flags.remove(LocalFlags::ECHO | LocalFlags::ICANON);
        raw.control_chars[SpecialCharacterIndices::VMIN as usize] = 0;
        raw.control_chars[SpecialCharacterIndices::VTIME as usize] = 0;
        termios::tcsetattr(borrowed_fd, SetArg::TCSANOW, &raw).map_err(TtyError::SetAttr)?;

        tracing::debug!(fd, "raw mode enabled");
        Ok(Self { fd, original })
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        // SAFETY: the fd outlives the guard
        let borrowed_fd = unsafe { BorrowedFd::borrow_raw(self.fd) };
        match termios::tcsetattr(borrowed_fd, SetArg::TCSANOW, &self.original) {
            Ok(()) => tracing::debug!(fd = self.fd, "raw mode restored"),
            Err(e) => tracing::warn!(fd = self.fd, "failed to restore terminal: {}", e),
        }
    }
}

/// Sets `O_NONBLOCK` on a descriptor and puts the old flags back on drop
pub struct NonBlocking {
    fd: RawFd,
    original: OFlag,
}

impl NonBlocking {
    /// Make reads on `fd` return immediately
    pub fn enable(fd: RawFd) -> TtyResult<Self> {
        let flags = fcntl(fd, FcntlArg::F_GETFL).map_err(TtyError::SetNonBlocking)?;
        let original = OFlag::from_bits_truncate(flags);
        fcntl(fd, FcntlArg::F_SETFL(original | OFlag::O_NONBLOCK)).map_err(TtyError::SetNonBlocking)?;
        Ok(Self { fd, original })
    }
}

impl Drop for NonBlocking {
    fn drop(&mut self) {
        if let Err(e) = fcntl(self.fd, FcntlArg::F_SETFL(self.original)) {
            tracing::warn!(fd = self.fd, "failed to restore fd flags: {}", e);
        }
    }
}

/// The data stream being paged: a file or standard input
pub struct FdSource {
    fd: RawFd,
    // Declared before `file` so the flags are restored while the fd is open
    _nonblocking: NonBlocking,
    file: Option<File>,
}

impl FdSource {
    /// Page standard input
    pub fn stdin() -> TtyResult<Self> {
        Ok(Self {
            fd: STDIN_FILENO,
            _nonblocking: NonBlocking::enable(STDIN_FILENO)?,
            file: None,
        })
    }

    /// Page an already opened file
    pub fn from_file(file: File) -> TtyResult<Self> {
        let fd = file.as_raw_fd();
        Ok(Self {
            fd,
            _nonblocking: NonBlocking::enable(fd)?,
            file: Some(file),
        })
    }

    /// Whether the source is a file rather than standard input
    pub fn is_file(&self) -> bool {
        self.file.is_some()
    }
}

impl ByteSource for FdSource {
    fn read_chunk(&mut self, buf: &mut [u8]) -> io::Result<ReadOutcome> {
        match read(self.fd, buf) {
            Ok(0) => Ok(ReadOutcome::Eof),
            Ok(n) => Ok(ReadOutcome::Data(n)),
            // EAGAIN and EWOULDBLOCK are the same value on Linux
            Err(Errno::EAGAIN) | Err(Errno::EINTR) => Ok(ReadOutcome::Pending),
            Err(e) => Err(io::Error::other(TtyError::Read(e))),
        }
    }
}

/// Single-byte keyboard reads from the controlling terminal.
///
/// Keys come from stderr so that piped data on stdin does not interfere.
pub struct TtyKeys {
    fd: RawFd,
    _raw: RawMode,
}

impl TtyKeys {
    /// Put the terminal behind stderr into raw mode and read keys from it
    pub fn stderr() -> TtyResult<Self> {
        Ok(Self {
            fd: STDERR_FILENO,
            _raw: RawMode::enable(STDERR_FILENO)?,
        })
    }

    /// Wait until a key is available or `timeout_ms` elapses
    pub fn poll_ready(&self, timeout_ms: i32) -> TtyResult<bool> {
        // SAFETY: the fd stays open for the lifetime of self
        let borrowed_fd = unsafe { BorrowedFd::borrow_raw(self.fd) };
        let mut fds = [PollFd::new(&borrowed_fd, PollFlags::POLLIN)];
        match poll(&mut fds, timeout_ms) {
            Ok(n) => Ok(n > 0
                && fds[0]
                    .revents()
                    .is_some_and(|r| r.contains(PollFlags::POLLIN))),
            Err(Errno::EINTR) => Ok(false),
            Err(e) => Err(TtyError::Poll(e)),
        }
    }
}

impl KeySource for TtyKeys {
    fn read_key(&mut self) -> io::Result<Option<u8>> {
        let mut key = [0u8; 1];
        match read(self.fd, &mut key) {
            Ok(1) => Ok(Some(key[0])),
            Ok(_) | Err(Errno::EAGAIN) | Err(Errno::EINTR) => Ok(None),
            Err(e) => Err(io::Error::other(TtyError::Read(e))),
        }
    }

    fn idle(&mut self, timeout_ms: u64) -> io::Result<()> {
        let timeout = i32::try_from(timeout_ms).unwrap_or(i32::MAX);
        self.poll_ready(timeout).map_err(io::Error::other)?;
        Ok(())
    }
}

/// Query the size of the terminal behind `fd`
pub fn window_size(fd: RawFd) -> TtyResult<WindowSize> {
    let mut winsize = libc::winsize {
        ws_row: 0,
        ws_col: 0,
        ws_xpixel: 0,
        ws_ypixel: 0,
    };

    // SAFETY: TIOCGWINSZ is a valid ioctl for getting window size
    let result = unsafe { libc::ioctl(fd, libc::TIOCGWINSZ, &mut winsize) };

    if result < 0 {
        Err(TtyError::GetWinsize(Errno::last()))
    } else {
        Ok(WindowSize::new(winsize.ws_col, winsize.ws_row))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Seek, Write};

    #[test]
    fn test_file_source_reads_then_eof() {
        let mut file = tempfile::tempfile().unwrap();
        file.write_all(b"paged content").unwrap();
        file.rewind().unwrap();

        let mut source = FdSource::from_file(file).unwrap();
        assert!(source.is_file());

        let mut buf = [0u8; 64];
        assert_eq!(source.read_chunk(&mut buf).unwrap(), ReadOutcome::Data(13));
        assert_eq!(&buf[..13], b"paged content");
        assert_eq!(source.read_chunk(&mut buf).unwrap(), ReadOutcome::Eof);
    }

    #[test]
    fn test_file_source_respects_chunk_size() {
        let mut file = tempfile::tempfile().unwrap();
        file.write_all(&[b'x'; 100]).unwrap();
        file.rewind().unwrap();

        let mut source = FdSource::from_file(file).unwrap();
        let mut buf = [0u8; 40];
        assert_eq!(source.read_chunk(&mut buf).unwrap(), ReadOutcome::Data(40));
        assert_eq!(source.read_chunk(&mut buf).unwrap(), ReadOutcome::Data(40));
        assert_eq!(source.read_chunk(&mut buf).unwrap(), ReadOutcome::Data(20));
        assert_eq!(source.read_chunk(&mut buf).unwrap(), ReadOutcome::Eof);
    }

    /// Open a pseudo-terminal pair; the slave stands in for the keyboard
    fn open_pty() -> (nix::pty::PtyMaster, File) {
        use nix::pty::{grantpt, posix_openpt, ptsname, unlockpt};

        let master = posix_openpt(OFlag::O_RDWR | OFlag::O_NOCTTY).unwrap();
        grantpt(&master).unwrap();
        unlockpt(&master).unwrap();
        let slave_name = unsafe { ptsname(&master) }.unwrap();
        let slave = std::fs::OpenOptions::new()
            .read(true)
            .write(true)
            .open(slave_name)
            .unwrap();
        (master, slave)
    }

    #[test]
    fn test_raw_mode_round_trip_on_pty() {
        let (_master, slave) = open_pty();
        let before = termios::tcgetattr(&slave).unwrap();
        assert!(before.local_flags.contains(LocalFlags::ICANON));

        {
            let _raw = RawMode::enable(slave.as_raw_fd()).unwrap();
            let raw = termios::tcgetattr(&slave).unwrap();
            assert!(!raw.local_flags.contains(LocalFlags::ECHO));
            assert!(!raw.local_flags.contains(LocalFlags::ICANON));
            assert!(raw.local_flags.contains(LocalFlags::ISIG));
            assert_eq!(raw.control_chars[SpecialCharacterIndices::VMIN as usize], 0);
            assert_eq!(raw.control_chars[SpecialCharacterIndices::VTIME as usize], 0);
        }

        let after = termios::tcgetattr(&slave).unwrap();
        assert_eq!(after.local_flags, before.local_flags);
        assert_eq!(after.control_chars, before.control_chars);
    }

    #[test]
    fn test_read_failure_carries_tty_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.log");
        let file = File::create(&path).unwrap();

        // Write-only descriptor, so read(2) fails with EBADF
        let mut source = FdSource::from_file(file).unwrap();
        let mut buf = [0u8; 8];
        let err = source.read_chunk(&mut buf).unwrap_err();
        let inner = err.get_ref().and_then(|e| e.downcast_ref::<TtyError>());
        assert!(matches!(inner, Some(TtyError::Read(Errno::EBADF))));
    }

    #[test]
    fn test_raw_mode_rejects_non_tty() {
        let file = tempfile::tempfile().unwrap();
        assert!(matches!(RawMode::enable(file.as_raw_fd()), Err(TtyError::GetAttr(_))));
    }

    #[test]
    fn test_window_size_rejects_non_tty() {
        let file = tempfile::tempfile().unwrap();
        assert!(window_size(file.as_raw_fd()).is_err());
    }
}
