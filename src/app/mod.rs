//! Application glue module
//!
//! Configuration, command-line handling, the event loop, and the wiring
//! that connects them to a real terminal.

mod cli;
mod config;
mod event_loop;

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};

pub use cli::{Args, USAGE};
pub use config::{default_config_path, BufferConfig, Config, ConfigError, SizeConfig};
pub use event_loop::{ByteSource, EventLoop, Interrupts, KeySource, LoopExit, NoInterrupts, ReadOutcome};

use crate::core::{InputBuffer, Viewport};
use crate::session::Session;
use crate::tty::{TtyError, WindowSize};

/// Errors that end the pager before or during the loop
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Tty(#[from] TtyError),

    #[error("{}: {source}", .path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: ConfigError,
    },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Resolve the configuration: an explicit file must load, the default
/// location falls back to defaults; flags apply last
pub fn resolve_config(args: &Args) -> Result<Config, AppError> {
    let mut config = match &args.config {
        Some(path) => Config::load(path).map_err(|source| AppError::Config {
            path: path.clone(),
            source,
        })?,
        None => Config::load_or_default(),
    };
    args.apply(&mut config);
    Ok(config)
}

/// Build an empty session sized for a terminal of `size`
pub fn build_session(config: &Config, size: WindowSize) -> Session {
    let viewport = Viewport::for_terminal(size.cols, size.rows, config.display.minimal);
    let buffer = InputBuffer::with_sizes(config.buffer.base_capacity, config.buffer.read_chunk);
    Session::with_parts(buffer, viewport, config.display, config.status)
}

/// Open the file to page, reporting the OS error against its path
pub fn open_input(path: &Path) -> Result<File, AppError> {
    File::open(path).map_err(|source| AppError::Open {
        path: path.to_path_buf(),
        source,
    })
}

/// Run the interactive pager on the controlling terminal
#[cfg(unix)]
pub fn run(args: &Args, config: &Config) -> Result<LoopExit, AppError> {
    use std::io::Write;

    use nix::libc::STDOUT_FILENO;

    use crate::tty::{window_size, FdSource, InterruptWatcher, StopToken, TtyKeys};

    // Open the input before touching the terminal so a bad path leaves it alone
    let source = match args.input.as_deref() {
        Some(path) if path != Path::new("-") => FdSource::from_file(open_input(path)?)?,
        _ => FdSource::stdin()?,
    };

    let size = match window_size(STDOUT_FILENO) {
        Ok(size) if !size.is_empty() => size,
        _ => {
            tracing::warn!("output is not a terminal, using fallback size");
            config.fallback_size.into()
        },
    };

    let session = build_session(config, size);
    tracing::info!(cols = size.cols, rows = size.rows, file = source.is_file(), "starting pager");

    let stop = StopToken::new();
    let interrupts = InterruptWatcher::install(stop.clone())?;
    let keys = TtyKeys::stderr()?;

    let mut event_loop = EventLoop::new(session, source, keys, interrupts, stop, config.buffer.read_chunk)
        .with_idle_timeout(config.idle_poll_ms);

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let exit = event_loop.run(&mut out)?;
    out.write_all(b"\n")?;
    out.flush()?;

    tracing::info!(
        ?exit,
        pages = event_loop.session().page_count(),
        bytes = event_loop.session().buffer().len(),
        "pager stopped"
    );
    Ok(exit)
}
