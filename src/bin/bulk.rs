//! Bulk Pager
//!
//! Pages a file or standard input on the controlling terminal.

use std::fs::File;
use std::io;
use std::path::Path;
use std::process::ExitCode;
use std::sync::Mutex;

use bulk::app::{self, Args, USAGE};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn init_logging(log_file: Option<&Path>) -> io::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    match log_file {
        Some(path) => {
            let file = File::create(path)?;
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_ansi(false)
                        .with_writer(Mutex::new(file)),
                )
                .init();
        },
        None => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
                .init();
        },
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = match Args::parse(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("bulk: {}", e);
            eprintln!("Try 'bulk --help' for more information.");
            return ExitCode::FAILURE;
        },
    };

    if args.help {
        print!("{}", USAGE);
        return ExitCode::SUCCESS;
    }
    if args.version {
        println!("bulk {}", env!("CARGO_PKG_VERSION"));
        return ExitCode::SUCCESS;
    }

    if let Err(e) = init_logging(args.log.as_deref()) {
        eprintln!("bulk: cannot open log file: {}", e);
        return ExitCode::FAILURE;
    }

    let config = match app::resolve_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("bulk: {}", e);
            return ExitCode::FAILURE;
        },
    };

    match app::run(&args, &config) {
        Ok(exit) => {
            tracing::debug!(?exit, "exiting");
            ExitCode::SUCCESS
        },
        Err(e) => {
            eprintln!("bulk: {}", e);
            ExitCode::FAILURE
        },
    }
}
