//! Bulk Headless Renderer
//!
//! Renders pages without a terminal, for scripts and snapshot tests.
//! Reads the whole input from stdin or a file and prints one rendered page
//! or, with `--json`, the complete page table.

use std::io::{self, Read, Write};
use std::process::ExitCode;

use bulk::app::{self, Config};
use bulk::tty::WindowSize;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Clone, Copy)]
enum OutputFormat {
    Frame,
    Json,
}

fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let args: Vec<String> = std::env::args().collect();

    let mut cols = 80u16;
    let mut rows = 24u16;
    let mut page = 1usize;
    let mut input_file: Option<String> = None;
    let mut output_format = OutputFormat::Frame;
    let mut config = Config::default();
    let mut show_help = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-c" | "--cols" => {
                i += 1;
                if i < args.len() {
                    cols = args[i].parse().unwrap_or(80);
                }
            },
            "-r" | "--rows" => {
                i += 1;
                if i < args.len() {
                    rows = args[i].parse().unwrap_or(24);
                }
            },
            "-p" | "--page" => {
                i += 1;
                if i < args.len() {
                    page = args[i].parse().unwrap_or(1).max(1);
                }
            },
            "-C" | "--no-color" => config.display.color = false,
            "-S" | "--no-style" => config.display.style = false,
            "-w" | "--wrap" => config.display.wrap = true,
            "-m" | "--minimal" => config.display.minimal = true,
            "-j" | "--json" => output_format = OutputFormat::Json,
            "-h" | "--help" => show_help = true,
            _ => {
                // Treat as input file if no flag
                if input_file.is_none() && !args[i].starts_with('-') {
                    input_file = Some(args[i].clone());
                }
            },
        }
        i += 1;
    }

    if show_help {
        print_help();
        return ExitCode::SUCCESS;
    }

    // Read input
    let input_data = match &input_file {
        Some(path) => match std::fs::read(path) {
            Ok(data) => data,
            Err(e) => {
                eprintln!("Error reading file '{}': {}", path, e);
                return ExitCode::FAILURE;
            },
        },
        None => {
            let mut data = Vec::new();
            if let Err(e) = io::stdin().read_to_end(&mut data) {
                eprintln!("Error reading stdin: {}", e);
                return ExitCode::FAILURE;
            }
            data
        },
    };

    let mut session = app::build_session(&config, WindowSize::new(cols, rows));
    for chunk in input_data.chunks(config.buffer.read_chunk) {
        session.append(chunk);
    }

    let output = match output_format {
        OutputFormat::Frame => {
            session.seek_page(page - 1);
            session.render()
        },
        OutputFormat::Json => {
            session.discover_all();
            match serde_json::to_vec_pretty(&session.report()) {
                Ok(mut json) => {
                    json.push(b'\n');
                    json
                },
                Err(e) => {
                    eprintln!("Error serializing page report: {}", e);
                    return ExitCode::FAILURE;
                },
            }
        },
    };

    let mut stdout = io::stdout().lock();
    if let Err(e) = stdout.write_all(&output).and_then(|()| stdout.flush()) {
        eprintln!("Error writing output: {}", e);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

fn print_help() {
    println!("Bulk Headless Renderer");
    println!();
    println!("Usage: bulk-headless [OPTIONS] [INPUT_FILE]");
    println!();
    println!("Options:");
    println!("  -c, --cols <N>     Set terminal width (default: 80)");
    println!("  -r, --rows <N>     Set terminal height (default: 24)");
    println!("  -p, --page <N>     Render page N, 1-based (default: 1)");
    println!("  -C, --no-color     Strip escape sequences from the input");
    println!("  -S, --no-style     Do not bold the status line");
    println!("  -w, --wrap         Wrap long lines instead of truncating them");
    println!("  -m, --minimal      Hide the status line");
    println!("  -j, --json         Print the page table as JSON");
    println!("  -h, --help         Show this help message");
    println!();
    println!("If no input file is specified, reads from stdin.");
    println!();
    println!("Examples:");
    println!("  printf 'a\\x1b[31mred\\x1b[0m\\n' | bulk-headless -c 40 -r 10");
    println!("  bulk-headless --json -r 40 build.log");
}
