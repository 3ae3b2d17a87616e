//! Command-line arguments

use std::path::PathBuf;

use super::Config;

/// Parsed command line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Args {
    /// File to page (stdin if not specified)
    pub input: Option<PathBuf>,
    /// Configuration file (default location if not specified)
    pub config: Option<PathBuf>,
    /// Write logs to this file instead of stderr
    pub log: Option<PathBuf>,
    pub no_color: bool,
    pub no_style: bool,
    pub wrap: bool,
    pub minimal: bool,
    pub help: bool,
    pub version: bool,
}

impl Args {
    /// Parse arguments, excluding the program name
    pub fn parse<I>(argv: I) -> Result<Self, String>
    where
        I: IntoIterator<Item = String>,
    {
        let mut args = Args::default();
        let mut argv = argv.into_iter();

        while let Some(arg) = argv.next() {
            match arg.as_str() {
                "-h" | "--help" => args.help = true,
                "-V" | "--version" => args.version = true,
                "-C" | "--no-color" => args.no_color = true,
                "-S" | "--no-style" => args.no_style = true,
                "-w" | "--wrap" => args.wrap = true,
                "-m" | "--minimal" => args.minimal = true,
                "--config" => {
                    let path = argv.next().ok_or("--config requires a file")?;
                    args.config = Some(PathBuf::from(path));
                },
                "--log" => {
                    let path = argv.next().ok_or("--log requires a file")?;
                    args.log = Some(PathBuf::from(path));
                },
                "--" => {
                    if let Some(path) = argv.next() {
                        args.set_input(path)?;
                    }
                },
                flag if flag.starts_with('-') && flag.len() > 1 => {
                    return Err(format!("unknown option '{}'", flag));
                },
                _ => args.set_input(arg)?,
            }
        }

        Ok(args)
    }

    fn set_input(&mut self, path: String) -> Result<(), String> {
        if self.input.is_some() {
            return Err("only one input file is supported".to_string());
        }
        self.input = Some(PathBuf::from(path));
        Ok(())
    }

    /// Apply command-line switches on top of a loaded configuration
    pub fn apply(&self, config: &mut Config) {
        if self.no_color {
            config.display.color = false;
        }
        if self.no_style {
            config.display.style = false;
        }
        if self.wrap {
            config.display.wrap = true;
        }
        if self.minimal {
            config.display.minimal = true;
        }
    }
}

/// Usage text for `bulk --help`
pub const USAGE: &str = r#"bulk - a streaming pager

USAGE:
    bulk [OPTIONS] [FILE]

Pages FILE, or standard input when no file is given. Keys are read from
the terminal behind stderr:

    n    next page
    b    previous page
    q    quit

OPTIONS:
    -C, --no-color       Strip escape sequences from the input
    -S, --no-style       Do not bold the status line
    -w, --wrap           Wrap long lines instead of truncating them
    -m, --minimal        Hide the status line
        --config <FILE>  Read configuration from FILE
        --log <FILE>     Write logs to FILE (filter with RUST_LOG)
    -h, --help           Show this help message
    -V, --version        Show version
"#;

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Args, String> {
        Args::parse(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn test_no_args() {
        assert_eq!(parse(&[]).unwrap(), Args::default());
    }

    #[test]
    fn test_flags_and_file() {
        let args = parse(&["-w", "--no-color", "log.txt", "-m"]).unwrap();
        assert!(args.wrap);
        assert!(args.no_color);
        assert!(args.minimal);
        assert!(!args.no_style);
        assert_eq!(args.input, Some(PathBuf::from("log.txt")));
    }

    #[test]
    fn test_option_values() {
        let args = parse(&["--config", "c.json", "--log", "bulk.log"]).unwrap();
        assert_eq!(args.config, Some(PathBuf::from("c.json")));
        assert_eq!(args.log, Some(PathBuf::from("bulk.log")));
        assert!(parse(&["--config"]).is_err());
    }

    #[test]
    fn test_rejects_unknown_and_extra_files() {
        assert!(parse(&["--frobnicate"]).is_err());
        assert!(parse(&["a.txt", "b.txt"]).is_err());
    }

    #[test]
    fn test_dash_dash_and_lone_dash() {
        let args = parse(&["--", "-odd-name"]).unwrap();
        assert_eq!(args.input, Some(PathBuf::from("-odd-name")));
        let args = parse(&["-"]).unwrap();
        assert_eq!(args.input, Some(PathBuf::from("-")));
    }

    #[test]
    fn test_apply_overrides_config() {
        let mut config = Config::default();
        parse(&["-C", "-S", "-w", "-m"]).unwrap().apply(&mut config);
        assert!(!config.display.color);
        assert!(!config.display.style);
        assert!(config.display.wrap);
        assert!(config.display.minimal);
    }
}
