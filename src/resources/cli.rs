use std::path::PathBuf;

use bevy::prelude::*;

/// Command-line arguments parsed at startup.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct CliArgs {
    /// JSON clock config to load.
    /// Usage: `cargo run -- --config clock.json`
    pub config: Option<PathBuf>,

    /// Switch the clock on as soon as it is attached.
    /// Usage: `cargo run -- --start`
    pub start: bool,

    /// Mirror the local wall clock instead of simulating.
    /// Usage: `cargo run -- --system-time`
    pub system_time: bool,
}

impl CliArgs {
    /// Parse the process's command-line arguments.
    pub fn parse() -> Self {
        Self::parse_from(std::env::args().skip(1))
    }

    /// Parse arguments, excluding the program name.
    /// Supports:
    /// - `--config <path>`: Load clock settings from a JSON file
    /// - `--start`: Power the clock on at startup
    /// - `--system-time`: Show the local time
    pub fn parse_from<I>(args: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let args: Vec<String> = args.into_iter().map(Into::into).collect();
        let mut cli = CliArgs::default();

        let mut i = 0;
        while i < args.len() {
            match args[i].as_str() {
                "--config" => {
                    if i + 1 < args.len() {
                        cli.config = Some(PathBuf::from(&args[i + 1]));
                        info!("CLI: Will load clock config '{}'", args[i + 1]);
                        i += 2;
                    } else {
                        warn!("CLI: --config requires a file path argument");
                        i += 1;
                    }
                }
                "--start" => {
                    cli.start = true;
                    i += 1;
                }
                "--system-time" => {
                    cli.system_time = true;
                    i += 1;
                }
                arg => {
                    if arg.starts_with('-') {
                        warn!("CLI: Unknown argument '{}'", arg);
                    }
                    i += 1;
                }
            }
        }

        cli
    }
}
