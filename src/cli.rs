// src/cli.rs

//! CLI argument parsing using `clap` (derive).

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Command-line arguments for `brolly`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "brolly",
    version,
    about = "Periodically run a backup script and keep an eye on it.",
    long_about = None
)]
pub struct CliArgs {
    /// Configuration directory holding the backup script.
    ///
    /// Default: `brolly` under the platform config dir
    /// (e.g. `~/.config/brolly`).
    #[arg(long, value_name = "PATH")]
    pub dir: Option<PathBuf>,

    /// Run one backup right now and exit; no timer.
    ///
    /// The exit status reflects the run: 0 on success, non-zero otherwise.
    #[arg(long)]
    pub once: bool,

    /// Seconds before the first scheduled run (overrides brolly.toml).
    #[arg(long, value_name = "SECS")]
    pub initial_delay: Option<u64>,

    /// Seconds between scheduled runs (overrides brolly.toml).
    #[arg(long, value_name = "SECS")]
    pub period: Option<u64>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `BROLLY_LOG` or a default of info is used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
