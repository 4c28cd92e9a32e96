//! Process-wide tracing setup: console on stdout plus an appended log file.

use std::fs::OpenOptions;
use std::io::IsTerminal;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use tracing_subscriber::{filter::LevelFilter, fmt, fmt::time::ChronoLocal, prelude::*};

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Minimum level written to the console and the log file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Verbosity {
    Critical,
    Error,
    Warning,
    #[default]
    Info,
    Debug,
}

impl Verbosity {
    pub fn level_filter(self) -> LevelFilter {
        match self {
            // tracing has no level above ERROR.
            Verbosity::Critical | Verbosity::Error => LevelFilter::ERROR,
            Verbosity::Warning => LevelFilter::WARN,
            Verbosity::Info => LevelFilter::INFO,
            Verbosity::Debug => LevelFilter::DEBUG,
        }
    }
}

/// Logging options shared by every subcommand.
#[derive(Args, Debug, Clone)]
pub struct LogArgs {
    /// Log file (appended to). Defaults to `<command>.log` in the current directory.
    #[arg(short = 'l', long = "logfile", value_name = "LOG")]
    pub logfile: Option<PathBuf>,

    /// Verbosity level.
    #[arg(
        short = 'v',
        long = "verbose",
        value_name = "VERBOSE",
        value_enum,
        ignore_case = true,
        default_value_t = Verbosity::Info
    )]
    pub verbose: Verbosity,
}

impl LogArgs {
    /// Resolve to a [`LoggingConfig`], using `default_file` when no log file was given.
    pub fn config(&self, default_file: &str) -> LoggingConfig {
        LoggingConfig {
            level: self.verbose,
            log_file: self
                .logfile
                .clone()
                .unwrap_or_else(|| PathBuf::from(default_file)),
        }
    }
}

/// Where and how much to log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    pub level: Verbosity,
    pub log_file: PathBuf,
}

/// Install the global subscriber. Call once, before any command runs.
pub fn setup_logging(config: &LoggingConfig) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_file)
        .with_context(|| format!("cannot open log file '{}'", config.log_file.display()))?;

    let timer = ChronoLocal::new(TIME_FORMAT.to_string());

    let console_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_ansi(std::io::stdout().is_terminal())
        .with_target(false)
        .with_timer(timer.clone());

    let file_layer = fmt::layer()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .with_timer(timer);

    tracing_subscriber::registry()
        .with(config.level.level_filter())
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .context("logging was already initialised")?;
    Ok(())
}
