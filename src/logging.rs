//! Logging setup using `tracing` and `tracing-subscriber`
//!
//! The library emits `debug!` events for every board and drag transition,
//! `warn!` for ignored input and `trace!` for list moves. The binary
//! installs a subscriber once at startup.

use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

use crate::config::LogSettings;

/// Resolved logging options for one process
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// Filter directive used when `RUST_LOG` is unset
    pub filter: String,
    /// Log file; stderr when `None`
    pub file: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: "warn".to_string(),
            file: None,
        }
    }
}

impl LogConfig {
    /// Builds the config from `-v` count and the `[log]` settings
    ///
    /// - 0: the configured level, else `warn`
    /// - 1 (`-v`): `debug`
    /// - 2+ (`-vv`): `trace`
    pub fn from_settings(settings: &LogSettings, verbosity: u8) -> Self {
        let filter = match verbosity {
            0 => settings.level.clone().unwrap_or_else(|| "warn".to_string()),
            1 => "debug".to_string(),
            _ => "trace".to_string(),
        };
        Self {
            filter,
            file: settings.file.clone(),
        }
    }

    fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(&self.filter))
            .unwrap_or_else(|_| EnvFilter::new("warn"))
    }
}

/// Installs the global subscriber, writing to the log file or stderr
pub fn init_logging(config: &LogConfig) -> io::Result<()> {
    match &config.file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            init_with_writer(config, Mutex::new(file), false);
        }
        None => init_with_writer(config, io::stderr, true),
    }
    Ok(())
}

/// Installs the global subscriber only when a log file is configured
///
/// Used by the TUI, where stderr output would corrupt the screen.
pub fn init_file_logging(config: &LogConfig) -> io::Result<()> {
    if config.file.is_some() {
        init_logging(config)?;
    }
    Ok(())
}

fn init_with_writer<W>(config: &LogConfig, writer: W, ansi: bool)
where
    W: for<'writer> MakeWriter<'writer> + Send + Sync + 'static,
{
    // A second install (e.g. in tests) keeps the first subscriber
    let _ = tracing_subscriber::fmt()
        .with_env_filter(config.env_filter())
        .with_writer(writer)
        .with_ansi(ansi)
        .with_target(false)
        .without_time()
        .try_init();
}
