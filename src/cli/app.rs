//! Main CLI application structure

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use tracing::debug;

use super::output::{Output, OutputFormat};
use super::{replay, tui};
use crate::config::{Config, IdStrategy};
use crate::logging::{self, LogConfig};

#[derive(Parser)]
#[command(name = "dragboard")]
#[command(author, version, about = "Kanban board with drag-and-drop reordering")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(long, short = 'v', global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Path to a config file
    #[arg(long, global = true, env = "DRAGBOARD_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Open the interactive board
    Tui {
        /// Start with Todo, Doing and Done columns
        #[arg(long)]
        seed: bool,
    },

    /// Run a JSON drag script against an empty board and print the result
    Replay {
        /// Path to the script
        script: PathBuf,

        /// ID strategy (overrides the config file)
        #[arg(long, value_enum)]
        ids: Option<IdStrategy>,
    },

    /// Print the effective configuration
    Config,
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let output = Output::new(cli.format);
    let config = Config::load(cli.config.as_deref())?;

    let log_config = LogConfig::from_settings(&config.log, cli.verbose);
    let logging_result = match cli.command {
        // stderr output would corrupt the alternate screen
        Commands::Tui { .. } => logging::init_file_logging(&log_config),
        _ => logging::init_logging(&log_config),
    };
    logging_result.context("Failed to open log file")?;

    debug!(format = ?cli.format, "dragboard starting");

    match cli.command {
        Commands::Tui { seed } => tui::run(&config, seed)?,
        Commands::Replay { script, ids } => replay::run(&output, &config, &script, ids)?,
        Commands::Config => show_config(&output, &config)?,
    }

    debug!("command completed successfully");
    Ok(())
}

fn show_config(output: &Output, config: &Config) -> Result<()> {
    if output.is_json() {
        output.data(config);
    } else {
        if let Some(path) = Config::default_path() {
            println!("# default location: {}", path.display());
        }
        print!("{}", config.to_toml()?);
    }
    Ok(())
}
