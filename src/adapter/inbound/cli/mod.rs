//! Command-line interface.
//!
//! Defines the CLI structure using `clap` and dispatches each subcommand to
//! its handler.

pub mod config;
pub mod forecast;
mod output;
pub mod serve;
pub mod snapshot;

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use crate::error::Result;
use crate::infrastructure::config::settings::Config;

/// Blended profit and ROAS forecasting for ad groups
#[derive(Parser, Debug)]
#[command(name = "profitcast")]
#[command(version)]
pub struct Cli {
    /// Path to the configuration file.
    #[arg(short, long, global = true, default_value = "config.toml")]
    pub config: PathBuf,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the REST server with the snapshot and sheet sync jobs
    Serve,

    /// Print the blended forecast for a date range
    Forecast(ForecastArgs),

    /// Snapshot forecast rows (default: yesterday)
    Snapshot(SnapshotArgs),

    /// Validate the configuration file and print the effective settings
    CheckConfig,
}

/// Arguments for `forecast`.
#[derive(Args, Debug)]
pub struct ForecastArgs {
    /// First day (YYYY-MM-DD); defaults to the trailing window.
    #[arg(long)]
    pub from: Option<NaiveDate>,

    /// Last day (YYYY-MM-DD); defaults to today.
    #[arg(long)]
    pub to: Option<NaiveDate>,

    /// Restrict to one ad group.
    #[arg(long = "ad-group")]
    pub ad_group: Option<String>,

    /// Print only the summary.
    #[arg(long)]
    pub summary: bool,
}

/// Arguments for `snapshot`.
#[derive(Args, Debug)]
pub struct SnapshotArgs {
    /// Single day to snapshot.
    #[arg(long, conflicts_with_all = ["from", "to"])]
    pub date: Option<NaiveDate>,

    /// First day of a range.
    #[arg(long, requires = "to")]
    pub from: Option<NaiveDate>,

    /// Last day of a range.
    #[arg(long, requires = "from")]
    pub to: Option<NaiveDate>,
}

impl Cli {
    /// Load config, initialize logging and run the selected command.
    ///
    /// # Errors
    /// Propagates configuration and command failures.
    pub async fn run(self) -> Result<()> {
        match &self.command {
            Commands::CheckConfig => config::execute(&self.config, self.json),
            Commands::Serve => serve::execute(&self.load()?).await,
            Commands::Forecast(args) => forecast::execute(&self.load()?, args, self.json).await,
            Commands::Snapshot(args) => snapshot::execute(&self.load()?, args, self.json).await,
        }
    }

    fn load(&self) -> Result<Config> {
        let config = Config::load_or_default(&self.config)?;
        config.init_logging();
        Ok(config)
    }
}
