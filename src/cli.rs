use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Aether seasonal ARMA forecasting pipeline.
#[derive(Parser)]
#[command(
    name = "aether",
    version,
    about = "Seasonal ARMA forecasts for weekly environmental measurements"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Fit, select and forecast a single series.
    Forecast(ForecastArgs),
}

/// Arguments for the `forecast` subcommand.
#[derive(clap::Args)]
pub struct ForecastArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "aether.toml")]
    pub config: PathBuf,

    /// Override input CSV path from config.
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Override input column (name or zero-based index) from config.
    #[arg(long)]
    pub column: Option<String>,

    /// Directory for forecast.json and model.json; prints combined JSON
    /// to stdout when neither this nor `[output].dir` is set.
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Override forecast horizon from config.
    #[arg(long)]
    pub horizon: Option<usize>,
}
