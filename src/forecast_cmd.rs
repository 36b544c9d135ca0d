//! Forecast command: read a series, run the pipeline, write the reports.

use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde::Serialize;
use tracing::{info, info_span, warn};

use aether_pipeline::{ForecastFailure, ForecastReport, ModelReport, Series, run_pipeline};

use crate::cli::ForecastArgs;
use crate::config::AetherConfig;
use crate::convert;
use crate::input::read_series_csv;

/// Contents of `forecast.json`: either the forecast or why it is missing.
#[derive(Serialize)]
#[serde(rename_all = "snake_case")]
enum ForecastOutput<'a> {
    Forecast(&'a ForecastReport),
    Failure(ForecastFailure),
}

/// Combined report printed to stdout when no output directory is set.
#[derive(Serialize)]
struct CombinedOutput<'a> {
    model: &'a ModelReport,
    forecast: ForecastOutput<'a>,
}

/// Run the forecast pipeline for one series.
pub fn run(args: ForecastArgs) -> Result<()> {
    let _cmd = info_span!("forecast").entered();
    // 1. Load project TOML; a missing default file means defaults
    let config = load_config(&args.config)?;

    // 2. Read the series
    let input = args
        .input
        .as_ref()
        .or(config.input.path.as_ref())
        .ok_or_else(|| anyhow!("no input path: set [input].path in config or use --input"))?;
    let column = args.column.as_deref().or(config.input.column.as_deref());
    info!(path = %input.display(), ?column, "reading series");
    let values = read_series_csv(input, column)?;
    let series = Series::new(values, config.input.period).context("invalid input series")?;
    info!(n = series.len(), period = series.period(), "series loaded");

    // 3. Run the pipeline
    let pipeline_cfg = convert::build_pipeline_config(&config, args.horizon)?;
    let outcome = run_pipeline(&series, &pipeline_cfg).context("forecast pipeline failed")?;

    let forecast = match outcome.forecast() {
        Ok(report) => ForecastOutput::Forecast(report),
        Err(err) => {
            warn!(kind = err.kind(), %err, "no forecast produced");
            ForecastOutput::Failure(ForecastFailure::from(err))
        }
    };

    // 4. Write reports
    match args.output_dir.as_ref().or(config.output.dir.as_ref()) {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("failed to create output dir: {}", dir.display()))?;
            write_json(&dir.join("forecast.json"), &forecast)?;
            write_json(&dir.join("model.json"), outcome.model())?;
        }
        None => {
            let combined = CombinedOutput {
                model: outcome.model(),
                forecast,
            };
            let json = serde_json::to_string_pretty(&combined)
                .context("failed to serialize report")?;
            println!("{json}");
        }
    }
    Ok(())
}

fn load_config(path: &Path) -> Result<AetherConfig> {
    if !path.exists() && path == Path::new("aether.toml") {
        info!("no aether.toml found, using defaults");
        return Ok(AetherConfig::default());
    }
    let toml_str = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file: {}", path.display()))?;
    toml::from_str(&toml_str).context("failed to parse TOML config")
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("failed to serialize report")?;
    std::fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))?;
    info!(path = %path.display(), "report written");
    Ok(())
}
