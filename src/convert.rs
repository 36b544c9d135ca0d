//! Pure conversion functions: TOML config structs -> crate API config types.

use anyhow::{Context, Result};

use crate::config::*;

use aether_arma::{DiagnosticConfig, FitConfig, ProposalConfig, SelectionConfig};
use aether_boxcox::BoxCoxConfig;
use aether_pipeline::{InvertConfig, PipelineConfig};

/// Builds a [`BoxCoxConfig`] from the TOML Box–Cox configuration.
pub fn build_boxcox_config(boxcox: &BoxCoxToml) -> BoxCoxConfig {
    BoxCoxConfig::new()
        .with_bounds(boxcox.lambda_min, boxcox.lambda_max)
        .with_coarse_step(boxcox.coarse_step)
        .with_fine_step(boxcox.fine_step)
        .with_fixed_lambda(boxcox.lambda)
        .with_floor(boxcox.floor)
}

/// Builds the proposal and fit configurations from the TOML model section.
pub fn build_model_configs(model: &ModelToml) -> (ProposalConfig, FitConfig) {
    let proposal = ProposalConfig::new()
        .with_max_orders(model.max_p, model.max_q)
        .with_level(model.proposal_level);
    let fit = FitConfig::new()
        .with_max_iters(model.max_iters)
        .with_sd_tolerance(model.sd_tolerance);
    (proposal, fit)
}

/// Builds a [`DiagnosticConfig`] from the TOML diagnostics configuration.
pub fn build_diagnostic_config(diagnostics: &DiagnosticsToml) -> DiagnosticConfig {
    DiagnosticConfig::new()
        .with_alpha(diagnostics.alpha)
        .with_ljung_box_lag(diagnostics.ljung_box_lag)
}

/// Builds a [`SelectionConfig`] from the TOML selection configuration.
pub fn build_selection_config(selection: &SelectionToml) -> SelectionConfig {
    SelectionConfig::new()
        .with_margin(selection.margin)
        .with_min_violation_improvement(selection.min_violation_improvement)
        .with_override(selection.override_enabled)
}

/// Builds an [`InvertConfig`] from the TOML forecast configuration.
pub fn build_invert_config(forecast: &ForecastToml) -> InvertConfig {
    InvertConfig::new()
        .with_level(forecast.level)
        .with_fallback_levels(forecast.fallback_levels.clone())
        .with_cap_multiple(forecast.cap_multiple)
}

/// Builds and validates a [`PipelineConfig`] from the whole TOML file.
///
/// A command-line `horizon` replaces `[forecast].horizon`.
pub fn build_pipeline_config(config: &AetherConfig, horizon: Option<usize>) -> Result<PipelineConfig> {
    let (proposal, fit) = build_model_configs(&config.model);
    let orders = config
        .model
        .orders
        .as_ref()
        .map(|orders| orders.iter().map(|&[p, q]| (p, q)).collect());
    let cfg = PipelineConfig::new()
        .with_boxcox(build_boxcox_config(&config.boxcox))
        .with_difference_lags(config.model.difference_lags.clone())
        .with_orders(orders)
        .with_proposal(proposal)
        .with_fit(fit)
        .with_diagnostics(build_diagnostic_config(&config.diagnostics))
        .with_selection(build_selection_config(&config.selection))
        .with_invert(build_invert_config(&config.forecast))
        .with_train_len(config.forecast.train_len)
        .with_horizon(horizon.or(config.forecast.horizon));
    cfg.validate().context("invalid pipeline configuration")?;
    Ok(cfg)
}
