//! End-to-end pipeline configuration.

use aether_arma::{DiagnosticConfig, FitConfig, ProposalConfig, SelectionConfig};
use aether_boxcox::BoxCoxConfig;

use crate::error::PipelineError;
use crate::invert::InvertConfig;

/// Horizon used when no test segment and no explicit horizon are given.
pub const DEFAULT_HORIZON: usize = 14;

/// Settings for [`run_pipeline`](crate::run_pipeline).
///
/// Every stage keeps its own configuration type; this struct only groups
/// them and adds the series-level choices (differencing lags, candidate
/// orders, train/test split and horizon).
///
/// # Example
///
/// ```
/// use aether_pipeline::PipelineConfig;
///
/// let config = PipelineConfig::new()
///     .with_orders(Some(vec![(5, 1)]))
///     .with_train_len(Some(191))
///     .with_horizon(Some(14));
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug, Default)]
pub struct PipelineConfig {
    boxcox: BoxCoxConfig,
    difference_lags: Option<Vec<usize>>,
    orders: Option<Vec<(usize, usize)>>,
    proposal: ProposalConfig,
    fit: FitConfig,
    diagnostics: DiagnosticConfig,
    selection: SelectionConfig,
    invert: InvertConfig,
    train_len: Option<usize>,
    horizon: Option<usize>,
}

impl PipelineConfig {
    /// Creates a configuration with every stage at its defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the Box–Cox configuration.
    pub fn with_boxcox(mut self, boxcox: BoxCoxConfig) -> Self {
        self.boxcox = boxcox;
        self
    }

    /// Sets the differencing lags. `None` uses `[period, 1]`.
    pub fn with_difference_lags(mut self, lags: Option<Vec<usize>>) -> Self {
        self.difference_lags = lags;
        self
    }

    /// Sets the candidate orders. `None` proposes them from the data.
    pub fn with_orders(mut self, orders: Option<Vec<(usize, usize)>>) -> Self {
        self.orders = orders;
        self
    }

    /// Sets the order-proposal configuration.
    pub fn with_proposal(mut self, proposal: ProposalConfig) -> Self {
        self.proposal = proposal;
        self
    }

    /// Sets the ARMA fitting configuration.
    pub fn with_fit(mut self, fit: FitConfig) -> Self {
        self.fit = fit;
        self
    }

    /// Sets the residual diagnostic configuration.
    pub fn with_diagnostics(mut self, diagnostics: DiagnosticConfig) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    /// Sets the selection configuration.
    pub fn with_selection(mut self, selection: SelectionConfig) -> Self {
        self.selection = selection;
        self
    }

    /// Sets the interval and inversion configuration.
    pub fn with_invert(mut self, invert: InvertConfig) -> Self {
        self.invert = invert;
        self
    }

    /// Sets the training length. `None` trains on the whole series.
    pub fn with_train_len(mut self, train_len: Option<usize>) -> Self {
        self.train_len = train_len;
        self
    }

    /// Sets the forecast horizon. `None` uses the test length, or
    /// [`DEFAULT_HORIZON`] without a test segment.
    pub fn with_horizon(mut self, horizon: Option<usize>) -> Self {
        self.horizon = horizon;
        self
    }

    /// Returns the Box–Cox configuration.
    pub fn boxcox(&self) -> &BoxCoxConfig {
        &self.boxcox
    }

    /// Returns the explicit differencing lags, if any.
    pub fn difference_lags(&self) -> Option<&[usize]> {
        self.difference_lags.as_deref()
    }

    /// Returns the explicit candidate orders, if any.
    pub fn orders(&self) -> Option<&[(usize, usize)]> {
        self.orders.as_deref()
    }

    /// Returns the order-proposal configuration.
    pub fn proposal(&self) -> &ProposalConfig {
        &self.proposal
    }

    /// Returns the ARMA fitting configuration.
    pub fn fit(&self) -> &FitConfig {
        &self.fit
    }

    /// Returns the residual diagnostic configuration.
    pub fn diagnostics(&self) -> &DiagnosticConfig {
        &self.diagnostics
    }

    /// Returns the selection configuration.
    pub fn selection(&self) -> &SelectionConfig {
        &self.selection
    }

    /// Returns the interval and inversion configuration.
    pub fn invert(&self) -> &InvertConfig {
        &self.invert
    }

    /// Returns the training length, if set.
    pub fn train_len(&self) -> Option<usize> {
        self.train_len
    }

    /// Returns the explicit horizon, if set.
    pub fn horizon(&self) -> Option<usize> {
        self.horizon
    }

    /// Validates every stage configuration and the series-level fields.
    ///
    /// # Errors
    ///
    /// [`PipelineError::InvalidConfig`] for out-of-range pipeline fields;
    /// stage errors are wrapped in their own variants.
    pub fn validate(&self) -> Result<(), PipelineError> {
        self.boxcox.validate()?;
        self.proposal.validate()?;
        self.fit.validate()?;
        self.diagnostics.validate()?;
        self.selection.validate()?;
        self.invert.validate()?;
        if let Some(lags) = &self.difference_lags {
            if lags.is_empty() || lags.contains(&0) {
                return Err(PipelineError::InvalidConfig {
                    reason: format!("difference lags must be non-empty and >= 1, got {lags:?}"),
                });
            }
        }
        if matches!(&self.orders, Some(orders) if orders.is_empty()) {
            return Err(PipelineError::InvalidConfig {
                reason: "explicit candidate order list is empty".to_string(),
            });
        }
        if self.train_len == Some(0) {
            return Err(PipelineError::InvalidConfig {
                reason: "train_len must be >= 1".to_string(),
            });
        }
        if self.horizon == Some(0) {
            return Err(PipelineError::InvalidConfig {
                reason: "horizon must be >= 1".to_string(),
            });
        }
        Ok(())
    }
}
