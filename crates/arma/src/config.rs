//! Configuration for fitting, diagnostics, selection and order proposal.

use crate::error::ArmaError;

fn invalid(reason: String) -> ArmaError {
    ArmaError::InvalidConfig { reason }
}

/// Nelder–Mead settings for the likelihood optimisation.
///
/// # Example
///
/// ```
/// use aether_arma::FitConfig;
///
/// let config = FitConfig::new().with_max_iters(5_000);
/// assert_eq!(config.max_iters(), 5_000);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct FitConfig {
    max_iters: u64,
    sd_tolerance: f64,
}

impl FitConfig {
    /// Creates a configuration with defaults: `max_iters = 20_000`,
    /// `sd_tolerance = 1e-9`.
    pub fn new() -> Self {
        Self {
            max_iters: 20_000,
            sd_tolerance: 1e-9,
        }
    }

    /// Sets the iteration cap. Reaching it is a non-convergence.
    pub fn with_max_iters(mut self, max_iters: u64) -> Self {
        self.max_iters = max_iters;
        self
    }

    /// Sets the simplex cost standard-deviation tolerance.
    pub fn with_sd_tolerance(mut self, tol: f64) -> Self {
        self.sd_tolerance = tol;
        self
    }

    /// Returns the iteration cap.
    pub fn max_iters(&self) -> u64 {
        self.max_iters
    }

    /// Returns the simplex standard-deviation tolerance.
    pub fn sd_tolerance(&self) -> f64 {
        self.sd_tolerance
    }

    /// Validates this configuration.
    pub fn validate(&self) -> Result<(), ArmaError> {
        if self.max_iters == 0 {
            return Err(invalid("max_iters must be >= 1".to_string()));
        }
        if !self.sd_tolerance.is_finite() || self.sd_tolerance <= 0.0 {
            return Err(invalid(format!(
                "sd_tolerance must be finite and > 0, got {}",
                self.sd_tolerance
            )));
        }
        Ok(())
    }
}

impl Default for FitConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Residual diagnostic settings.
#[derive(Clone, Debug, PartialEq)]
pub struct DiagnosticConfig {
    alpha: f64,
    ljung_box_lag: Option<usize>,
}

impl DiagnosticConfig {
    /// Creates a configuration with `alpha = 0.05` and the Ljung–Box lag
    /// derived from the residual count (`round(sqrt(n))`).
    pub fn new() -> Self {
        Self {
            alpha: 0.05,
            ljung_box_lag: None,
        }
    }

    /// Sets the significance level shared by both tests.
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Fixes the Ljung–Box lag instead of deriving it from `n`.
    pub fn with_ljung_box_lag(mut self, lag: Option<usize>) -> Self {
        self.ljung_box_lag = lag;
        self
    }

    /// Returns the significance level.
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Returns the fixed Ljung–Box lag, if any.
    pub fn ljung_box_lag(&self) -> Option<usize> {
        self.ljung_box_lag
    }

    /// Validates this configuration.
    pub fn validate(&self) -> Result<(), ArmaError> {
        if !(self.alpha > 0.0 && self.alpha < 1.0) {
            return Err(invalid(format!(
                "alpha must be in (0, 1), got {}",
                self.alpha
            )));
        }
        if self.ljung_box_lag == Some(0) {
            return Err(invalid("ljung_box_lag must be >= 1".to_string()));
        }
        Ok(())
    }
}

impl Default for DiagnosticConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Model-selection settings.
///
/// The judgment override replaces the AICc-minimal model `A` by a model
/// `B` with fewer diagnostic violations when `B`'s relative AICc gap
/// `(AICc_B − AICc_A) / |AICc_A|` is at most `margin`.
#[derive(Clone, Debug, PartialEq)]
pub struct SelectionConfig {
    margin: f64,
    min_violation_improvement: usize,
    override_enabled: bool,
}

impl SelectionConfig {
    /// Creates a configuration with `margin = 0.10`,
    /// `min_violation_improvement = 1` and the override enabled.
    pub fn new() -> Self {
        Self {
            margin: 0.10,
            min_violation_improvement: 1,
            override_enabled: true,
        }
    }

    /// Sets the relative AICc margin.
    pub fn with_margin(mut self, margin: f64) -> Self {
        self.margin = margin;
        self
    }

    /// Sets how many fewer violations an alternative must have.
    pub fn with_min_violation_improvement(mut self, n: usize) -> Self {
        self.min_violation_improvement = n;
        self
    }

    /// Enables or disables the override. Disabled means pure AICc.
    pub fn with_override(mut self, enabled: bool) -> Self {
        self.override_enabled = enabled;
        self
    }

    /// Returns the relative AICc margin.
    pub fn margin(&self) -> f64 {
        self.margin
    }

    /// Returns the required reduction in violation count.
    pub fn min_violation_improvement(&self) -> usize {
        self.min_violation_improvement
    }

    /// Returns `true` when the override is active.
    pub fn override_enabled(&self) -> bool {
        self.override_enabled
    }

    /// Validates this configuration.
    pub fn validate(&self) -> Result<(), ArmaError> {
        if !self.margin.is_finite() || self.margin < 0.0 {
            return Err(invalid(format!(
                "margin must be finite and >= 0, got {}",
                self.margin
            )));
        }
        if self.min_violation_improvement == 0 {
            return Err(invalid(
                "min_violation_improvement must be >= 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Settings for the ACF/PACF order heuristic.
#[derive(Clone, Debug, PartialEq)]
pub struct ProposalConfig {
    max_p: usize,
    max_q: usize,
    level: f64,
}

impl ProposalConfig {
    /// Creates a configuration with `max_p = 5`, `max_q = 5` and a 95 %
    /// significance band.
    pub fn new() -> Self {
        Self {
            max_p: 5,
            max_q: 5,
            level: 0.95,
        }
    }

    /// Sets the largest AR and MA orders that may be proposed.
    pub fn with_max_orders(mut self, max_p: usize, max_q: usize) -> Self {
        self.max_p = max_p;
        self.max_q = max_q;
        self
    }

    /// Sets the confidence level of the significance band.
    pub fn with_level(mut self, level: f64) -> Self {
        self.level = level;
        self
    }

    /// Returns the largest AR order considered.
    pub fn max_p(&self) -> usize {
        self.max_p
    }

    /// Returns the largest MA order considered.
    pub fn max_q(&self) -> usize {
        self.max_q
    }

    /// Returns the band's confidence level.
    pub fn level(&self) -> f64 {
        self.level
    }

    /// Validates this configuration.
    pub fn validate(&self) -> Result<(), ArmaError> {
        if !(self.level > 0.0 && self.level < 1.0) {
            return Err(invalid(format!(
                "level must be in (0, 1), got {}",
                self.level
            )));
        }
        Ok(())
    }
}

impl Default for ProposalConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        assert!(FitConfig::new().validate().is_ok());
        assert!(DiagnosticConfig::new().validate().is_ok());
        assert!(SelectionConfig::new().validate().is_ok());
        assert!(ProposalConfig::new().validate().is_ok());
        assert_eq!(FitConfig::new().max_iters(), 20_000);
        assert_eq!(SelectionConfig::new().margin(), 0.10);
        assert!(SelectionConfig::new().override_enabled());
    }

    #[test]
    fn fit_config_rejects_bad_values() {
        assert!(FitConfig::new().with_max_iters(0).validate().is_err());
        assert!(FitConfig::new().with_sd_tolerance(-1.0).validate().is_err());
    }

    #[test]
    fn diagnostic_config_rejects_bad_values() {
        assert!(DiagnosticConfig::new().with_alpha(1.0).validate().is_err());
        assert!(
            DiagnosticConfig::new()
                .with_ljung_box_lag(Some(0))
                .validate()
                .is_err()
        );
    }

    #[test]
    fn selection_config_rejects_bad_values() {
        assert!(SelectionConfig::new().with_margin(-0.1).validate().is_err());
        assert!(
            SelectionConfig::new()
                .with_min_violation_improvement(0)
                .validate()
                .is_err()
        );
    }

    #[test]
    fn proposal_config_rejects_bad_level() {
        assert!(ProposalConfig::new().with_level(0.0).validate().is_err());
    }
}
