//! Configuration for lambda selection.

use crate::error::BoxCoxError;

/// Configuration for Box–Cox lambda selection.
///
/// The search evaluates the profile log-likelihood on a coarse grid over
/// `[lambda_min, lambda_max]`, then on a fine grid of width `±coarse_step`
/// around the coarse optimum. A fixed lambda bypasses the search.
///
/// # Example
///
/// ```
/// use aether_boxcox::BoxCoxConfig;
///
/// let config = BoxCoxConfig::new()
///     .with_bounds(-1.0, 1.0)
///     .with_floor(1e-8);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct BoxCoxConfig {
    lambda_min: f64,
    lambda_max: f64,
    coarse_step: f64,
    fine_step: f64,
    fixed_lambda: Option<f64>,
    floor: f64,
}

impl BoxCoxConfig {
    /// Creates a configuration with defaults.
    ///
    /// Defaults: `lambda_min = -2`, `lambda_max = 2`, `coarse_step = 0.01`,
    /// `fine_step = 0.0002`, no fixed lambda, `floor = 1e-6`.
    pub fn new() -> Self {
        Self {
            lambda_min: -2.0,
            lambda_max: 2.0,
            coarse_step: 0.01,
            fine_step: 0.0002,
            fixed_lambda: None,
            floor: 1e-6,
        }
    }

    /// Sets the search interval for lambda.
    pub fn with_bounds(mut self, min: f64, max: f64) -> Self {
        self.lambda_min = min;
        self.lambda_max = max;
        self
    }

    /// Sets the coarse grid step.
    pub fn with_coarse_step(mut self, step: f64) -> Self {
        self.coarse_step = step;
        self
    }

    /// Sets the refinement grid step.
    pub fn with_fine_step(mut self, step: f64) -> Self {
        self.fine_step = step;
        self
    }

    /// Skips the search and uses `lambda` as given.
    pub fn with_fixed_lambda(mut self, lambda: Option<f64>) -> Self {
        self.fixed_lambda = lambda;
        self
    }

    /// Sets the inverse-transform base floor recorded in the fitted params.
    pub fn with_floor(mut self, floor: f64) -> Self {
        self.floor = floor;
        self
    }

    /// Returns the lower search bound.
    pub fn lambda_min(&self) -> f64 {
        self.lambda_min
    }

    /// Returns the upper search bound.
    pub fn lambda_max(&self) -> f64 {
        self.lambda_max
    }

    /// Returns the coarse grid step.
    pub fn coarse_step(&self) -> f64 {
        self.coarse_step
    }

    /// Returns the refinement grid step.
    pub fn fine_step(&self) -> f64 {
        self.fine_step
    }

    /// Returns the fixed lambda, if any.
    pub fn fixed_lambda(&self) -> Option<f64> {
        self.fixed_lambda
    }

    /// Returns the inverse-transform base floor.
    pub fn floor(&self) -> f64 {
        self.floor
    }

    /// Validates this configuration.
    pub fn validate(&self) -> Result<(), BoxCoxError> {
        if !self.lambda_min.is_finite()
            || !self.lambda_max.is_finite()
            || self.lambda_min >= self.lambda_max
        {
            return Err(BoxCoxError::InvalidConfig {
                reason: format!(
                    "lambda bounds must be finite with min < max, got [{}, {}]",
                    self.lambda_min, self.lambda_max
                ),
            });
        }
        if !self.coarse_step.is_finite() || self.coarse_step <= 0.0 {
            return Err(BoxCoxError::InvalidConfig {
                reason: format!("coarse_step must be > 0, got {}", self.coarse_step),
            });
        }
        if !self.fine_step.is_finite() || self.fine_step <= 0.0 || self.fine_step > self.coarse_step
        {
            return Err(BoxCoxError::InvalidConfig {
                reason: format!(
                    "fine_step must be in (0, coarse_step], got {}",
                    self.fine_step
                ),
            });
        }
        if let Some(lambda) = self.fixed_lambda {
            if !lambda.is_finite() {
                return Err(BoxCoxError::InvalidLambda { lambda });
            }
        }
        if !self.floor.is_finite() || self.floor <= 0.0 {
            return Err(BoxCoxError::InvalidConfig {
                reason: format!("floor must be finite and > 0, got {}", self.floor),
            });
        }
        Ok(())
    }
}

impl Default for BoxCoxConfig {
    fn default() -> Self {
        Self::new()
    }
}
