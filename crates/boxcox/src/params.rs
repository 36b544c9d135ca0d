//! Fitted transform parameters.

use serde::{Deserialize, Serialize};

use crate::error::BoxCoxError;

/// Lambda values closer to zero than this use the logarithmic branch.
pub(crate) const LAMBDA_ZERO_TOL: f64 = 1e-10;

/// Recorded Box–Cox parameters: the exponent `lambda` and the base floor
/// applied during inversion.
///
/// Produced once from training data and reused unchanged for every later
/// [`apply`](crate::apply) and [`invert`](crate::invert) call.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoxCoxParams {
    lambda: f64,
    floor: f64,
}

impl BoxCoxParams {
    /// Creates parameters for a known `lambda` with the default floor `1e-6`.
    ///
    /// # Errors
    ///
    /// [`BoxCoxError::InvalidLambda`] if `lambda` is not finite.
    pub fn new(lambda: f64) -> Result<Self, BoxCoxError> {
        if !lambda.is_finite() {
            return Err(BoxCoxError::InvalidLambda { lambda });
        }
        Ok(Self {
            lambda,
            floor: 1e-6,
        })
    }

    /// Replaces the inversion floor.
    ///
    /// # Errors
    ///
    /// [`BoxCoxError::InvalidConfig`] unless `floor` is finite and positive.
    pub fn with_floor(mut self, floor: f64) -> Result<Self, BoxCoxError> {
        if !floor.is_finite() || floor <= 0.0 {
            return Err(BoxCoxError::InvalidConfig {
                reason: format!("floor must be finite and > 0, got {floor}"),
            });
        }
        self.floor = floor;
        Ok(self)
    }

    /// Returns the power-transform exponent.
    pub fn lambda(&self) -> f64 {
        self.lambda
    }

    /// Returns the base floor used when `lambda * y + 1 <= 0`.
    pub fn floor(&self) -> f64 {
        self.floor
    }

    /// Returns `true` when the logarithmic branch is used.
    pub fn is_log(&self) -> bool {
        self.lambda.abs() < LAMBDA_ZERO_TOL
    }
}
