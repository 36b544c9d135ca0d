//! Standard-normal quantiles via statrs.

use statrs::distribution::{ContinuousCDF, Normal};

use crate::error::StatsError;

/// Returns the standard normal distribution.
pub(crate) fn standard_normal() -> Result<Normal, StatsError> {
    Normal::new(0.0, 1.0).map_err(|e| StatsError::Distribution {
        message: e.to_string(),
    })
}

/// Inverse CDF of the standard normal distribution at probability `p`.
///
/// # Errors
///
/// [`StatsError::InvalidProbability`] unless `0 < p < 1`.
pub fn normal_quantile(p: f64) -> Result<f64, StatsError> {
    if !p.is_finite() || p <= 0.0 || p >= 1.0 {
        return Err(StatsError::InvalidProbability { p });
    }
    Ok(standard_normal()?.inverse_cdf(p))
}

/// Two-sided z-multiplier for a central interval at confidence `level`.
///
/// `two_sided_z(0.90) ≈ 1.645`, `two_sided_z(0.95) ≈ 1.960`.
pub fn two_sided_z(level: f64) -> Result<f64, StatsError> {
    if !level.is_finite() || level <= 0.0 || level >= 1.0 {
        return Err(StatsError::InvalidProbability { p: level });
    }
    normal_quantile(0.5 * (1.0 + level))
}
