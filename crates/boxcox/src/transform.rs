//! Forward and inverse Box–Cox transform.

use crate::error::BoxCoxError;
use crate::params::BoxCoxParams;

/// Transforms a single value. `x` must be finite and strictly positive.
pub fn apply_value(x: f64, params: &BoxCoxParams) -> Result<f64, BoxCoxError> {
    if !x.is_finite() || x <= 0.0 {
        return Err(BoxCoxError::Domain { index: 0, value: x });
    }
    Ok(forward(x, params.lambda(), params.is_log()))
}

/// Transforms every value of `series` with recorded `params`.
///
/// # Errors
///
/// [`BoxCoxError::Domain`] naming the first value that is zero, negative or
/// non-finite. No partial output is returned.
pub fn apply(series: &[f64], params: &BoxCoxParams) -> Result<Vec<f64>, BoxCoxError> {
    check_domain(series)?;
    let lambda = params.lambda();
    let is_log = params.is_log();
    Ok(series.iter().map(|&x| forward(x, lambda, is_log)).collect())
}

pub(crate) fn check_domain(series: &[f64]) -> Result<(), BoxCoxError> {
    match series
        .iter()
        .enumerate()
        .find(|(_, x)| !x.is_finite() || **x <= 0.0)
    {
        Some((index, &value)) => Err(BoxCoxError::Domain { index, value }),
        None => Ok(()),
    }
}

#[inline]
pub(crate) fn forward(x: f64, lambda: f64, is_log: bool) -> f64 {
    if is_log {
        x.ln()
    } else {
        (x.powf(lambda) - 1.0) / lambda
    }
}

/// Result of a single inversion, recording whether the base floor fired.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Inverted {
    /// Value on the original scale.
    pub value: f64,
    /// `true` if `lambda * y + 1 <= 0` and the base was raised to the floor.
    pub floored: bool,
}

/// Inverts a single transformed value, reporting floor usage.
///
/// Non-finite `y` propagates: the result is non-finite and `floored` is
/// `false`, leaving the decision to the caller.
pub fn invert_value_checked(y: f64, params: &BoxCoxParams) -> Inverted {
    if params.is_log() {
        return Inverted {
            value: y.exp(),
            floored: false,
        };
    }
    let lambda = params.lambda();
    let base = lambda * y + 1.0;
    if base <= 0.0 {
        Inverted {
            value: params.floor().powf(1.0 / lambda),
            floored: true,
        }
    } else {
        Inverted {
            value: base.powf(1.0 / lambda),
            floored: false,
        }
    }
}

/// Inverts a single transformed value, applying the base floor silently.
pub fn invert_value(y: f64, params: &BoxCoxParams) -> f64 {
    invert_value_checked(y, params).value
}

/// Inverts every value of `transformed`.
pub fn invert(transformed: &[f64], params: &BoxCoxParams) -> Vec<f64> {
    transformed
        .iter()
        .map(|&y| invert_value(y, params))
        .collect()
}
