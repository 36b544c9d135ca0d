//! Profile-likelihood selection of the Box–Cox exponent.

use tracing::debug;

use crate::config::BoxCoxConfig;
use crate::error::BoxCoxError;
use crate::params::{BoxCoxParams, LAMBDA_ZERO_TOL};
use crate::transform::{check_domain, forward};

/// Minimum number of observations for the trend regression.
const MIN_OBS: usize = 3;

/// Box–Cox profile log-likelihood of `series` at `lambda`, with the
/// transformed series regressed on its own time index:
///
/// `llf(λ) = −n/2 · ln(RSS(λ)/n) + (λ − 1) Σ ln x`
///
/// where `RSS(λ)` is the residual sum of squares of the least-squares fit
/// `z_t ≈ a + b·t`. Returns `-inf` when the residual variance vanishes.
///
/// `series` must already satisfy the domain check (all values finite and
/// positive).
pub fn profile_log_likelihood(series: &[f64], lambda: f64) -> f64 {
    let n = series.len();
    if n < MIN_OBS {
        return f64::NEG_INFINITY;
    }
    let nf = n as f64;
    let is_log = lambda.abs() < LAMBDA_ZERO_TOL;
    let z: Vec<f64> = series.iter().map(|&x| forward(x, lambda, is_log)).collect();

    let t_mean = (nf - 1.0) / 2.0;
    let z_mean = z.iter().sum::<f64>() / nf;
    let mut s_tt = 0.0;
    let mut s_tz = 0.0;
    let mut s_zz = 0.0;
    for (t, &zt) in z.iter().enumerate() {
        let dt = t as f64 - t_mean;
        let dz = zt - z_mean;
        s_tt += dt * dt;
        s_tz += dt * dz;
        s_zz += dz * dz;
    }
    let rss = s_zz - s_tz * s_tz / s_tt;
    if !rss.is_finite() || rss <= 1e-300 {
        return f64::NEG_INFINITY;
    }

    let log_jacobian: f64 = series.iter().map(|x| x.ln()).sum();
    -0.5 * nf * (rss / nf).ln() + (lambda - 1.0) * log_jacobian
}

fn grid_search(series: &[f64], lo: f64, hi: f64, step: f64, best: &mut (f64, f64)) {
    let steps = ((hi - lo) / step).round() as usize;
    for i in 0..=steps {
        let lambda = (lo + i as f64 * step).min(hi);
        let llf = profile_log_likelihood(series, lambda);
        if llf > best.1 {
            *best = (lambda, llf);
        }
    }
}

/// Selects lambda for `series` according to `config`.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`BoxCoxError::EmptyData`] | `series` is empty |
/// | [`BoxCoxError::InsufficientData`] | fewer than 3 observations |
/// | [`BoxCoxError::Domain`] | a zero, negative or non-finite value |
/// | [`BoxCoxError::DegenerateLikelihood`] | no grid point has a finite likelihood |
/// | [`BoxCoxError::InvalidConfig`] | `config` fails validation |
pub fn fit_lambda(series: &[f64], config: &BoxCoxConfig) -> Result<f64, BoxCoxError> {
    config.validate()?;
    if series.is_empty() {
        return Err(BoxCoxError::EmptyData);
    }
    check_domain(series)?;
    if let Some(lambda) = config.fixed_lambda() {
        return Ok(lambda);
    }
    if series.len() < MIN_OBS {
        return Err(BoxCoxError::InsufficientData {
            n: series.len(),
            min: MIN_OBS,
        });
    }

    let mut best = (f64::NAN, f64::NEG_INFINITY);
    grid_search(
        series,
        config.lambda_min(),
        config.lambda_max(),
        config.coarse_step(),
        &mut best,
    );
    if !best.1.is_finite() {
        return Err(BoxCoxError::DegenerateLikelihood);
    }

    let lo = (best.0 - config.coarse_step()).max(config.lambda_min());
    let hi = (best.0 + config.coarse_step()).min(config.lambda_max());
    grid_search(series, lo, hi, config.fine_step(), &mut best);

    debug!(lambda = best.0, llf = best.1, "selected Box-Cox lambda");
    Ok(best.0)
}

/// Fits lambda on `series` and returns the transformed series together with
/// the recorded parameters.
///
/// # Errors
///
/// See [`fit_lambda`]. A zero or negative value always yields
/// [`BoxCoxError::Domain`], never a NaN-filled output.
#[tracing::instrument(skip(series, config), fields(n = series.len()))]
pub fn fit_transform(
    series: &[f64],
    config: &BoxCoxConfig,
) -> Result<(Vec<f64>, BoxCoxParams), BoxCoxError> {
    let lambda = fit_lambda(series, config)?;
    let params = BoxCoxParams::new(lambda)?.with_floor(config.floor())?;
    let is_log = params.is_log();
    let transformed = series.iter().map(|&x| forward(x, lambda, is_log)).collect();
    Ok((transformed, params))
}
