//! Multi-step ARMA forecasts on the stationary scale.

use tracing::debug;

use crate::error::ArmaError;
use crate::fit::ArmaFit;

/// Point forecasts and forecast-error standard errors for steps `1..=h`.
#[derive(Clone, Debug, PartialEq)]
pub struct ForecastResult {
    point_forecasts: Vec<f64>,
    standard_errors: Vec<f64>,
}

impl ForecastResult {
    /// Wraps precomputed forecasts.
    ///
    /// # Errors
    ///
    /// [`ArmaError::InvalidHorizon`] when empty,
    /// [`ArmaError::ShapeMismatch`] when the lengths differ.
    pub fn new(point_forecasts: Vec<f64>, standard_errors: Vec<f64>) -> Result<Self, ArmaError> {
        if point_forecasts.is_empty() {
            return Err(ArmaError::InvalidHorizon);
        }
        if point_forecasts.len() != standard_errors.len() {
            return Err(ArmaError::ShapeMismatch {
                points: point_forecasts.len(),
                standard_errors: standard_errors.len(),
            });
        }
        Ok(Self {
            point_forecasts,
            standard_errors,
        })
    }

    /// Returns the point forecast for each step.
    pub fn point_forecasts(&self) -> &[f64] {
        &self.point_forecasts
    }

    /// Returns the forecast-error standard error for each step.
    pub fn standard_errors(&self) -> &[f64] {
        &self.standard_errors
    }

    /// Returns the number of steps.
    pub fn horizon(&self) -> usize {
        self.point_forecasts.len()
    }
}

/// First `n` MA(∞) weights: `ψ_0 = 1`,
/// `ψ_j = θ_j + Σ_{i=1}^{min(j,p)} φ_i ψ_{j−i}` (`θ_j = 0` for `j > q`).
pub fn psi_weights(ar: &[f64], ma: &[f64], n: usize) -> Vec<f64> {
    let mut psi = Vec::with_capacity(n);
    for j in 0..n {
        if j == 0 {
            psi.push(1.0);
            continue;
        }
        let theta = ma.get(j - 1).copied().unwrap_or(0.0);
        let ar_part: f64 = ar
            .iter()
            .take(j)
            .enumerate()
            .map(|(i, phi)| phi * psi[j - 1 - i])
            .sum();
        psi.push(theta + ar_part);
    }
    psi
}

/// Forecasts `h` steps past the end of the fitting window.
///
/// Future innovations are zero; the recursion is seeded with the stored
/// observations and residuals. `se_h = σ sqrt(Σ_{j<h} ψ_j²)`.
///
/// # Errors
///
/// [`ArmaError::InvalidHorizon`] for `h == 0`.
pub fn forecast(fit: &ArmaFit, h: usize) -> Result<ForecastResult, ArmaError> {
    if h == 0 {
        return Err(ArmaError::InvalidHorizon);
    }
    let mu = fit.intercept();
    let n = fit.observations().len();
    let mut deviations: Vec<f64> = fit.observations().iter().map(|y| y - mu).collect();
    let mut errors = fit.residuals().to_vec();
    deviations.reserve(h);
    errors.reserve(h);

    for t in n..n + h {
        let ar_part: f64 = fit
            .ar()
            .iter()
            .enumerate()
            .filter(|(i, _)| t > *i)
            .map(|(i, phi)| phi * deviations[t - 1 - i])
            .sum();
        let ma_part: f64 = fit
            .ma()
            .iter()
            .enumerate()
            .filter(|(j, _)| t > *j)
            .map(|(j, theta)| theta * errors[t - 1 - j])
            .sum();
        deviations.push(ar_part + ma_part);
        errors.push(0.0);
    }

    let point_forecasts: Vec<f64> = deviations[n..].iter().map(|x| x + mu).collect();
    let sigma = fit.sigma2().sqrt();
    let mut cumulative = 0.0;
    let standard_errors: Vec<f64> = psi_weights(fit.ar(), fit.ma(), h)
        .into_iter()
        .map(|psi| {
            cumulative += psi * psi;
            sigma * cumulative.sqrt()
        })
        .collect();

    debug!(order = ?fit.order(), h, "ARMA forecast");
    ForecastResult::new(point_forecasts, standard_errors)
}
