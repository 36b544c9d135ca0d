//! Conditional Gaussian likelihood of an ARMA(p,q) model.

use std::f64::consts::PI;

/// One-step prediction errors of
/// `(y_t − μ) = Σ φ_i (y_{t−i} − μ) + e_t + Σ θ_j e_{t−j}`
/// with pre-sample deviations and errors set to zero.
///
/// Every observation yields a residual, so the count equals `data.len()`
/// for every order.
pub(crate) fn conditional_residuals(data: &[f64], intercept: f64, ar: &[f64], ma: &[f64]) -> Vec<f64> {
    let mut residuals = Vec::with_capacity(data.len());
    for t in 0..data.len() {
        let mut prediction = 0.0;
        for (i, phi) in ar.iter().enumerate() {
            if t > i {
                prediction += phi * (data[t - 1 - i] - intercept);
            }
        }
        for (j, theta) in ma.iter().enumerate() {
            if t > j {
                prediction += theta * residuals[t - 1 - j];
            }
        }
        residuals.push(data[t] - intercept - prediction);
    }
    residuals
}

/// Returns `(σ̂², ℓ)` with `σ̂² = Σe²/n` and the variance concentrated out:
/// `ℓ = −n/2 (ln(2π σ̂²) + 1)`.
pub(crate) fn concentrated(residuals: &[f64]) -> (f64, f64) {
    let n = residuals.len() as f64;
    let sigma2 = residuals.iter().map(|e| e * e).sum::<f64>() / n;
    let log_likelihood = -0.5 * n * ((2.0 * PI * sigma2).ln() + 1.0);
    (sigma2, log_likelihood)
}
