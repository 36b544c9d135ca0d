//! Sample autocorrelation and partial autocorrelation.

use crate::error::StatsError;

fn validate(data: &[f64], max_lag: usize) -> Result<(f64, f64), StatsError> {
    let n = data.len();
    if n == 0 {
        return Err(StatsError::EmptyData);
    }
    if data.iter().any(|x| !x.is_finite()) {
        return Err(StatsError::NonFiniteData);
    }
    if max_lag == 0 || max_lag >= n {
        return Err(StatsError::InvalidLag { lag: max_lag, n });
    }
    let mean = data.iter().sum::<f64>() / n as f64;
    let denom: f64 = data.iter().map(|x| (x - mean).powi(2)).sum();
    if denom < 1e-12 {
        return Err(StatsError::ConstantData);
    }
    Ok((mean, denom))
}

/// Sample autocorrelations `r_1..=r_max_lag`.
///
/// `r_k = Σ_{t≥k} (x_t − x̄)(x_{t−k} − x̄) / Σ (x_t − x̄)²`, the biased
/// estimator used by portmanteau tests. Element `i` holds lag `i + 1`.
pub fn acf(data: &[f64], max_lag: usize) -> Result<Vec<f64>, StatsError> {
    let (mean, denom) = validate(data, max_lag)?;
    let n = data.len();
    Ok((1..=max_lag)
        .map(|k| {
            (k..n)
                .map(|t| (data[t] - mean) * (data[t - k] - mean))
                .sum::<f64>()
                / denom
        })
        .collect())
}

/// Sample partial autocorrelations for lags `1..=max_lag` via the
/// Durbin–Levinson recursion on [`acf`].
pub fn pacf(data: &[f64], max_lag: usize) -> Result<Vec<f64>, StatsError> {
    let r = acf(data, max_lag)?;
    let mut out = Vec::with_capacity(max_lag);
    let mut phi: Vec<f64> = Vec::with_capacity(max_lag);

    for k in 0..max_lag {
        let num = r[k] - phi.iter().enumerate().map(|(j, p)| p * r[k - 1 - j]).sum::<f64>();
        let den = 1.0 - phi.iter().enumerate().map(|(j, p)| p * r[j]).sum::<f64>();
        let kk = if den.abs() < 1e-12 { 0.0 } else { num / den };

        let prev = phi.clone();
        for j in 0..k {
            phi[j] = prev[j] - kk * prev[k - 1 - j];
        }
        phi.push(kk);
        out.push(kk);
    }

    Ok(out)
}
