//! Ljung–Box portmanteau test for residual autocorrelation.

use statrs::distribution::{ChiSquared, ContinuousCDF};

use crate::autocorrelation::acf;
use crate::error::StatsError;

/// Outcome of a Ljung–Box test.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LjungBox {
    /// `Q = n(n+2) Σ r_k² / (n − k)`.
    pub statistic: f64,
    /// Upper-tail chi-squared p-value with `df` degrees of freedom.
    pub p_value: f64,
    /// Number of autocorrelation lags summed.
    pub lag: usize,
    /// Degrees of freedom, `lag − fitdf`.
    pub df: usize,
}

/// Ljung–Box test of `data` over lags `1..=lag`, discounting `fitdf`
/// estimated parameters from the chi-squared degrees of freedom.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`StatsError::InvalidLag`] | `lag == 0` or `lag >= data.len()` |
/// | [`StatsError::NoDegreesOfFreedom`] | `lag <= fitdf` |
/// | [`StatsError::ConstantData`] | zero-variance input |
pub fn ljung_box(data: &[f64], lag: usize, fitdf: usize) -> Result<LjungBox, StatsError> {
    if lag <= fitdf {
        return Err(StatsError::NoDegreesOfFreedom { lag, fitdf });
    }
    let r = acf(data, lag)?;
    let n = data.len() as f64;

    let statistic = n
        * (n + 2.0)
        * r.iter()
            .enumerate()
            .map(|(i, rk)| rk * rk / (n - (i + 1) as f64))
            .sum::<f64>();

    let df = lag - fitdf;
    let chi_sq = ChiSquared::new(df as f64).map_err(|e| StatsError::Distribution {
        message: e.to_string(),
    })?;
    let p_value = (1.0 - chi_sq.cdf(statistic)).clamp(0.0, 1.0);

    Ok(LjungBox {
        statistic,
        p_value,
        lag,
        df,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::SeedableRng;
    use rand_distr::{Distribution, Normal};

    #[test]
    fn hand_computed_statistic() {
        let data = [1.0, -1.0, 1.0, -1.0, 1.0, -1.0];
        let lb = ljung_box(&data, 1, 0).unwrap();
        // r_1 = -5/6, Q = 6 * 8 * (25/36) / 5
        assert_relative_eq!(lb.statistic, 6.0 * 8.0 * (25.0 / 36.0) / 5.0, epsilon = 1e-12);
        assert_eq!(lb.df, 1);
    }

    #[test]
    fn white_noise_not_rejected() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(11);
        let normal = Normal::new(0.0, 1.0).unwrap();
        let data: Vec<f64> = (0..400).map(|_| normal.sample(&mut rng)).collect();
        let lb = ljung_box(&data, 20, 0).unwrap();
        assert!(lb.p_value > 0.01, "p = {}", lb.p_value);
    }

    #[test]
    fn ar1_rejected() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(12);
        let normal = Normal::new(0.0, 1.0).unwrap();
        let mut data = vec![0.0; 400];
        for t in 1..400 {
            data[t] = 0.8 * data[t - 1] + normal.sample(&mut rng);
        }
        let lb = ljung_box(&data, 10, 0).unwrap();
        assert!(lb.p_value < 1e-6, "p = {}", lb.p_value);
    }

    #[test]
    fn fitdf_reduces_degrees_of_freedom() {
        let data = [0.5, -0.2, 0.9, -1.1, 0.3, 0.7, -0.6, 0.1, 0.4, -0.8];
        let lb = ljung_box(&data, 3, 2).unwrap();
        assert_eq!(lb.df, 1);
        assert!(matches!(
            ljung_box(&data, 2, 2),
            Err(StatsError::NoDegreesOfFreedom { lag: 2, fitdf: 2 })
        ));
    }
}
