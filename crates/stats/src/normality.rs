//! Shapiro–Wilk normality test (Royston 1992/1995 approximation).
//!
//! Coefficients follow Royston's polynomial approximation to the exact
//! Shapiro–Wilk weights; the p-value uses his normalising transformation of
//! `W`, with one branch for `4 ≤ n ≤ 11` and one for `n ≥ 12`. `n = 3` is
//! handled exactly.

use statrs::distribution::ContinuousCDF;

use crate::error::StatsError;
use crate::normal::standard_normal;

/// Largest sample size the approximation is calibrated for.
const MAX_N: usize = 5000;

const C1: [f64; 6] = [0.0, 0.221157, -0.147981, -2.071190, 4.434685, -2.706056];
const C2: [f64; 6] = [0.0, 0.042981, -0.293762, -1.752461, 5.682633, -3.582633];
const G: [f64; 2] = [-2.273, 0.459];
const C3: [f64; 4] = [0.5440, -0.39978, 0.025054, -6.714e-4];
const C4: [f64; 4] = [1.3822, -0.77857, 0.062767, -0.0020322];
const C5: [f64; 4] = [-1.5861, -0.31082, -0.083751, 0.0038915];
const C6: [f64; 3] = [-0.4803, -0.082676, 0.0030302];

/// Outcome of a Shapiro–Wilk test.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShapiroWilk {
    /// The `W` statistic in `(0, 1]`; values near 1 indicate normality.
    pub statistic: f64,
    /// Upper-tail p-value for the null hypothesis of normality.
    pub p_value: f64,
}

fn poly(coeffs: &[f64], x: f64) -> f64 {
    coeffs.iter().rev().fold(0.0, |acc, c| acc * x + c)
}

/// Runs the Shapiro–Wilk test on `data` (`3 ≤ n ≤ 5000`).
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`StatsError::InsufficientData`] | fewer than 3 or more than 5000 values |
/// | [`StatsError::NonFiniteData`] | any element is NaN or infinite |
/// | [`StatsError::ConstantData`] | all elements are identical |
pub fn shapiro_wilk(data: &[f64]) -> Result<ShapiroWilk, StatsError> {
    let n = data.len();
    if !(3..=MAX_N).contains(&n) {
        return Err(StatsError::InsufficientData { n, min: 3 });
    }
    if data.iter().any(|x| !x.is_finite()) {
        return Err(StatsError::NonFiniteData);
    }

    let mut x = data.to_vec();
    x.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let nf = n as f64;
    let mean = x.iter().sum::<f64>() / nf;
    let ssq: f64 = x.iter().map(|v| (v - mean).powi(2)).sum();
    if ssq < 1e-12 * (1.0 + mean * mean) {
        return Err(StatsError::ConstantData);
    }

    let a = coefficients(n)?;
    let numerator: f64 = a.iter().zip(x.iter()).map(|(ai, xi)| ai * xi).sum();
    let w = ((numerator * numerator) / ssq).min(1.0);

    Ok(ShapiroWilk {
        statistic: w,
        p_value: p_value(w, n)?,
    })
}

/// Antisymmetric Shapiro–Wilk weights for the ordered sample.
fn coefficients(n: usize) -> Result<Vec<f64>, StatsError> {
    let mut a = vec![0.0; n];
    if n == 3 {
        a[0] = -std::f64::consts::FRAC_1_SQRT_2;
        a[2] = std::f64::consts::FRAC_1_SQRT_2;
        return Ok(a);
    }

    let norm = standard_normal()?;
    let nf = n as f64;
    let m: Vec<f64> = (1..=n)
        .map(|i| norm.inverse_cdf((i as f64 - 0.375) / (nf + 0.25)))
        .collect();
    let mm: f64 = m.iter().map(|v| v * v).sum();
    let u = 1.0 / nf.sqrt();

    let a_n = m[n - 1] / mm.sqrt() + poly(&C1, u);
    a[n - 1] = a_n;
    a[0] = -a_n;

    let (phi, first_middle) = if n > 5 {
        let a_n1 = m[n - 2] / mm.sqrt() + poly(&C2, u);
        a[n - 2] = a_n1;
        a[1] = -a_n1;
        let phi = (mm - 2.0 * m[n - 1].powi(2) - 2.0 * m[n - 2].powi(2))
            / (1.0 - 2.0 * a_n.powi(2) - 2.0 * a_n1.powi(2));
        (phi, 2)
    } else {
        let phi = (mm - 2.0 * m[n - 1].powi(2)) / (1.0 - 2.0 * a_n.powi(2));
        (phi, 1)
    };

    let scale = phi.sqrt();
    for i in first_middle..(n - first_middle) {
        a[i] = m[i] / scale;
    }

    Ok(a)
}

fn p_value(w: f64, n: usize) -> Result<f64, StatsError> {
    let nf = n as f64;
    if n == 3 {
        let p = 6.0 / std::f64::consts::PI * (w.sqrt().asin() - 0.75_f64.sqrt().asin());
        return Ok(p.clamp(0.0, 1.0));
    }

    let one_minus = 1.0 - w;
    if one_minus <= 0.0 {
        return Ok(1.0);
    }
    let mut y = one_minus.ln();

    let (m, s) = if n <= 11 {
        let gamma = poly(&G, nf);
        if y >= gamma {
            return Ok(0.0);
        }
        y = -(gamma - y).ln();
        (poly(&C3, nf), poly(&C4, nf).exp())
    } else {
        let ln_n = nf.ln();
        (poly(&C5, ln_n), poly(&C6, ln_n).exp())
    };

    let z = (y - m) / s;
    let p = 1.0 - standard_normal()?.cdf(z);
    Ok(p.clamp(0.0, 1.0))
}
