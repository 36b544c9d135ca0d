//! Candidate orders from ACF/PACF significance.

use tracing::debug;

use aether_stats::{acf, pacf, two_sided_z};

use crate::config::ProposalConfig;
use crate::error::ArmaError;

/// Highest lag (1-based) whose value lies outside `±band`, or 0.
fn last_significant(values: &[f64], band: f64) -> usize {
    values
        .iter()
        .rposition(|r| r.abs() > band)
        .map_or(0, |i| i + 1)
}

/// Proposes a small family of `(p, q)` orders for a stationary series.
///
/// With the band `±z/√n`, `p̂` is the highest significant PACF lag up to
/// `max_p` and `q̂` the highest significant ACF lag up to `max_q`. The
/// family is `(p̂, 0)`, `(0, q̂)`, `(p̂, q̂)`, `(p̂, 1)` and `(1, q̂)` where
/// the orders are positive, deduplicated in that order. `(0, 0)` is
/// returned when nothing is significant.
///
/// # Example
///
/// ```
/// use aether_arma::{ProposalConfig, propose_orders};
///
/// let mut x = 0.0_f64;
/// let series: Vec<f64> = (0..200)
///     .map(|t| {
///         x = 0.8 * x + ((t * 7919) % 13) as f64 - 6.0;
///         x
///     })
///     .collect();
/// let orders = propose_orders(&series, &ProposalConfig::new()).unwrap();
/// assert!(!orders.is_empty());
/// ```
///
/// # Errors
///
/// [`ArmaError::Stats`] when the series is too short or constant for the
/// requested lags, [`ArmaError::InvalidConfig`] for an invalid `config`.
pub fn propose_orders(
    series: &[f64],
    config: &ProposalConfig,
) -> Result<Vec<(usize, usize)>, ArmaError> {
    config.validate()?;
    let n = series.len();
    let band = two_sided_z(config.level())? / (n as f64).sqrt();
    let max_lag = n.saturating_sub(1);

    let p_hat = match config.max_p().min(max_lag) {
        0 => 0,
        lag => last_significant(&pacf(series, lag)?, band),
    };
    let q_hat = match config.max_q().min(max_lag) {
        0 => 0,
        lag => last_significant(&acf(series, lag)?, band),
    };

    let mut orders: Vec<(usize, usize)> = Vec::new();
    let mut push = |order: (usize, usize)| {
        if !orders.contains(&order) {
            orders.push(order);
        }
    };
    if p_hat > 0 {
        push((p_hat, 0));
    }
    if q_hat > 0 {
        push((0, q_hat));
    }
    if p_hat > 0 && q_hat > 0 {
        push((p_hat, q_hat));
        push((p_hat, 1));
        push((1, q_hat));
    }
    if orders.is_empty() {
        orders.push((0, 0));
    }
    debug!(p_hat, q_hat, band, ?orders, "proposed candidate orders");
    Ok(orders)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_distr::{Distribution, Normal};

    #[test]
    fn last_significant_lag() {
        assert_eq!(last_significant(&[0.5, 0.01, 0.3, 0.02], 0.1), 3);
        assert_eq!(last_significant(&[0.05, 0.01], 0.1), 0);
    }

    #[test]
    fn ar2_proposes_pacf_cutoff() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(11);
        let normal = Normal::new(0.0, 1.0).unwrap();
        let mut x = vec![0.0; 2000];
        for t in 2..x.len() {
            x[t] = 0.6 * x[t - 1] - 0.3 * x[t - 2] + normal.sample(&mut rng);
        }
        let cfg = ProposalConfig::new().with_max_orders(2, 0);
        assert_eq!(propose_orders(&x, &cfg).unwrap(), vec![(2, 0)]);
    }

    #[test]
    fn family_is_deduplicated() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(3);
        let normal = Normal::new(0.0, 1.0).unwrap();
        let mut x = vec![0.0; 2000];
        for t in 1..x.len() {
            x[t] = 0.7 * x[t - 1] + normal.sample(&mut rng);
        }
        let cfg = ProposalConfig::new().with_max_orders(1, 1);
        // p̂ = q̂ = 1: (1,0), (0,1), (1,1) with duplicates dropped
        assert_eq!(propose_orders(&x, &cfg).unwrap(), vec![(1, 0), (0, 1), (1, 1)]);
    }

    #[test]
    fn zero_max_orders_fall_back_to_white_noise() {
        let cfg = ProposalConfig::new().with_max_orders(0, 0);
        assert_eq!(propose_orders(&[1.0, 3.0, 2.0], &cfg).unwrap(), vec![(0, 0)]);
    }

    #[test]
    fn constant_series_is_an_error() {
        assert!(matches!(
            propose_orders(&[2.0; 30], &ProposalConfig::new()),
            Err(ArmaError::Stats(_))
        ));
    }
}
