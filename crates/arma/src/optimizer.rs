//! Nelder–Mead optimiser for conditional maximum-likelihood estimation.
//!
//! Wraps the `argmin` crate to minimise the negative concentrated
//! log-likelihood over `[mu, raw AR, raw MA]`.
//!
//! **Not part of the public API.**

use argmin::core::{CostFunction, Executor, State, TerminationReason, TerminationStatus};
use argmin::solver::neldermead::NelderMead;
use tracing::{debug, warn};

use crate::config::FitConfig;
use crate::error::ArmaError;
use crate::fit::ArmaFit;
use crate::likelihood;
use crate::params::ParamLayout;
use crate::spec::ArmaSpec;

/// Minimum series length for an ARMA(p,q) fit: one more observation than
/// estimated coefficients.
pub(crate) fn min_len(p: usize, q: usize) -> usize {
    p + q + 2
}

pub(crate) fn validate(p: usize, q: usize, data: &[f64]) -> Result<(), ArmaError> {
    if data.is_empty() {
        return Err(ArmaError::EmptyData);
    }
    if data.iter().any(|x| !x.is_finite()) {
        return Err(ArmaError::NonFiniteData);
    }
    let min = min_len(p, q);
    if data.len() < min {
        return Err(ArmaError::InsufficientData {
            n: data.len(),
            min,
        });
    }
    let min_val = data.iter().copied().fold(f64::INFINITY, f64::min);
    let max_val = data.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if (max_val - min_val).abs() < f64::EPSILON {
        return Err(ArmaError::ConstantData);
    }
    Ok(())
}

/// Fits an ARMA(p,q) model by conditional MLE.
///
/// 1. Validate data
/// 2. ARMA(0,0): closed form (sample mean, biased variance)
/// 3. Otherwise minimise the negative concentrated log-likelihood
/// 4. Reject an iteration-capped or non-finite optimum
/// 5. Recompute residuals at the optimum
pub(crate) fn fit_arma(
    spec: ArmaSpec,
    data: &[f64],
    config: &FitConfig,
) -> Result<ArmaFit, ArmaError> {
    config.validate()?;
    let (p, q) = (spec.p(), spec.q());
    validate(p, q, data)?;

    let n = data.len() as f64;
    let mean = data.iter().sum::<f64>() / n;

    if p == 0 && q == 0 {
        let residuals = likelihood::conditional_residuals(data, mean, &[], &[]);
        let (sigma2, log_likelihood) = likelihood::concentrated(&residuals);
        return Ok(ArmaFit::new(
            spec,
            vec![],
            vec![],
            mean,
            sigma2,
            data.to_vec(),
            residuals,
            log_likelihood,
        ));
    }

    let sd = (data.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n).sqrt();
    let layout = ParamLayout::new(p, q);
    let non_convergence = |reason: String| ArmaError::NonConvergence { p, q, reason };

    let cost = ArmaCost { data, layout };
    let solver = NelderMead::new(layout.initial_simplex(mean, sd))
        .with_sd_tolerance(config.sd_tolerance())
        .map_err(|e| non_convergence(e.to_string()))?;
    let result = Executor::new(cost, solver)
        .configure(|state| state.max_iters(config.max_iters()))
        .run()
        .map_err(|e| non_convergence(e.to_string()))?;

    let state = result.state();
    if let TerminationStatus::Terminated(TerminationReason::MaxItersReached) =
        state.get_termination_status()
    {
        warn!(p, q, max_iters = config.max_iters(), "iteration cap reached");
        return Err(non_convergence(format!(
            "reached max_iters = {}",
            config.max_iters()
        )));
    }
    let best = state
        .get_best_param()
        .ok_or_else(|| non_convergence("solver returned no parameters".to_string()))?;
    if !state.get_best_cost().is_finite() || best.iter().any(|x| !x.is_finite()) {
        return Err(non_convergence("non-finite optimum".to_string()));
    }

    let coeffs = layout.decode(best);
    let residuals = likelihood::conditional_residuals(data, coeffs.intercept, &coeffs.ar, &coeffs.ma);
    let (sigma2, log_likelihood) = likelihood::concentrated(&residuals);
    if !log_likelihood.is_finite() {
        return Err(non_convergence("non-finite log-likelihood".to_string()));
    }
    debug!(
        p,
        q,
        iters = state.get_iter(),
        log_likelihood,
        "ARMA fit converged"
    );

    Ok(ArmaFit::new(
        spec,
        coeffs.ar,
        coeffs.ma,
        coeffs.intercept,
        sigma2,
        data.to_vec(),
        residuals,
        log_likelihood,
    ))
}

/// Cost function for argmin: negative concentrated log-likelihood.
struct ArmaCost<'a> {
    data: &'a [f64],
    layout: ParamLayout,
}

impl CostFunction for ArmaCost<'_> {
    type Param = Vec<f64>;
    type Output = f64;

    fn cost(&self, params: &Self::Param) -> Result<Self::Output, argmin::core::Error> {
        let coeffs = self.layout.decode(params);
        let residuals =
            likelihood::conditional_residuals(self.data, coeffs.intercept, &coeffs.ar, &coeffs.ma);
        match likelihood::concentrated(&residuals) {
            (_, ll) if ll.is_finite() => Ok(-ll),
            _ => Ok(f64::MAX),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_distr::{Distribution, Normal};

    fn fit(p: usize, q: usize, data: &[f64]) -> Result<ArmaFit, ArmaError> {
        fit_arma(ArmaSpec::new(p, q), data, &FitConfig::new())
    }

    #[test]
    fn validation_errors() {
        assert!(matches!(fit(1, 0, &[]), Err(ArmaError::EmptyData)));
        assert!(matches!(
            fit(2, 1, &[1.0, 2.0, 3.0, 4.0]),
            Err(ArmaError::InsufficientData { n: 4, min: 5 })
        ));
        assert!(matches!(
            fit(1, 0, &[1.0, f64::NAN, 3.0]),
            Err(ArmaError::NonFiniteData)
        ));
        assert!(matches!(fit(1, 0, &[5.0; 5]), Err(ArmaError::ConstantData)));
    }

    #[test]
    fn arma00_is_closed_form() {
        let data = [1.0, 2.0, 3.0, 4.0, 5.0];
        let fit = fit(0, 0, &data).unwrap();
        assert_eq!(fit.intercept(), 3.0);
        assert_eq!(fit.sigma2(), 2.0);
        assert_eq!(fit.n_obs(), 5);
    }

    #[test]
    fn ar1_coefficient_and_mean_recovery() {
        let (phi, mu) = (0.7, 4.0);
        let mut rng = rand::rngs::StdRng::seed_from_u64(123);
        let normal = Normal::new(0.0, 1.0).unwrap();
        let mut x = 0.0;
        let data: Vec<f64> = (0..1000)
            .map(|_| {
                x = phi * x + normal.sample(&mut rng);
                mu + x
            })
            .collect();

        let fit = fit(1, 0, &data).unwrap();
        assert!((fit.ar()[0] - phi).abs() < 0.1, "phi = {}", fit.ar()[0]);
        assert!((fit.intercept() - mu).abs() < 0.5, "mu = {}", fit.intercept());
        assert!((fit.sigma2() - 1.0).abs() < 0.2, "sigma2 = {}", fit.sigma2());
    }

    #[test]
    fn ma1_recovery_keeps_sign() {
        let theta = 0.5;
        let mut rng = rand::rngs::StdRng::seed_from_u64(456);
        let normal = Normal::new(0.0, 1.0).unwrap();
        let eps: Vec<f64> = (0..1000).map(|_| normal.sample(&mut rng)).collect();
        let data: Vec<f64> = (0..eps.len())
            .map(|t| eps[t] + if t > 0 { theta * eps[t - 1] } else { 0.0 })
            .collect();

        let fit = fit(0, 1, &data).unwrap();
        assert!((fit.ma()[0] - theta).abs() < 0.1, "theta = {}", fit.ma()[0]);
    }

    #[test]
    fn every_order_uses_all_observations() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(789);
        let normal = Normal::new(0.0, 1.0).unwrap();
        let data: Vec<f64> = (0..120).map(|_| normal.sample(&mut rng)).collect();
        for (p, q) in [(0, 0), (1, 0), (0, 2), (2, 1)] {
            assert_eq!(fit(p, q, &data).unwrap().n_obs(), 120);
        }
    }

    #[test]
    fn iteration_cap_is_non_convergence() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(5);
        let normal = Normal::new(0.0, 1.0).unwrap();
        let data: Vec<f64> = (0..200).map(|_| normal.sample(&mut rng)).collect();
        let config = FitConfig::new().with_max_iters(3);
        let err = fit_arma(ArmaSpec::new(2, 1), &data, &config).unwrap_err();
        assert!(matches!(err, ArmaError::NonConvergence { p: 2, q: 1, .. }));
    }
}
