//! Fitted ARMA model results.

use crate::error::ArmaError;
use crate::likelihood;
use crate::spec::ArmaSpec;

/// A fitted ARMA(p,q) model produced by [`ArmaSpec::fit()`].
///
/// Holds the estimated AR (`phi`) and MA (`theta`) coefficients, the
/// intercept `mu`, innovation variance (`sigma2`), the fitting window and
/// its one-step residuals, and the maximised conditional log-likelihood.
/// The stored window and residuals seed [`forecast`](crate::forecast).
///
/// ```mermaid
/// graph LR
///     B["ArmaFit"] --> C[".aicc()? for selection"]
///     B --> D["diagnose(&fit, &config)?"]
///     B --> E["forecast(&fit, h)?"]
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct ArmaFit {
    spec: ArmaSpec,
    ar: Vec<f64>,
    ma: Vec<f64>,
    intercept: f64,
    sigma2: f64,
    observations: Vec<f64>,
    residuals: Vec<f64>,
    log_likelihood: f64,
}

impl ArmaFit {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        spec: ArmaSpec,
        ar: Vec<f64>,
        ma: Vec<f64>,
        intercept: f64,
        sigma2: f64,
        observations: Vec<f64>,
        residuals: Vec<f64>,
        log_likelihood: f64,
    ) -> Self {
        Self {
            spec,
            ar,
            ma,
            intercept,
            sigma2,
            observations,
            residuals,
            log_likelihood,
        }
    }

    /// Evaluates a model with known coefficients on `data` without
    /// optimising, e.g. to reproduce a published model.
    ///
    /// # Errors
    ///
    /// [`ArmaError::InvalidConfig`] when the coefficient counts disagree
    /// with `spec`, plus the data validation errors of [`ArmaSpec::fit()`].
    pub fn from_coefficients(
        spec: ArmaSpec,
        ar: Vec<f64>,
        ma: Vec<f64>,
        intercept: f64,
        data: &[f64],
    ) -> Result<Self, ArmaError> {
        if ar.len() != spec.p() || ma.len() != spec.q() {
            return Err(ArmaError::InvalidConfig {
                reason: format!(
                    "ARMA({},{}) needs {} AR and {} MA coefficients, got {} and {}",
                    spec.p(),
                    spec.q(),
                    spec.p(),
                    spec.q(),
                    ar.len(),
                    ma.len()
                ),
            });
        }
        if !intercept.is_finite() || ar.iter().chain(ma.iter()).any(|c| !c.is_finite()) {
            return Err(ArmaError::NonFiniteData);
        }
        crate::optimizer::validate(spec.p(), spec.q(), data)?;
        let residuals = likelihood::conditional_residuals(data, intercept, &ar, &ma);
        let (sigma2, log_likelihood) = likelihood::concentrated(&residuals);
        Ok(Self::new(
            spec,
            ar,
            ma,
            intercept,
            sigma2,
            data.to_vec(),
            residuals,
            log_likelihood,
        ))
    }

    /// Returns the [`ArmaSpec`] that produced this fit.
    pub fn spec(&self) -> ArmaSpec {
        self.spec
    }

    /// Returns the `(p, q)` order of the fitted model.
    pub fn order(&self) -> (usize, usize) {
        (self.spec.p(), self.spec.q())
    }

    /// Returns the AR coefficients (`phi`).
    pub fn ar(&self) -> &[f64] {
        &self.ar
    }

    /// Returns the MA coefficients (`theta`).
    pub fn ma(&self) -> &[f64] {
        &self.ma
    }

    /// Returns the intercept (process mean `mu`).
    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    /// Returns the innovation variance (`sigma2`).
    pub fn sigma2(&self) -> f64 {
        self.sigma2
    }

    /// Returns the series the model was fitted on.
    pub fn observations(&self) -> &[f64] {
        &self.observations
    }

    /// Returns the one-step-ahead prediction residuals.
    pub fn residuals(&self) -> &[f64] {
        &self.residuals
    }

    /// Returns the maximised log-likelihood.
    pub fn log_likelihood(&self) -> f64 {
        self.log_likelihood
    }

    /// Number of estimated coefficients: `p + q + 1` (intercept included).
    pub fn n_params(&self) -> usize {
        self.spec.p() + self.spec.q() + 1
    }

    /// Number of residuals contributing to the likelihood.
    pub fn n_obs(&self) -> usize {
        self.residuals.len()
    }

    /// AIC = −2ℓ + 2k with `k = n_params + 1` (the variance counts).
    pub fn aic(&self) -> f64 {
        let k = (self.n_params() + 1) as f64;
        2.0 * k - 2.0 * self.log_likelihood
    }

    /// Small-sample corrected AIC: `AIC + 2k(k+1)/(n − k − 1)`.
    ///
    /// # Errors
    ///
    /// [`ArmaError::UndefinedCriterion`] when `n − k − 1 <= 0`,
    /// [`ArmaError::NonFiniteCriterion`] when the log-likelihood makes the
    /// criterion NaN or infinite.
    pub fn aicc(&self) -> Result<f64, ArmaError> {
        let n = self.n_obs();
        let k = self.n_params() + 1;
        if n <= k + 1 {
            return Err(ArmaError::UndefinedCriterion { n, k });
        }
        let kf = k as f64;
        let aicc = self.aic() + 2.0 * kf * (kf + 1.0) / (n - k - 1) as f64;
        if !aicc.is_finite() {
            let (p, q) = self.order();
            return Err(ArmaError::NonFiniteCriterion { p, q, value: aicc });
        }
        Ok(aicc)
    }
}
