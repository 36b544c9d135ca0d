//! ARMA model specification (unfitted).

use crate::config::FitConfig;
use crate::error::ArmaError;
use crate::fit::ArmaFit;

/// An unfitted ARMA(p,q) model specification.
///
/// Create a spec with [`ArmaSpec::new()`], then call [`ArmaSpec::fit()`] or
/// [`ArmaSpec::fit_with()`] to obtain an [`ArmaFit`].
///
/// ```mermaid
/// graph LR
///     A["ArmaSpec::new(p, q)"] -->|".fit_with(&data, &config)?"| B["ArmaFit"]
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ArmaSpec {
    p: usize,
    q: usize,
}

impl ArmaSpec {
    /// Creates a new ARMA(p,q) specification with AR order `p` and MA order `q`.
    ///
    /// # Example
    ///
    /// ```
    /// use aether_arma::ArmaSpec;
    ///
    /// let spec = ArmaSpec::new(5, 1);
    /// assert_eq!(spec.p(), 5);
    /// assert_eq!(spec.q(), 1);
    /// ```
    pub fn new(p: usize, q: usize) -> Self {
        Self { p, q }
    }

    /// Returns the AR order (`p`).
    pub fn p(&self) -> usize {
        self.p
    }

    /// Returns the MA order (`q`).
    pub fn q(&self) -> usize {
        self.q
    }

    /// Fits with the default [`FitConfig`].
    pub fn fit(&self, data: &[f64]) -> Result<ArmaFit, ArmaError> {
        self.fit_with(data, &FitConfig::default())
    }

    /// Fits this specification by conditional maximum likelihood.
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`ArmaError::EmptyData`] | `data` is empty |
    /// | [`ArmaError::InsufficientData`] | `data.len() < p + q + 2` |
    /// | [`ArmaError::NonFiniteData`] | any element is NaN or infinite |
    /// | [`ArmaError::ConstantData`] | all elements are identical |
    /// | [`ArmaError::NonConvergence`] | iteration cap reached or non-finite optimum |
    /// | [`ArmaError::InvalidConfig`] | `config` fails validation |
    #[tracing::instrument(skip(data, config), fields(n = data.len()))]
    pub fn fit_with(&self, data: &[f64], config: &FitConfig) -> Result<ArmaFit, ArmaError> {
        crate::optimizer::fit_arma(*self, data, config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spec_accessors() {
        let spec = ArmaSpec::new(2, 1);
        assert_eq!((spec.p(), spec.q()), (2, 1));
        assert_ne!(ArmaSpec::new(1, 1), ArmaSpec::new(2, 0));
    }

    #[test]
    fn fit_rejects_short_data() {
        let err = ArmaSpec::new(5, 1).fit(&[1.0, 2.0, 3.0]).unwrap_err();
        assert!(matches!(err, ArmaError::InsufficientData { n: 3, min: 8 }));
    }

    #[test]
    fn fit_with_rejects_invalid_config() {
        let err = ArmaSpec::new(1, 0)
            .fit_with(&[1.0, 2.0, 3.0], &FitConfig::new().with_max_iters(0))
            .unwrap_err();
        assert!(matches!(err, ArmaError::InvalidConfig { .. }));
    }

    #[test]
    fn fit_keeps_every_observation() {
        use rand::SeedableRng;
        use rand_distr::{Distribution, Normal};

        let mut rng = rand::rngs::StdRng::seed_from_u64(138);
        let normal = Normal::new(0.0, 0.3).unwrap();
        let e: Vec<f64> = (0..139).map(|_| normal.sample(&mut rng)).collect();
        // MA(1), theta = -0.6
        let data: Vec<f64> = e.windows(2).map(|w| w[1] - 0.6 * w[0]).collect();

        let fit = ArmaSpec::new(1, 1).fit(&data).unwrap();
        assert_eq!(fit.order(), (1, 1));
        assert_eq!(fit.n_obs(), data.len());
        assert_eq!(fit.residuals().len(), data.len());
        assert!(fit.sigma2() > 0.0 && fit.sigma2() < 0.5);
    }
}
