//! Residual diagnostics: normality and residual autocorrelation.

use serde::{Deserialize, Serialize};
use tracing::debug;

use aether_stats::{ljung_box, shapiro_wilk};

use crate::config::DiagnosticConfig;
use crate::error::ArmaError;
use crate::fit::ArmaFit;

/// Statistic and p-value of one hypothesis test.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TestOutcome {
    statistic: f64,
    p_value: f64,
    passed: bool,
}

impl TestOutcome {
    /// Records a test result; it passes when `p_value > alpha`.
    pub fn new(statistic: f64, p_value: f64, alpha: f64) -> Self {
        Self {
            statistic,
            p_value,
            passed: p_value > alpha,
        }
    }

    /// Returns the test statistic.
    pub fn statistic(&self) -> f64 {
        self.statistic
    }

    /// Returns the p-value.
    pub fn p_value(&self) -> f64 {
        self.p_value
    }

    /// Returns `true` when the null hypothesis is not rejected.
    pub fn passed(&self) -> bool {
        self.passed
    }
}

/// Shapiro–Wilk and Ljung–Box results for one fitted model.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DiagnosticReport {
    alpha: f64,
    normality: TestOutcome,
    autocorrelation: TestOutcome,
    ljung_box_lag: usize,
    ljung_box_df: usize,
}

impl DiagnosticReport {
    /// Assembles a report from precomputed test results.
    pub fn new(
        alpha: f64,
        normality: TestOutcome,
        autocorrelation: TestOutcome,
        ljung_box_lag: usize,
        ljung_box_df: usize,
    ) -> Self {
        Self {
            alpha,
            normality,
            autocorrelation,
            ljung_box_lag,
            ljung_box_df,
        }
    }

    /// Returns the significance level.
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Returns the Shapiro–Wilk result (statistic `W`).
    pub fn normality(&self) -> &TestOutcome {
        &self.normality
    }

    /// Returns the Ljung–Box result (statistic `Q`).
    pub fn autocorrelation(&self) -> &TestOutcome {
        &self.autocorrelation
    }

    /// Returns the number of autocorrelation lags tested.
    pub fn ljung_box_lag(&self) -> usize {
        self.ljung_box_lag
    }

    /// Returns the chi-squared degrees of freedom, `lag − (p + q)`.
    pub fn ljung_box_df(&self) -> usize {
        self.ljung_box_df
    }

    /// Number of failed tests (0, 1 or 2).
    pub fn violations(&self) -> usize {
        [self.normality.passed, self.autocorrelation.passed]
            .iter()
            .filter(|passed| !**passed)
            .count()
    }

    /// Returns `true` when both tests pass.
    pub fn passes_all(&self) -> bool {
        self.violations() == 0
    }
}

/// Ljung–Box lag for `n` residuals and `fitdf = p + q` fitted
/// coefficients: `round(sqrt(n))` unless fixed, raised to `fitdf + 1` so at
/// least one degree of freedom remains.
pub(crate) fn ljung_box_lag(n: usize, fitdf: usize, fixed: Option<usize>) -> usize {
    let lag = fixed.unwrap_or_else(|| ((n as f64).sqrt().round() as usize).max(1));
    lag.max(fitdf + 1)
}

/// Runs both residual tests on `fit`.
///
/// # Errors
///
/// [`ArmaError::Stats`] when a test cannot be computed (e.g. too few
/// residuals or constant residuals), [`ArmaError::InvalidConfig`] for an
/// invalid `config`.
pub fn diagnose(fit: &ArmaFit, config: &DiagnosticConfig) -> Result<DiagnosticReport, ArmaError> {
    config.validate()?;
    let residuals = fit.residuals();
    let alpha = config.alpha();
    let fitdf = fit.spec().p() + fit.spec().q();
    let lag = ljung_box_lag(residuals.len(), fitdf, config.ljung_box_lag());

    let sw = shapiro_wilk(residuals)?;
    let lb = ljung_box(residuals, lag, fitdf)?;
    let report = DiagnosticReport::new(
        alpha,
        TestOutcome::new(sw.statistic, sw.p_value, alpha),
        TestOutcome::new(lb.statistic, lb.p_value, alpha),
        lb.lag,
        lb.df,
    );
    debug!(
        order = ?fit.order(),
        w = sw.statistic,
        q_stat = lb.statistic,
        violations = report.violations(),
        "residual diagnostics"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::ArmaSpec;
    use rand::SeedableRng;
    use rand_distr::{Distribution, Exp, Normal};

    #[test]
    fn lag_rule() {
        assert_eq!(ljung_box_lag(191, 6, None), 14);
        assert_eq!(ljung_box_lag(138, 6, None), 12);
        assert_eq!(ljung_box_lag(16, 6, None), 7);
        assert_eq!(ljung_box_lag(100, 2, Some(20)), 20);
        assert_eq!(ljung_box_lag(100, 4, Some(2)), 5);
    }

    #[test]
    fn violations_count_failed_tests() {
        let pass = TestOutcome::new(0.99, 0.40, 0.05);
        let fail = TestOutcome::new(0.90, 0.01, 0.05);
        assert!(pass.passed());
        assert!(!fail.passed());
        assert_eq!(DiagnosticReport::new(0.05, pass, pass, 10, 8).violations(), 0);
        assert_eq!(DiagnosticReport::new(0.05, fail, pass, 10, 8).violations(), 1);
        assert_eq!(DiagnosticReport::new(0.05, fail, fail, 10, 8).violations(), 2);
    }

    #[test]
    fn p_value_equal_to_alpha_fails() {
        assert!(!TestOutcome::new(1.0, 0.05, 0.05).passed());
    }

    #[test]
    fn white_noise_fit_passes() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(42);
        let normal = Normal::new(0.0, 1.0).unwrap();
        let data: Vec<f64> = (0..300).map(|_| normal.sample(&mut rng)).collect();
        let fit = ArmaSpec::new(0, 0).fit(&data).unwrap();
        let report = diagnose(&fit, &DiagnosticConfig::new().with_alpha(0.01)).unwrap();
        assert_eq!(report.ljung_box_lag(), 17);
        assert_eq!(report.ljung_box_df(), 17);
        assert!(report.autocorrelation().passed(), "{report:?}");
        assert!(report.normality().passed(), "{report:?}");
    }

    #[test]
    fn skewed_autocorrelated_residuals_fail() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(7);
        let exp = Exp::new(1.0).unwrap();
        let mut x = 0.0;
        let data: Vec<f64> = (0..300)
            .map(|_| {
                x = 0.5 * x + exp.sample(&mut rng);
                x
            })
            .collect();
        // white-noise model leaves both structure and skew in the residuals
        let fit = ArmaSpec::new(0, 0).fit(&data).unwrap();
        let report = diagnose(&fit, &DiagnosticConfig::new()).unwrap();
        assert!(!report.autocorrelation().passed());
        assert_eq!(report.violations(), 2, "{report:?}");
    }
}
