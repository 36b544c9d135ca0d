//! Serializable run reports.

use serde::{Deserialize, Serialize};

use aether_arma::{CandidateFailure, DiagnosticReport, OverrideRationale, SelectionResult};
use aether_boxcox::BoxCoxParams;

use crate::accuracy::AccuracyReport;
use crate::clamp::ClampReport;
use crate::error::PipelineError;
use crate::invert::OriginalScaleForecast;

/// One forecast step on the original scale.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ForecastStep {
    /// Steps ahead of the training data (1-based).
    pub step: usize,
    /// Point forecast.
    pub point: f64,
    /// Clamped lower bound.
    pub lower: f64,
    /// Clamped upper bound.
    pub upper: f64,
}

/// Original-scale forecast with its interval provenance.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ForecastReport {
    /// Number of forecast steps.
    pub horizon: usize,
    /// Confidence level that was asked for.
    pub requested_level: f64,
    /// Confidence level the bounds were built at.
    pub used_level: f64,
    /// Per-step forecasts.
    pub steps: Vec<ForecastStep>,
    /// Bound adjustments made by the stability clamp.
    pub clamp: ClampReport,
    /// Hold-out scores, when test data overlaps the horizon.
    pub accuracy: Option<AccuracyReport>,
}

impl ForecastReport {
    pub(crate) fn new(forecast: &OriginalScaleForecast, accuracy: Option<AccuracyReport>) -> Self {
        let steps = forecast
            .point()
            .iter()
            .zip(forecast.lower())
            .zip(forecast.upper())
            .enumerate()
            .map(|(i, ((&point, &lower), &upper))| ForecastStep {
                step: i + 1,
                point,
                lower,
                upper,
            })
            .collect();
        Self {
            horizon: forecast.horizon(),
            requested_level: forecast.requested_level(),
            used_level: forecast.used_level(),
            steps,
            clamp: *forecast.clamp(),
            accuracy,
        }
    }
}

/// A forecast that could not be built after a model was selected.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ForecastFailure {
    /// Machine-readable error kind, see [`PipelineError::kind`].
    pub kind: String,
    /// Human-readable error message.
    pub message: String,
}

impl From<&PipelineError> for ForecastFailure {
    fn from(err: &PipelineError) -> Self {
        Self {
            kind: err.kind().to_string(),
            message: err.to_string(),
        }
    }
}

/// A candidate that was fitted and ranked.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CandidateReport {
    /// AR order.
    pub p: usize,
    /// MA order.
    pub q: usize,
    /// Small-sample corrected AIC.
    pub aicc: f64,
    /// Conditional log-likelihood at the optimum.
    pub log_likelihood: f64,
    /// Innovation variance estimate.
    pub sigma2: f64,
    /// Residual normality and autocorrelation tests.
    pub diagnostics: DiagnosticReport,
}

/// A candidate that failed to fit or to score.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FailureReport {
    /// AR order.
    pub p: usize,
    /// MA order.
    pub q: usize,
    /// Machine-readable error kind, see [`PipelineError::kind`].
    pub kind: String,
    /// Human-readable error message.
    pub message: String,
}

impl From<&CandidateFailure> for FailureReport {
    fn from(failure: &CandidateFailure) -> Self {
        let err = PipelineError::from(failure.error.clone());
        Self {
            p: failure.p,
            q: failure.q,
            kind: err.kind().to_string(),
            message: failure.error.to_string(),
        }
    }
}

/// Transform, selection and coefficients of the chosen model.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ModelReport {
    /// Box–Cox exponent fitted on the training data.
    pub lambda: f64,
    /// Differencing lags in application order.
    pub difference_lags: Vec<usize>,
    /// Training observations.
    pub train_len: usize,
    /// Observations after differencing, i.e. the ARMA sample size.
    pub stationary_len: usize,
    /// Selected `(p, q)`.
    pub order: (usize, usize),
    /// AR coefficients `φ_1..φ_p`.
    pub ar: Vec<f64>,
    /// MA coefficients `θ_1..θ_q`.
    pub ma: Vec<f64>,
    /// Mean of the stationary series.
    pub intercept: f64,
    /// Innovation variance estimate.
    pub sigma2: f64,
    /// AICc of the selected model.
    pub aicc: f64,
    /// Ranked candidates in ascending AICc order.
    pub candidates: Vec<CandidateReport>,
    /// Candidates that could not be fitted or scored.
    pub failures: Vec<FailureReport>,
    /// Present when the diagnostic override replaced the AICc-best model.
    pub override_rationale: Option<OverrideRationale>,
}

impl ModelReport {
    pub(crate) fn new(
        params: &BoxCoxParams,
        difference_lags: &[usize],
        train_len: usize,
        selection: &SelectionResult,
    ) -> Self {
        let chosen = selection.chosen();
        let fit = chosen.fit();
        let candidates = selection
            .ranking()
            .iter()
            .map(|c| {
                let (p, q) = c.order();
                CandidateReport {
                    p,
                    q,
                    aicc: c.aicc(),
                    log_likelihood: c.fit().log_likelihood(),
                    sigma2: c.fit().sigma2(),
                    diagnostics: c.diagnostics().clone(),
                }
            })
            .collect();
        Self {
            lambda: params.lambda(),
            difference_lags: difference_lags.to_vec(),
            train_len,
            stationary_len: fit.n_obs(),
            order: chosen.order(),
            ar: fit.ar().to_vec(),
            ma: fit.ma().to_vec(),
            intercept: fit.intercept(),
            sigma2: fit.sigma2(),
            aicc: chosen.aicc(),
            candidates,
            failures: selection.failures().iter().map(FailureReport::from).collect(),
            override_rationale: selection.override_rationale().cloned(),
        }
    }
}
