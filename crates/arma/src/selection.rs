//! AICc ranking with an auditable diagnostic override.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::{DiagnosticConfig, FitConfig, SelectionConfig};
use crate::diagnostics::{DiagnosticReport, diagnose};
use crate::error::ArmaError;
use crate::fit::ArmaFit;
use crate::spec::ArmaSpec;

/// A candidate order that could not be fitted, diagnosed or ranked.
#[derive(Clone, Debug, PartialEq)]
pub struct CandidateFailure {
    /// AR order.
    pub p: usize,
    /// MA order.
    pub q: usize,
    /// Why the candidate dropped out.
    pub error: ArmaError,
}

/// One ranked candidate.
#[derive(Clone, Debug, PartialEq)]
pub struct RankedCandidate {
    fit: ArmaFit,
    aicc: f64,
    diagnostics: DiagnosticReport,
}

impl RankedCandidate {
    /// Returns the fitted model.
    pub fn fit(&self) -> &ArmaFit {
        &self.fit
    }

    /// Returns the corrected Akaike criterion.
    pub fn aicc(&self) -> f64 {
        self.aicc
    }

    /// Returns the residual diagnostics.
    pub fn diagnostics(&self) -> &DiagnosticReport {
        &self.diagnostics
    }

    /// Returns the `(p, q)` order.
    pub fn order(&self) -> (usize, usize) {
        self.fit.order()
    }
}

/// Why the AICc-minimal candidate was passed over.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OverrideRationale {
    /// Order of the AICc-minimal candidate.
    pub aicc_best_order: (usize, usize),
    /// Order actually chosen.
    pub chosen_order: (usize, usize),
    /// AICc of the AICc-minimal candidate.
    pub aicc_best: f64,
    /// AICc of the chosen candidate.
    pub aicc_chosen: f64,
    /// `(aicc_chosen − aicc_best) / |aicc_best|`.
    pub relative_gap: f64,
    /// Configured margin the gap was compared against.
    pub margin: f64,
    /// Diagnostics of the AICc-minimal candidate.
    pub aicc_best_diagnostics: DiagnosticReport,
    /// Diagnostics of the chosen candidate.
    pub chosen_diagnostics: DiagnosticReport,
}

/// Full outcome of a selection.
#[derive(Clone, Debug, PartialEq)]
pub struct SelectionResult {
    ranking: Vec<RankedCandidate>,
    chosen: usize,
    failures: Vec<CandidateFailure>,
    rationale: Option<OverrideRationale>,
}

impl SelectionResult {
    /// Returns every ranked candidate, AICc ascending.
    pub fn ranking(&self) -> &[RankedCandidate] {
        &self.ranking
    }

    /// Returns the selected candidate.
    pub fn chosen(&self) -> &RankedCandidate {
        &self.ranking[self.chosen]
    }

    /// Returns candidates that could not be ranked.
    pub fn failures(&self) -> &[CandidateFailure] {
        &self.failures
    }

    /// Returns the override justification when the AICc-minimal candidate
    /// was not chosen.
    pub fn override_rationale(&self) -> Option<&OverrideRationale> {
        self.rationale.as_ref()
    }

    /// Consumes the result, returning the chosen fit.
    pub fn into_chosen_fit(mut self) -> ArmaFit {
        self.ranking.swap_remove(self.chosen).fit
    }
}

/// Fits and diagnoses every order against `series` in parallel.
///
/// Output order follows `orders`. Each order lands either in the returned
/// `(fit, diagnostics)` pairs or in the failures, never both.
pub fn evaluate_candidates(
    series: &[f64],
    orders: &[(usize, usize)],
    fit_config: &FitConfig,
    diagnostic_config: &DiagnosticConfig,
) -> (Vec<ArmaFit>, Vec<DiagnosticReport>, Vec<CandidateFailure>) {
    let outcomes: Vec<Result<(ArmaFit, DiagnosticReport), CandidateFailure>> = orders
        .par_iter()
        .map(|&(p, q)| {
            evaluate_one(series, p, q, fit_config, diagnostic_config)
                .map_err(|error| CandidateFailure { p, q, error })
        })
        .collect();

    let mut fits = Vec::with_capacity(orders.len());
    let mut reports = Vec::with_capacity(orders.len());
    let mut failures = Vec::new();
    for outcome in outcomes {
        match outcome {
            Ok((fit, report)) => {
                fits.push(fit);
                reports.push(report);
            }
            Err(failure) => {
                warn!(p = failure.p, q = failure.q, error = %failure.error, "candidate failed");
                failures.push(failure);
            }
        }
    }
    (fits, reports, failures)
}

fn evaluate_one(
    series: &[f64],
    p: usize,
    q: usize,
    fit_config: &FitConfig,
    diagnostic_config: &DiagnosticConfig,
) -> Result<(ArmaFit, DiagnosticReport), ArmaError> {
    let fit = ArmaSpec::new(p, q).fit_with(series, fit_config)?;
    let report = diagnose(&fit, diagnostic_config)?;
    Ok((fit, report))
}

fn relative_gap(aicc: f64, best: f64) -> f64 {
    (aicc - best) / best.abs().max(f64::EPSILON)
}

/// Ranks candidates by AICc and applies the diagnostic override.
///
/// `diagnostics[i]` belongs to `candidates[i]`. Candidates whose AICc is
/// undefined join `failures`.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`ArmaError::LengthMismatch`] | `candidates.len() != diagnostics.len()` |
/// | [`ArmaError::NoCandidates`] | nothing left to rank |
/// | [`ArmaError::InvalidConfig`] | `config` fails validation |
pub fn select(
    candidates: Vec<ArmaFit>,
    diagnostics: Vec<DiagnosticReport>,
    mut failures: Vec<CandidateFailure>,
    config: &SelectionConfig,
) -> Result<SelectionResult, ArmaError> {
    config.validate()?;
    if candidates.len() != diagnostics.len() {
        return Err(ArmaError::LengthMismatch {
            candidates: candidates.len(),
            diagnostics: diagnostics.len(),
        });
    }

    let mut ranking = Vec::with_capacity(candidates.len());
    for (fit, report) in candidates.into_iter().zip(diagnostics) {
        match fit.aicc() {
            Ok(aicc) => ranking.push(RankedCandidate {
                fit,
                aicc,
                diagnostics: report,
            }),
            Err(error) => {
                let (p, q) = fit.order();
                failures.push(CandidateFailure { p, q, error });
            }
        }
    }
    if ranking.is_empty() {
        return Err(ArmaError::NoCandidates);
    }
    ranking.sort_by(|a, b| a.aicc.total_cmp(&b.aicc));

    let best = &ranking[0];
    let best_violations = best.diagnostics.violations();
    let mut chosen = 0;
    if config.override_enabled() && best_violations >= 1 {
        let alternative = ranking
            .iter()
            .enumerate()
            .skip(1)
            .filter(|(_, c)| relative_gap(c.aicc, best.aicc) <= config.margin())
            .filter(|(_, c)| {
                c.diagnostics.violations() + config.min_violation_improvement() <= best_violations
            })
            .min_by_key(|(_, c)| c.diagnostics.violations());
        if let Some((index, _)) = alternative {
            chosen = index;
        }
    }

    let rationale = (chosen != 0).then(|| {
        let pick = &ranking[chosen];
        OverrideRationale {
            aicc_best_order: best.order(),
            chosen_order: pick.order(),
            aicc_best: best.aicc,
            aicc_chosen: pick.aicc,
            relative_gap: relative_gap(pick.aicc, best.aicc),
            margin: config.margin(),
            aicc_best_diagnostics: best.diagnostics.clone(),
            chosen_diagnostics: pick.diagnostics.clone(),
        }
    });
    match &rationale {
        Some(r) => info!(
            aicc_best = ?r.aicc_best_order,
            chosen = ?r.chosen_order,
            relative_gap = r.relative_gap,
            "diagnostic override applied"
        ),
        None => info!(chosen = ?ranking[0].order(), aicc = ranking[0].aicc, "AICc-minimal model selected"),
    }

    Ok(SelectionResult {
        ranking,
        chosen,
        failures,
        rationale,
    })
}
