//! Error types for the aether-arma crate.

use aether_stats::StatsError;

/// Error type for all fallible operations in the aether-arma crate.
///
/// Covers input validation, optimiser failure, information-criterion
/// domain problems, selection and forecasting.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ArmaError {
    /// Returned when the input data is empty.
    #[error("input data is empty")]
    EmptyData,

    /// Returned when the input data has fewer observations than required.
    #[error("insufficient data: got {n} observations, need at least {min}")]
    InsufficientData {
        /// Number of observations provided.
        n: usize,
        /// Minimum number of observations required.
        min: usize,
    },

    /// Returned when the input data contains non-finite values (NaN or infinity).
    #[error("input data contains non-finite values")]
    NonFiniteData,

    /// Returned when the input data has zero variance.
    #[error("input data is constant (zero variance)")]
    ConstantData,

    /// Returned when the optimiser stops without converging.
    #[error("ARMA({p},{q}) likelihood optimisation did not converge: {reason}")]
    NonConvergence {
        /// AR order.
        p: usize,
        /// MA order.
        q: usize,
        /// Solver termination reason.
        reason: String,
    },

    /// Returned when the AICc correction term has a non-positive denominator.
    #[error("AICc undefined: n = {n}, k = {k} leaves n - k - 1 <= 0")]
    UndefinedCriterion {
        /// Number of residuals.
        n: usize,
        /// Number of estimated parameters including the variance.
        k: usize,
    },

    /// Returned when a converged fit yields a NaN or infinite AICc.
    #[error("ARMA({p},{q}) AICc is not finite: {value}")]
    NonFiniteCriterion {
        /// AR order.
        p: usize,
        /// MA order.
        q: usize,
        /// The offending criterion value.
        value: f64,
    },

    /// Returned when a forecast horizon of zero is requested.
    #[error("forecast horizon must be at least 1")]
    InvalidHorizon,

    /// Returned when forecast points and standard errors differ in length.
    #[error("forecast has {points} points but {standard_errors} standard errors")]
    ShapeMismatch {
        /// Number of point forecasts.
        points: usize,
        /// Number of standard errors.
        standard_errors: usize,
    },

    /// Returned when no candidate model could be ranked.
    #[error("no rankable candidate models")]
    NoCandidates,

    /// Returned when candidate and diagnostic lists differ in length.
    #[error("length mismatch: {candidates} candidates, {diagnostics} diagnostic reports")]
    LengthMismatch {
        /// Number of candidate fits.
        candidates: usize,
        /// Number of diagnostic reports.
        diagnostics: usize,
    },

    /// Returned when a configuration value is out of range.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// Description of the offending value.
        reason: String,
    },

    /// A statistical routine (ACF, PACF, residual test) failed.
    #[error("statistics error: {0}")]
    Stats(#[from] StatsError),
}
