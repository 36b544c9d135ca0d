//! Error types for the aether-pipeline crate.

use aether_arma::ArmaError;
use aether_boxcox::BoxCoxError;
use aether_difference::DifferenceError;
use aether_stats::StatsError;

/// Error type for all fallible operations in the aether-pipeline crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PipelineError {
    /// A value outside the Box–Cox domain reached the power transform.
    #[error("value {value} at index {index} is outside the transform domain")]
    Domain {
        /// Position of the offending value.
        index: usize,
        /// The offending value.
        value: f64,
    },

    /// The interval could not be repaired into a usable range.
    #[error("degenerate interval at step {step}: {reason}")]
    DegenerateInterval {
        /// Forecast step (1-based).
        step: usize,
        /// What made the interval unusable.
        reason: String,
    },

    /// The input series violates the `Series` invariants.
    #[error("invalid series: {reason}")]
    InvalidSeries {
        /// Description of the violation.
        reason: String,
    },

    /// A configuration value is out of range.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// Description of the offending value.
        reason: String,
    },

    /// Box–Cox fitting failed for a reason other than the domain.
    #[error("transform: {0}")]
    Transform(BoxCoxError),

    /// Differencing or its inversion failed.
    #[error("differencing: {0}")]
    Difference(#[from] DifferenceError),

    /// Model fitting, selection or forecasting failed.
    #[error("model: {0}")]
    Model(#[from] ArmaError),

    /// A statistical routine failed.
    #[error("statistics: {0}")]
    Stats(#[from] StatsError),
}

impl From<BoxCoxError> for PipelineError {
    fn from(err: BoxCoxError) -> Self {
        match err {
            BoxCoxError::Domain { index, value } => Self::Domain { index, value },
            other => Self::Transform(other),
        }
    }
}

impl PipelineError {
    /// Short machine-readable name of the variant.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Domain { .. } => "domain",
            Self::DegenerateInterval { .. } => "degenerate_interval",
            Self::InvalidSeries { .. } => "invalid_series",
            Self::InvalidConfig { .. } => "invalid_config",
            Self::Transform(_) => "transform",
            Self::Difference(_) => "difference",
            Self::Model(ArmaError::NonConvergence { .. }) => "non_convergence",
            Self::Model(ArmaError::UndefinedCriterion { .. }) => "undefined_criterion",
            Self::Model(ArmaError::NonFiniteCriterion { .. }) => "non_finite_criterion",
            Self::Model(_) => "model",
            Self::Stats(_) => "stats",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boxcox_domain_maps_to_domain() {
        let err: PipelineError = BoxCoxError::Domain {
            index: 3,
            value: 0.0,
        }
        .into();
        assert_eq!(err, PipelineError::Domain { index: 3, value: 0.0 });
        assert_eq!(err.kind(), "domain");
        assert_eq!(
            err.to_string(),
            "value 0 at index 3 is outside the transform domain"
        );
    }

    #[test]
    fn other_boxcox_errors_are_wrapped() {
        let err: PipelineError = BoxCoxError::DegenerateLikelihood.into();
        assert!(matches!(err, PipelineError::Transform(_)));
    }

    #[test]
    fn degenerate_interval_message() {
        let err = PipelineError::DegenerateInterval {
            step: 4,
            reason: "lower bound 12 exceeds upper bound 10".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "degenerate interval at step 4: lower bound 12 exceeds upper bound 10"
        );
        assert_eq!(err.kind(), "degenerate_interval");
    }

    #[test]
    fn model_kinds() {
        let err: PipelineError = ArmaError::UndefinedCriterion { n: 5, k: 4 }.into();
        assert_eq!(err.kind(), "undefined_criterion");
        let err: PipelineError = ArmaError::NonFiniteCriterion {
            p: 1,
            q: 1,
            value: f64::INFINITY,
        }
        .into();
        assert_eq!(err.kind(), "non_finite_criterion");
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync + std::error::Error>() {}
        assert_impl::<PipelineError>();
    }
}
