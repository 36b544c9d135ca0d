//! Error types for the aether-boxcox crate.

/// Error type for all fallible operations in the aether-boxcox crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BoxCoxError {
    /// Returned when the input series is empty.
    #[error("input data is empty")]
    EmptyData,

    /// Returned when the series is too short to fit a trend regression.
    #[error("insufficient data: got {n} observations, need at least {min}")]
    InsufficientData {
        /// Number of observations provided.
        n: usize,
        /// Minimum number of observations required.
        min: usize,
    },

    /// Returned when a value outside the transform's domain (`x > 0`,
    /// finite) is fed to the power transform.
    #[error("value {value} at index {index} is outside the Box-Cox domain (must be finite and > 0)")]
    Domain {
        /// Position of the offending value.
        index: usize,
        /// The offending value.
        value: f64,
    },

    /// Returned when lambda is not finite.
    #[error("invalid lambda: {lambda}")]
    InvalidLambda {
        /// The offending lambda.
        lambda: f64,
    },

    /// Returned when the profile likelihood is flat or undefined for every
    /// candidate lambda (e.g. a constant series).
    #[error("profile likelihood is undefined over the lambda grid")]
    DegenerateLikelihood,

    /// Returned when a configuration parameter is invalid.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// Description of the problem.
        reason: String,
    },
}
