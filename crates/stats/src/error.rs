//! Error types for the aether-stats crate.

/// Error type for all fallible operations in the aether-stats crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StatsError {
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

    /// Returned when the input data contains non-finite values.
    #[error("input data contains non-finite values")]
    NonFiniteData,

    /// Returned when the input data has zero variance.
    #[error("input data is constant (zero variance)")]
    ConstantData,

    /// Returned when a lag is zero or not smaller than the series length.
    #[error("invalid lag {lag} for series of length {n}")]
    InvalidLag {
        /// Requested lag.
        lag: usize,
        /// Series length.
        n: usize,
    },

    /// Returned when a portmanteau test is left with no degrees of freedom.
    #[error("no degrees of freedom left: lag {lag}, fitted parameters {fitdf}")]
    NoDegreesOfFreedom {
        /// Number of autocorrelation lags tested.
        lag: usize,
        /// Number of fitted parameters subtracted.
        fitdf: usize,
    },

    /// Returned when a probability lies outside the open unit interval.
    #[error("probability must be in (0, 1), got {p}")]
    InvalidProbability {
        /// The offending probability.
        p: f64,
    },

    /// Returned when a statrs distribution cannot be constructed.
    ///
    /// Stored as a `String` because statrs errors do not implement `Clone`.
    #[error("distribution construction failed: {message}")]
    Distribution {
        /// Description of the failure.
        message: String,
    },
}
