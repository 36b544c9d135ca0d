//! Error types for the aether-difference crate.

/// Error type for all fallible operations in the aether-difference crate.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DifferenceError {
    /// Returned when a lag of zero is requested.
    #[error("lag must be positive")]
    ZeroLag,

    /// Returned when a difference specification has no stages.
    #[error("difference specification has no stages")]
    EmptySpec,

    /// Returned when the series is not longer than the lag.
    #[error("series of length {n} is too short for lag {lag}")]
    SeriesTooShort {
        /// Series length at the failing stage.
        n: usize,
        /// Requested lag.
        lag: usize,
    },

    /// Returned when the seed window is shorter than the lag.
    #[error("trailing window has {got} values, lag {lag} needs at least {lag}")]
    TrailingTooShort {
        /// Number of seed values supplied.
        got: usize,
        /// Lag being inverted.
        lag: usize,
    },
}
