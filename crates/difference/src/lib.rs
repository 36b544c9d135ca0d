//! # aether-difference
//!
//! Lagged differencing and its exact inversion.
//!
//! A [`DifferenceSpec`] is an ordered list of lags (for weekly data with
//! yearly seasonality, typically `[52, 1]`). Applying it records a
//! [`DifferenceState`]: for every stage, the trailing `lag` values of that
//! stage's *input*. Inversion walks the stages in reverse, re-seeding each
//! one with its own window.
//!
//! ```
//! use aether_difference::DifferenceSpec;
//!
//! let series: Vec<f64> = (0..12).map(|t| (t * t) as f64).collect();
//! let spec = DifferenceSpec::new(vec![4, 1]).unwrap();
//! let (diffed, state) = spec.apply(&series).unwrap();
//! assert_eq!(diffed.len(), 12 - 4 - 1);
//!
//! // Continue the stationary series by its last value and undo the chain.
//! let future = vec![*diffed.last().unwrap(); 3];
//! let levels = state.invert(&future).unwrap();
//! assert_eq!(levels.len(), 3);
//! ```

mod error;
mod lag;
mod spec;

pub use error::DifferenceError;
pub use lag::{difference, undifference};
pub use spec::{DifferenceSpec, DifferenceStage, DifferenceState};
