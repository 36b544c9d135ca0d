//! # aether-boxcox
//!
//! Box–Cox power transform for variance stabilisation, with the exponent
//! chosen by profile likelihood against a linear trend.
//!
//! ## Workflow
//!
//! ```mermaid
//! graph LR
//!     A["fit_transform(&train, &config)?"] --> B["(transformed, BoxCoxParams)"]
//!     B -->|"apply(&other, &params)?"| C["transformed"]
//!     B -->|"invert(&transformed, &params)"| D["original scale"]
//! ```
//!
//! ## Quick Start
//!
//! ```
//! use aether_boxcox::{BoxCoxConfig, fit_transform, invert};
//!
//! let series = vec![12.0, 15.5, 9.8, 22.1, 18.3, 11.2, 30.4, 14.9];
//! let (transformed, params) = fit_transform(&series, &BoxCoxConfig::new()).unwrap();
//! let restored = invert(&transformed, &params);
//! assert!((restored[3] - 22.1).abs() < 1e-8);
//! ```
//!
//! ## Inversion floor
//!
//! For `λ ≠ 0` the inverse `(λy + 1)^(1/λ)` is undefined when
//! `λy + 1 ≤ 0`. Such bases are raised to [`BoxCoxParams::floor()`]
//! (default `1e-6`) before exponentiation. This trades fidelity for a finite
//! real result and is lossy; use [`invert_value_checked`] to learn whether
//! the floor fired.

mod config;
mod error;
mod fit;
mod params;
mod transform;

pub use config::BoxCoxConfig;
pub use error::BoxCoxError;
pub use fit::{fit_lambda, fit_transform, profile_log_likelihood};
pub use params::BoxCoxParams;
pub use transform::{Inverted, apply, apply_value, invert, invert_value, invert_value_checked};
