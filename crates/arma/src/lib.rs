//! # aether-arma
//!
//! ARMA(p,q) fitting by conditional maximum likelihood, residual
//! diagnostics, AICc selection with a diagnostic override, and
//! multi-step forecasting.
//!
//! ## Workflow
//!
//! ```mermaid
//! graph LR
//!     P["propose_orders(&series, &config)?"] --> E
//!     E["evaluate_candidates(&series, &orders, ..)"] -->|"fits, diagnostics, failures"| S
//!     S["select(.., &SelectionConfig)?"] --> R["SelectionResult"]
//!     R -->|".chosen().fit()"| F["forecast(&fit, h)?"]
//! ```
//!
//! ## Direct fit
//!
//! ```
//! use aether_arma::{ArmaSpec, DiagnosticConfig, diagnose, forecast};
//!
//! let data: Vec<f64> = (0..120).map(|t| ((t * 37) % 11) as f64 - 5.0).collect();
//! let fit = ArmaSpec::new(1, 0).fit(&data).unwrap();
//! let report = diagnose(&fit, &DiagnosticConfig::new()).unwrap();
//! let out = forecast(&fit, 14).unwrap();
//! assert_eq!(out.horizon(), 14);
//! assert!(report.violations() <= 2);
//! ```
//!
//! ## Mathematical Glossary
//!
//! | Symbol | Accessor | Meaning |
//! |--------|----------|---------|
//! | phi | [`ArmaFit::ar()`] | AR coefficients: weights on past deviations |
//! | theta | [`ArmaFit::ma()`] | MA coefficients: weights on past errors |
//! | mu | [`ArmaFit::intercept()`] | Process mean |
//! | sigma2 | [`ArmaFit::sigma2()`] | Innovation (white-noise) variance |
//! | AICc | [`ArmaFit::aicc()`] | Small-sample corrected AIC (lower = better) |
//! | psi | [`psi_weights()`] | MA(∞) weights behind forecast standard errors |

mod config;
mod diagnostics;
mod error;
mod fit;
mod forecast;
mod likelihood;
mod optimizer;
mod params;
mod propose;
mod selection;
mod spec;

pub use config::{DiagnosticConfig, FitConfig, ProposalConfig, SelectionConfig};
pub use diagnostics::{DiagnosticReport, TestOutcome, diagnose};
pub use error::ArmaError;
pub use fit::ArmaFit;
pub use forecast::{ForecastResult, forecast, psi_weights};
pub use propose::propose_orders;
pub use selection::{
    CandidateFailure, OverrideRationale, RankedCandidate, SelectionResult, evaluate_candidates,
    select,
};
pub use spec::ArmaSpec;
