//! # aether-pipeline
//!
//! Chains the Aether stages into one forecasting run: Box–Cox on the
//! training data, seasonal then trend differencing, candidate ARMA fits,
//! diagnostic-aware selection, forecasting, and inversion back to the
//! measurement scale with a stability clamp on the interval bounds.
//!
//! ## Workflow
//!
//! ```mermaid
//! graph LR
//!     S["Series::new(values, period)?"] --> R["run_pipeline(&series, &config)?"]
//!     R --> M[".model() : ModelReport"]
//!     R --> F[".forecast() : ForecastReport | PipelineError"]
//! ```
//!
//! ## Example
//!
//! ```
//! use aether_pipeline::{PipelineConfig, PipelineError, Series, run_pipeline};
//!
//! let values: Vec<f64> = (0..160)
//!     .map(|t| 20.0 + 5.0 * ((t % 8) as f64) + ((t * 13) % 7) as f64)
//!     .collect();
//! let series = Series::new(values, 8)?;
//! let config = PipelineConfig::new()
//!     .with_orders(Some(vec![(1, 0), (0, 1)]))
//!     .with_train_len(Some(150));
//! let outcome = run_pipeline(&series, &config)?;
//! assert_eq!(outcome.model().difference_lags, vec![8, 1]);
//! let report = outcome.forecast().map_err(Clone::clone)?;
//! assert_eq!(report.horizon, 10);
//! # Ok::<(), PipelineError>(())
//! ```

mod accuracy;
mod clamp;
mod config;
mod error;
mod invert;
mod report;
mod run;
mod series;

pub use accuracy::{AccuracyReport, accuracy};
pub use clamp::{ClampReport, stability_clamp};
pub use config::{DEFAULT_HORIZON, PipelineConfig};
pub use error::PipelineError;
pub use invert::{InvertConfig, OriginalScaleForecast, invert_forecast};
pub use report::{
    CandidateReport, FailureReport, ForecastFailure, ForecastReport, ForecastStep, ModelReport,
};
pub use run::{PipelineOutcome, run_pipeline};
pub use series::Series;
