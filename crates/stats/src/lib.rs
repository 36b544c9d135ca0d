//! Statistical helper functions for the Aether forecasting pipeline.
//!
//! Sample autocorrelation, the Ljung–Box portmanteau test, the Shapiro–Wilk
//! normality test and standard-normal quantiles, all on plain `&[f64]`
//! slices.

mod autocorrelation;
mod error;
mod normal;
mod normality;
mod portmanteau;

pub use autocorrelation::{acf, pacf};
pub use error::StatsError;
pub use normal::{normal_quantile, two_sided_z};
pub use normality::{ShapiroWilk, shapiro_wilk};
pub use portmanteau::{LjungBox, ljung_box};
