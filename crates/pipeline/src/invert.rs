//! Mapping stationary-scale forecasts back to the measurement scale.

use tracing::{debug, warn};

use aether_arma::ForecastResult;
use aether_boxcox::{BoxCoxParams, invert_value_checked};
use aether_difference::DifferenceState;
use aether_stats::two_sided_z;

use crate::clamp::{ClampReport, stability_clamp};
use crate::error::PipelineError;

/// Interval settings for [`invert_forecast`].
///
/// # Example
///
/// ```
/// use aether_pipeline::InvertConfig;
///
/// let config = InvertConfig::new().with_level(0.90);
/// assert_eq!(config.levels(), vec![0.90, 0.80]);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct InvertConfig {
    level: f64,
    fallback_levels: Vec<f64>,
    cap_multiple: f64,
}

impl InvertConfig {
    /// Creates a configuration with `level = 0.95`, fallback levels
    /// `[0.90, 0.80]` and `cap_multiple = 2.5`.
    pub fn new() -> Self {
        Self {
            level: 0.95,
            fallback_levels: vec![0.90, 0.80],
            cap_multiple: 2.5,
        }
    }

    /// Sets the requested confidence level.
    pub fn with_level(mut self, level: f64) -> Self {
        self.level = level;
        self
    }

    /// Sets the levels tried when the requested one is degenerate.
    pub fn with_fallback_levels(mut self, levels: Vec<f64>) -> Self {
        self.fallback_levels = levels;
        self
    }

    /// Sets the upper-bound cap as a multiple of the series maximum.
    pub fn with_cap_multiple(mut self, multiple: f64) -> Self {
        self.cap_multiple = multiple;
        self
    }

    /// Returns the requested confidence level.
    pub fn level(&self) -> f64 {
        self.level
    }

    /// Returns the configured fallback levels.
    pub fn fallback_levels(&self) -> &[f64] {
        &self.fallback_levels
    }

    /// Returns the cap multiple.
    pub fn cap_multiple(&self) -> f64 {
        self.cap_multiple
    }

    /// Levels in the order they are tried: the requested level, then the
    /// fallbacks below it, descending.
    pub fn levels(&self) -> Vec<f64> {
        let mut fallbacks: Vec<f64> = self
            .fallback_levels
            .iter()
            .copied()
            .filter(|l| *l < self.level)
            .collect();
        fallbacks.sort_by(|a, b| b.total_cmp(a));
        fallbacks.dedup();
        let mut levels = vec![self.level];
        levels.extend(fallbacks);
        levels
    }

    /// Validates this configuration.
    pub fn validate(&self) -> Result<(), PipelineError> {
        let in_unit = |l: f64| l > 0.0 && l < 1.0;
        if !in_unit(self.level) {
            return Err(PipelineError::InvalidConfig {
                reason: format!("confidence level must be in (0, 1), got {}", self.level),
            });
        }
        if let Some(bad) = self.fallback_levels.iter().find(|l| !in_unit(**l)) {
            return Err(PipelineError::InvalidConfig {
                reason: format!("fallback level must be in (0, 1), got {bad}"),
            });
        }
        if !self.cap_multiple.is_finite() || self.cap_multiple <= 0.0 {
            return Err(PipelineError::InvalidConfig {
                reason: format!("cap_multiple must be finite and > 0, got {}", self.cap_multiple),
            });
        }
        Ok(())
    }
}

impl Default for InvertConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Forecast on the original measurement scale.
#[derive(Clone, Debug, PartialEq)]
pub struct OriginalScaleForecast {
    point: Vec<f64>,
    lower: Vec<f64>,
    upper: Vec<f64>,
    requested_level: f64,
    used_level: f64,
    clamp: ClampReport,
}

impl OriginalScaleForecast {
    pub(crate) fn new(
        point: Vec<f64>,
        lower: Vec<f64>,
        upper: Vec<f64>,
        requested_level: f64,
        used_level: f64,
        clamp: ClampReport,
    ) -> Self {
        Self {
            point,
            lower,
            upper,
            requested_level,
            used_level,
            clamp,
        }
    }

    /// Returns the point forecasts.
    pub fn point(&self) -> &[f64] {
        &self.point
    }

    /// Returns the clamped lower bounds.
    pub fn lower(&self) -> &[f64] {
        &self.lower
    }

    /// Returns the clamped upper bounds.
    pub fn upper(&self) -> &[f64] {
        &self.upper
    }

    /// Returns the confidence level that was asked for.
    pub fn requested_level(&self) -> f64 {
        self.requested_level
    }

    /// Returns the confidence level the bounds were built at.
    pub fn used_level(&self) -> f64 {
        self.used_level
    }

    /// Returns the clamp adjustments.
    pub fn clamp(&self) -> &ClampReport {
        &self.clamp
    }

    /// Returns the number of forecast steps.
    pub fn horizon(&self) -> usize {
        self.point.len()
    }
}

/// Differencing and Box–Cox inversion of one stationary-scale path.
/// Returns the original-scale values and the number of floor hits.
fn invert_path(
    path: &[f64],
    state: &DifferenceState,
    params: &BoxCoxParams,
) -> Result<(Vec<f64>, usize), PipelineError> {
    let transformed = state.invert(path)?;
    let mut floor_hits = 0;
    let values = transformed
        .iter()
        .map(|&y| {
            let inv = invert_value_checked(y, params);
            floor_hits += usize::from(inv.floored);
            inv.value
        })
        .collect();
    Ok((values, floor_hits))
}

struct Bounds {
    level: f64,
    lower: Vec<f64>,
    upper: Vec<f64>,
    floor_hits: usize,
}

impl Bounds {
    fn is_degenerate(&self) -> bool {
        self.floor_hits > 0
            || self
                .lower
                .iter()
                .chain(self.upper.iter())
                .any(|v| !v.is_finite())
    }
}

/// Inverts a stationary-scale forecast to the measurement scale.
///
/// The point path and both `point ± z·se` paths are undifferenced by
/// `state` and inverse Box–Cox transformed independently. Bounds that are
/// non-finite or hit the Box–Cox floor mark the level degenerate and the
/// next fallback level is tried; the lowest level is kept if all are
/// degenerate. The result is clamped into `[0, cap_multiple · series_max]`.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`PipelineError::DegenerateInterval`] | a point forecast is non-finite, or a lower bound exceeds its upper bound after clamping |
/// | [`PipelineError::InvalidConfig`] | invalid `config` or non-positive `series_max` |
/// | [`PipelineError::Difference`] | `state` cannot invert the forecast |
#[tracing::instrument(skip_all, fields(h = forecast.horizon()))]
pub fn invert_forecast(
    forecast: &ForecastResult,
    state: &DifferenceState,
    params: &BoxCoxParams,
    series_max: f64,
    config: &InvertConfig,
) -> Result<OriginalScaleForecast, PipelineError> {
    config.validate()?;
    if !series_max.is_finite() || series_max <= 0.0 {
        return Err(PipelineError::InvalidConfig {
            reason: format!("series maximum must be finite and > 0, got {series_max}"),
        });
    }

    let (point, point_floor_hits) = invert_path(forecast.point_forecasts(), state, params)?;
    if let Some(step) = point.iter().position(|v| !v.is_finite()) {
        return Err(PipelineError::DegenerateInterval {
            step: step + 1,
            reason: format!("point forecast is {}", point[step]),
        });
    }

    let mut chosen: Option<Bounds> = None;
    for level in config.levels() {
        let z = two_sided_z(level)?;
        let offset = |sign: f64| -> Vec<f64> {
            forecast
                .point_forecasts()
                .iter()
                .zip(forecast.standard_errors())
                .map(|(p, se)| p + sign * z * se)
                .collect()
        };
        let (lower, lower_hits) = invert_path(&offset(-1.0), state, params)?;
        let (upper, upper_hits) = invert_path(&offset(1.0), state, params)?;
        let bounds = Bounds {
            level,
            lower,
            upper,
            floor_hits: lower_hits + upper_hits,
        };
        let degenerate = bounds.is_degenerate();
        debug!(level, z, degenerate, floor_hits = bounds.floor_hits, "interval level tried");
        chosen = Some(bounds);
        if !degenerate {
            break;
        }
    }
    let Some(bounds) = chosen else {
        return Err(PipelineError::InvalidConfig {
            reason: "no confidence level to try".to_string(),
        });
    };
    if bounds.level != config.level() {
        warn!(
            requested = config.level(),
            used = bounds.level,
            "requested confidence level was degenerate"
        );
    }

    let cap = config.cap_multiple() * series_max;
    let (lower, upper, mut clamp) = stability_clamp(&bounds.lower, &bounds.upper, cap);
    clamp.boxcox_floor_hits = point_floor_hits + bounds.floor_hits;
    if let Some(step) = lower.iter().zip(upper.iter()).position(|(l, u)| l > u) {
        return Err(PipelineError::DegenerateInterval {
            step: step + 1,
            reason: format!(
                "lower bound {} exceeds upper bound {} after clamping",
                lower[step], upper[step]
            ),
        });
    }
    if clamp.total_adjustments() > 0 {
        debug!(
            upper_capped = clamp.upper_capped,
            lower_capped = clamp.lower_capped,
            zero_floored = clamp.zero_floored,
            non_finite_replaced = clamp.non_finite_replaced,
            cap,
            "stability clamp applied"
        );
    }

    Ok(OriginalScaleForecast::new(
        point,
        lower,
        upper,
        config.level(),
        bounds.level,
        clamp,
    ))
}
