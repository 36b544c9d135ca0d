use std::path::PathBuf;

use serde::Deserialize;

/// Top-level Aether configuration.
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct AetherConfig {
    /// Input series settings.
    #[serde(default)]
    pub input: InputToml,

    /// Output settings.
    #[serde(default)]
    pub output: OutputToml,

    /// Box–Cox settings.
    #[serde(default)]
    pub boxcox: BoxCoxToml,

    /// Differencing and candidate model settings.
    #[serde(default)]
    pub model: ModelToml,

    /// Residual diagnostic settings.
    #[serde(default)]
    pub diagnostics: DiagnosticsToml,

    /// Model selection settings.
    #[serde(default)]
    pub selection: SelectionToml,

    /// Forecast and interval settings.
    #[serde(default)]
    pub forecast: ForecastToml,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InputToml {
    pub path: Option<PathBuf>,
    /// Column name or zero-based index; the first column when unset.
    #[serde(default)]
    pub column: Option<String>,
    #[serde(default = "default_period")]
    pub period: usize,
}

impl Default for InputToml {
    fn default() -> Self {
        Self {
            path: None,
            column: None,
            period: default_period(),
        }
    }
}

fn default_period() -> usize {
    52
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct OutputToml {
    /// Directory for `forecast.json` and `model.json`; stdout when unset.
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BoxCoxToml {
    /// Fixed lambda; searched when unset.
    #[serde(default)]
    pub lambda: Option<f64>,
    #[serde(default = "default_lambda_min")]
    pub lambda_min: f64,
    #[serde(default = "default_lambda_max")]
    pub lambda_max: f64,
    #[serde(default = "default_coarse_step")]
    pub coarse_step: f64,
    #[serde(default = "default_fine_step")]
    pub fine_step: f64,
    #[serde(default = "default_floor")]
    pub floor: f64,
}

impl Default for BoxCoxToml {
    fn default() -> Self {
        Self {
            lambda: None,
            lambda_min: default_lambda_min(),
            lambda_max: default_lambda_max(),
            coarse_step: default_coarse_step(),
            fine_step: default_fine_step(),
            floor: default_floor(),
        }
    }
}

fn default_lambda_min() -> f64 {
    -2.0
}
fn default_lambda_max() -> f64 {
    2.0
}
fn default_coarse_step() -> f64 {
    0.01
}
fn default_fine_step() -> f64 {
    0.0002
}
fn default_floor() -> f64 {
    1e-6
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModelToml {
    /// Differencing lags in application order; `[period, 1]` when unset.
    #[serde(default)]
    pub difference_lags: Option<Vec<usize>>,
    /// Explicit `[p, q]` candidates; proposed from the ACF/PACF when unset.
    #[serde(default)]
    pub orders: Option<Vec<[usize; 2]>>,
    #[serde(default = "default_max_order")]
    pub max_p: usize,
    #[serde(default = "default_max_order")]
    pub max_q: usize,
    #[serde(default = "default_level")]
    pub proposal_level: f64,
    #[serde(default = "default_max_iters")]
    pub max_iters: u64,
    #[serde(default = "default_sd_tolerance")]
    pub sd_tolerance: f64,
}

impl Default for ModelToml {
    fn default() -> Self {
        Self {
            difference_lags: None,
            orders: None,
            max_p: default_max_order(),
            max_q: default_max_order(),
            proposal_level: default_level(),
            max_iters: default_max_iters(),
            sd_tolerance: default_sd_tolerance(),
        }
    }
}

fn default_max_order() -> usize {
    5
}
fn default_level() -> f64 {
    0.95
}
fn default_max_iters() -> u64 {
    20_000
}
fn default_sd_tolerance() -> f64 {
    1e-9
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DiagnosticsToml {
    #[serde(default = "default_alpha")]
    pub alpha: f64,
    /// Fixed Ljung–Box lag; `round(sqrt(n))` when unset.
    #[serde(default)]
    pub ljung_box_lag: Option<usize>,
}

impl Default for DiagnosticsToml {
    fn default() -> Self {
        Self {
            alpha: default_alpha(),
            ljung_box_lag: None,
        }
    }
}

fn default_alpha() -> f64 {
    0.05
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SelectionToml {
    #[serde(default = "default_margin")]
    pub margin: f64,
    #[serde(default = "default_min_violation_improvement")]
    pub min_violation_improvement: usize,
    #[serde(default = "default_true", rename = "override")]
    pub override_enabled: bool,
}

impl Default for SelectionToml {
    fn default() -> Self {
        Self {
            margin: default_margin(),
            min_violation_improvement: default_min_violation_improvement(),
            override_enabled: true,
        }
    }
}

fn default_margin() -> f64 {
    0.10
}
fn default_min_violation_improvement() -> usize {
    1
}
fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ForecastToml {
    /// Training length; the whole series when unset.
    #[serde(default)]
    pub train_len: Option<usize>,
    /// Horizon; the test length, else 14, when unset.
    #[serde(default)]
    pub horizon: Option<usize>,
    #[serde(default = "default_level")]
    pub level: f64,
    #[serde(default = "default_fallback_levels")]
    pub fallback_levels: Vec<f64>,
    #[serde(default = "default_cap_multiple")]
    pub cap_multiple: f64,
}

impl Default for ForecastToml {
    fn default() -> Self {
        Self {
            train_len: None,
            horizon: None,
            level: default_level(),
            fallback_levels: default_fallback_levels(),
            cap_multiple: default_cap_multiple(),
        }
    }
}

fn default_fallback_levels() -> Vec<f64> {
    vec![0.90, 0.80]
}
fn default_cap_multiple() -> f64 {
    2.5
}
