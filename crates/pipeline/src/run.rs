//! End-to-end pipeline orchestration.

use tracing::{debug_span, info, info_span, warn};

use aether_arma::{SelectionResult, evaluate_candidates, forecast, propose_orders, select};
use aether_boxcox::{BoxCoxParams, fit_transform};
use aether_difference::{DifferenceSpec, DifferenceState};

use crate::accuracy::accuracy;
use crate::config::{DEFAULT_HORIZON, PipelineConfig};
use crate::error::PipelineError;
use crate::invert::invert_forecast;
use crate::report::{ForecastFailure, ForecastReport, ModelReport};
use crate::series::Series;

/// Everything produced by one [`run_pipeline`] call.
#[derive(Clone, Debug)]
pub struct PipelineOutcome {
    params: BoxCoxParams,
    difference_state: DifferenceState,
    selection: SelectionResult,
    model: ModelReport,
    forecast: Result<ForecastReport, PipelineError>,
}

impl PipelineOutcome {
    /// Returns the Box–Cox parameters fitted on the training data.
    pub fn params(&self) -> &BoxCoxParams {
        &self.params
    }

    /// Returns the recorded differencing windows.
    pub fn difference_state(&self) -> &DifferenceState {
        &self.difference_state
    }

    /// Returns the full selection result.
    pub fn selection(&self) -> &SelectionResult {
        &self.selection
    }

    /// Returns the serializable model report.
    pub fn model(&self) -> &ModelReport {
        &self.model
    }

    /// Returns the forecast report, or why it could not be built.
    pub fn forecast(&self) -> Result<&ForecastReport, &PipelineError> {
        self.forecast.as_ref()
    }

    /// Returns the forecast failure in report form, if any.
    pub fn forecast_failure(&self) -> Option<ForecastFailure> {
        self.forecast.as_ref().err().map(ForecastFailure::from)
    }
}

/// Transforms, differences, fits, selects, forecasts and inverts `series`.
///
/// Candidate fit failures are recorded in the selection result; forecast
/// failures after a model was chosen are recorded in the outcome. Both
/// leave the run successful.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`PipelineError::InvalidConfig`] and stage variants | `config` fails validation |
/// | [`PipelineError::InvalidSeries`] | `train_len` exceeds the series |
/// | [`PipelineError::Domain`] | a training value is zero or negative |
/// | [`PipelineError::Difference`] | the training series is shorter than the total lag |
/// | [`PipelineError::Model`] | no candidate could be fitted and scored |
pub fn run_pipeline(
    series: &Series,
    config: &PipelineConfig,
) -> Result<PipelineOutcome, PipelineError> {
    let _run = info_span!("run_pipeline", n = series.len(), period = series.period()).entered();
    config.validate()?;

    let train_len = config.train_len().unwrap_or(series.len());
    let (train, test) = series.split_at(train_len)?;

    let (transformed, params) = fit_transform(train.values(), config.boxcox())?;
    info!(lambda = params.lambda(), train_len, "fitted Box-Cox transform");

    let lags = config
        .difference_lags()
        .map(<[usize]>::to_vec)
        .unwrap_or_else(|| vec![series.period(), 1]);
    let (stationary, difference_state) = DifferenceSpec::new(lags.clone())?.apply(&transformed)?;
    info!(?lags, n = stationary.len(), "differenced training series");

    let orders = match config.orders() {
        Some(orders) => orders.to_vec(),
        None => propose_orders(&stationary, config.proposal())?,
    };
    info!(?orders, "evaluating candidate orders");

    let (fits, reports, failures) =
        evaluate_candidates(&stationary, &orders, config.fit(), config.diagnostics());
    let selection = select(fits, reports, failures, config.selection())?;
    let model = ModelReport::new(&params, &lags, train.len(), &selection);

    let horizon = config
        .horizon()
        .or(test.as_ref().map(Series::len))
        .unwrap_or(DEFAULT_HORIZON);
    let test_values = test.as_ref().map(Series::values).unwrap_or(&[]);
    let forecast = build_forecast(
        &selection,
        &difference_state,
        &params,
        series.max(),
        test_values,
        horizon,
        config,
    );
    match &forecast {
        Ok(report) => info!(
            horizon,
            used_level = report.used_level,
            adjustments = report.clamp.total_adjustments(),
            "forecast built"
        ),
        Err(err) => warn!(kind = err.kind(), %err, "forecast could not be built"),
    }

    Ok(PipelineOutcome {
        params,
        difference_state,
        selection,
        model,
        forecast,
    })
}

fn build_forecast(
    selection: &SelectionResult,
    state: &DifferenceState,
    params: &BoxCoxParams,
    series_max: f64,
    test: &[f64],
    horizon: usize,
    config: &PipelineConfig,
) -> Result<ForecastReport, PipelineError> {
    let _span = debug_span!("forecast", horizon).entered();
    let stationary = forecast(selection.chosen().fit(), horizon)?;
    let original = invert_forecast(&stationary, state, params, series_max, config.invert())?;
    let scores = accuracy(&original, test);
    Ok(ForecastReport::new(&original, scores))
}
