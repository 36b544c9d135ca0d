//! Hold-out accuracy of an original-scale forecast.

use serde::{Deserialize, Serialize};

use crate::invert::OriginalScaleForecast;

/// Point and interval accuracy against held-out observations.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AccuracyReport {
    /// Number of steps compared: `min(horizon, test length)`.
    pub steps: usize,
    /// Root mean squared error.
    pub rmse: f64,
    /// Mean absolute error.
    pub mae: f64,
    /// Mean absolute percentage error over non-zero actuals; `None` when
    /// every compared actual is zero.
    pub mape: Option<f64>,
    /// Share of actuals inside `[lower, upper]`.
    pub coverage: f64,
}

/// Scores `forecast` against `actual`.
///
/// Returns `None` when there is nothing to compare.
pub fn accuracy(forecast: &OriginalScaleForecast, actual: &[f64]) -> Option<AccuracyReport> {
    let steps = forecast.horizon().min(actual.len());
    if steps == 0 {
        return None;
    }
    let n = steps as f64;
    let mut sq = 0.0;
    let mut abs = 0.0;
    let mut pct = 0.0;
    let mut pct_count = 0usize;
    let mut covered = 0usize;
    for i in 0..steps {
        let err = actual[i] - forecast.point()[i];
        sq += err * err;
        abs += err.abs();
        if actual[i] != 0.0 {
            pct += (err / actual[i]).abs();
            pct_count += 1;
        }
        if actual[i] >= forecast.lower()[i] && actual[i] <= forecast.upper()[i] {
            covered += 1;
        }
    }
    Some(AccuracyReport {
        steps,
        rmse: (sq / n).sqrt(),
        mae: abs / n,
        mape: (pct_count > 0).then(|| 100.0 * pct / pct_count as f64),
        coverage: covered as f64 / n,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clamp::ClampReport;
    use approx::assert_relative_eq;

    fn forecast() -> OriginalScaleForecast {
        OriginalScaleForecast::new(
            vec![10.0, 20.0, 30.0],
            vec![8.0, 15.0, 29.0],
            vec![12.0, 25.0, 31.0],
            0.95,
            0.95,
            ClampReport::default(),
        )
    }

    #[test]
    fn scores_overlapping_steps() {
        let report = accuracy(&forecast(), &[11.0, 18.0]).unwrap();
        assert_eq!(report.steps, 2);
        assert_relative_eq!(report.mae, 1.5);
        assert_relative_eq!(report.rmse, (2.5_f64).sqrt());
        assert_relative_eq!(report.mape.unwrap(), 100.0 * (1.0 / 11.0 + 2.0 / 18.0) / 2.0);
        assert_relative_eq!(report.coverage, 1.0);
    }

    #[test]
    fn zero_actuals_skip_mape() {
        let report = accuracy(&forecast(), &[0.0, 0.0, 0.0]).unwrap();
        assert!(report.mape.is_none());
        assert_relative_eq!(report.coverage, 0.0);
        assert!(accuracy(&forecast(), &[]).is_none());
    }
}
