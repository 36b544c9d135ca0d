//! Multi-stage difference specification and its recorded state.

use crate::error::DifferenceError;
use crate::lag::{difference, undifference};

/// Ordered list of differencing lags, applied first to last.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DifferenceSpec {
    lags: Vec<usize>,
}

impl DifferenceSpec {
    /// Creates a specification from lags in application order.
    ///
    /// # Errors
    ///
    /// [`DifferenceError::EmptySpec`] for no lags,
    /// [`DifferenceError::ZeroLag`] if any lag is zero.
    pub fn new(lags: Vec<usize>) -> Result<Self, DifferenceError> {
        if lags.is_empty() {
            return Err(DifferenceError::EmptySpec);
        }
        if lags.contains(&0) {
            return Err(DifferenceError::ZeroLag);
        }
        Ok(Self { lags })
    }

    /// Seasonal difference at `period` followed by a first difference.
    pub fn seasonal_then_trend(period: usize) -> Result<Self, DifferenceError> {
        Self::new(vec![period, 1])
    }

    /// Returns the lags in application order.
    pub fn lags(&self) -> &[usize] {
        &self.lags
    }

    /// Number of observations consumed by the whole chain.
    pub fn total_lag(&self) -> usize {
        self.lags.iter().sum()
    }

    /// Applies every stage in order and records each stage's trailing
    /// window from that stage's input.
    ///
    /// # Errors
    ///
    /// [`DifferenceError::SeriesTooShort`] when any stage runs out of data.
    pub fn apply(&self, series: &[f64]) -> Result<(Vec<f64>, DifferenceState), DifferenceError> {
        let mut current = series.to_vec();
        let mut stages = Vec::with_capacity(self.lags.len());
        for &lag in &self.lags {
            let next = difference(&current, lag)?;
            stages.push(DifferenceStage {
                lag,
                trailing: current[current.len() - lag..].to_vec(),
            });
            current = next;
        }
        Ok((current, DifferenceState { stages }))
    }
}

/// Seed window captured before one differencing stage.
#[derive(Clone, Debug, PartialEq)]
pub struct DifferenceStage {
    lag: usize,
    trailing: Vec<f64>,
}

impl DifferenceStage {
    /// Returns the stage lag.
    pub fn lag(&self) -> usize {
        self.lag
    }

    /// Returns the last `lag` values of this stage's input, in time order.
    pub fn trailing(&self) -> &[f64] {
        &self.trailing
    }
}

/// Trailing windows for every stage of an applied [`DifferenceSpec`].
///
/// Immutable once produced; [`invert`](Self::invert) undoes the stages in
/// exact reverse order, each seeded with its own window.
#[derive(Clone, Debug, PartialEq)]
pub struct DifferenceState {
    stages: Vec<DifferenceStage>,
}

impl DifferenceState {
    /// Returns the recorded stages in application order.
    pub fn stages(&self) -> &[DifferenceStage] {
        &self.stages
    }

    /// Maps values that continue the fully differenced series back to the
    /// level of the original (pre-differencing) series.
    ///
    /// Step `i` of the output is the level at `i + 1` periods after the end
    /// of the series that was differenced.
    pub fn invert(&self, future: &[f64]) -> Result<Vec<f64>, DifferenceError> {
        self.stages
            .iter()
            .rev()
            .try_fold(future.to_vec(), |acc, stage| {
                undifference(&acc, &stage.trailing, stage.lag)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seasonal_series(n: usize, period: usize) -> Vec<f64> {
        (0..n)
            .map(|t| 10.0 + 0.5 * t as f64 + ((t % period) as f64).powi(2))
            .collect()
    }

    #[test]
    fn spec_validation() {
        assert_eq!(DifferenceSpec::new(vec![]), Err(DifferenceError::EmptySpec));
        assert_eq!(
            DifferenceSpec::new(vec![52, 0]),
            Err(DifferenceError::ZeroLag)
        );
        let spec = DifferenceSpec::seasonal_then_trend(52).unwrap();
        assert_eq!(spec.lags(), &[52, 1]);
        assert_eq!(spec.total_lag(), 53);
    }

    #[test]
    fn apply_records_pre_stage_windows() {
        let series = seasonal_series(20, 4);
        let spec = DifferenceSpec::new(vec![4, 1]).unwrap();
        let (diffed, state) = spec.apply(&series).unwrap();
        assert_eq!(diffed.len(), 15);

        let seasonal = difference(&series, 4).unwrap();
        assert_eq!(state.stages()[0].lag(), 4);
        assert_eq!(state.stages()[0].trailing(), &series[16..]);
        assert_eq!(state.stages()[1].lag(), 1);
        assert_eq!(state.stages()[1].trailing(), &seasonal[15..]);
    }

    #[test]
    fn invert_extends_deterministic_series_exactly() {
        // trend + fixed seasonal pattern: seasonal-then-trend difference is zero
        let period = 4;
        let full = seasonal_series(30, period);
        let (train, future) = full.split_at(22);
        let spec = DifferenceSpec::new(vec![period, 1]).unwrap();
        let (diffed, state) = spec.apply(train).unwrap();
        assert!(diffed.iter().all(|d| d.abs() < 1e-12));

        let levels = state.invert(&[0.0; 8]).unwrap();
        for (a, b) in levels.iter().zip(future.iter()) {
            assert!((a - b).abs() < 1e-9, "{a} vs {b}");
        }
    }

    #[test]
    fn apply_fails_when_a_stage_runs_out() {
        let spec = DifferenceSpec::new(vec![5, 1]).unwrap();
        assert_eq!(
            spec.apply(&[1.0; 6]).err(),
            Some(DifferenceError::SeriesTooShort { n: 1, lag: 1 })
        );
    }
}
