//! Validated equally spaced series with a seasonal period.

use crate::error::PipelineError;

/// Ordered, gap-free, finite observations with a seasonal period.
#[derive(Clone, Debug, PartialEq)]
pub struct Series {
    values: Vec<f64>,
    period: usize,
}

impl Series {
    /// Validates and wraps `values`.
    ///
    /// # Errors
    ///
    /// [`PipelineError::InvalidSeries`] for empty input, a non-finite value
    /// or `period < 2`.
    ///
    /// # Example
    ///
    /// ```
    /// use aether_pipeline::Series;
    ///
    /// let series = Series::new(vec![12.0, 15.5, 9.8, 11.2], 2).unwrap();
    /// let (train, test) = series.split_at(3).unwrap();
    /// assert_eq!(train.len(), 3);
    /// assert_eq!(test.unwrap().values(), &[11.2]);
    /// ```
    pub fn new(values: Vec<f64>, period: usize) -> Result<Self, PipelineError> {
        if values.is_empty() {
            return Err(PipelineError::InvalidSeries {
                reason: "series is empty".to_string(),
            });
        }
        if let Some(index) = values.iter().position(|x| !x.is_finite()) {
            return Err(PipelineError::InvalidSeries {
                reason: format!("non-finite value {} at index {index}", values[index]),
            });
        }
        if period < 2 {
            return Err(PipelineError::InvalidSeries {
                reason: format!("seasonal period must be >= 2, got {period}"),
            });
        }
        Ok(Self { values, period })
    }

    /// Returns the observations.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Returns the seasonal period.
    pub fn period(&self) -> usize {
        self.period
    }

    /// Returns the number of observations.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always `false`; a `Series` is never empty.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Largest observation.
    pub fn max(&self) -> f64 {
        self.values.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }

    /// Splits into the first `n` observations and the rest.
    ///
    /// The test part is `None` when `n == len()`.
    ///
    /// # Errors
    ///
    /// [`PipelineError::InvalidSeries`] when `n == 0` or `n > len()`.
    pub fn split_at(&self, n: usize) -> Result<(Series, Option<Series>), PipelineError> {
        if n == 0 || n > self.len() {
            return Err(PipelineError::InvalidSeries {
                reason: format!("cannot split {} observations at {n}", self.len()),
            });
        }
        let (train, test) = self.values.split_at(n);
        let train = Series {
            values: train.to_vec(),
            period: self.period,
        };
        let test = (!test.is_empty()).then(|| Series {
            values: test.to_vec(),
            period: self.period,
        });
        Ok((train, test))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_invalid_input() {
        assert!(Series::new(vec![], 52).is_err());
        assert!(Series::new(vec![1.0, f64::NAN], 52).is_err());
        assert!(Series::new(vec![1.0, 2.0], 1).is_err());
    }

    #[test]
    fn split_shares_period() {
        let series = Series::new((1..=10).map(f64::from).collect(), 4).unwrap();
        let (train, test) = series.split_at(7).unwrap();
        let test = test.unwrap();
        assert_eq!(train.len(), 7);
        assert_eq!(test.values(), &[8.0, 9.0, 10.0]);
        assert_eq!(test.period(), 4);
        assert_eq!(series.max(), 10.0);
    }

    #[test]
    fn split_at_end_has_no_test() {
        let series = Series::new(vec![1.0, 2.0, 3.0], 2).unwrap();
        assert!(series.split_at(3).unwrap().1.is_none());
        assert!(series.split_at(0).is_err());
        assert!(series.split_at(4).is_err());
    }
}
