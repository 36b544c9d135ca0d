//! Single-lag differencing.

use crate::error::DifferenceError;

/// Lag-`lag` difference: `out[t] = series[t + lag] − series[t]`.
///
/// The output is `lag` values shorter than the input.
///
/// # Errors
///
/// [`DifferenceError::ZeroLag`] for `lag == 0`,
/// [`DifferenceError::SeriesTooShort`] when `series.len() <= lag`.
pub fn difference(series: &[f64], lag: usize) -> Result<Vec<f64>, DifferenceError> {
    if lag == 0 {
        return Err(DifferenceError::ZeroLag);
    }
    if series.len() <= lag {
        return Err(DifferenceError::SeriesTooShort {
            n: series.len(),
            lag,
        });
    }
    Ok(series
        .iter()
        .skip(lag)
        .zip(series.iter())
        .map(|(later, earlier)| later - earlier)
        .collect())
}

/// Inverts a lag-`lag` difference by seeded cumulative summation.
///
/// `trailing` holds the `lag` level values immediately preceding the first
/// differenced value, in time order; only its last `lag` entries are used.
/// The result continues the levels:
/// `out[i] = diffed[i] + (trailing[i] if i < lag else out[i − lag])`.
///
/// Seeded with the head of a series, this rebuilds the rest of it; seeded
/// with the tail, it extends the series into the future.
///
/// # Errors
///
/// [`DifferenceError::ZeroLag`] for `lag == 0`,
/// [`DifferenceError::TrailingTooShort`] when fewer than `lag` seeds exist.
pub fn undifference(
    diffed: &[f64],
    trailing: &[f64],
    lag: usize,
) -> Result<Vec<f64>, DifferenceError> {
    if lag == 0 {
        return Err(DifferenceError::ZeroLag);
    }
    if trailing.len() < lag {
        return Err(DifferenceError::TrailingTooShort {
            got: trailing.len(),
            lag,
        });
    }
    let seed = &trailing[trailing.len() - lag..];
    let mut out = Vec::with_capacity(diffed.len());
    for (i, &d) in diffed.iter().enumerate() {
        let prev = if i < lag { seed[i] } else { out[i - lag] };
        out.push(d + prev);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_difference() {
        assert_eq!(
            difference(&[1.0, 4.0, 9.0, 16.0], 1).unwrap(),
            vec![3.0, 5.0, 7.0]
        );
    }

    #[test]
    fn seasonal_difference() {
        let series = [1.0, 2.0, 3.0, 11.0, 12.0, 13.0];
        assert_eq!(difference(&series, 3).unwrap(), vec![10.0, 10.0, 10.0]);
    }

    #[test]
    fn difference_rejects_bad_lag() {
        assert_eq!(difference(&[1.0, 2.0], 0), Err(DifferenceError::ZeroLag));
        assert_eq!(
            difference(&[1.0, 2.0], 2),
            Err(DifferenceError::SeriesTooShort { n: 2, lag: 2 })
        );
    }

    #[test]
    fn undifference_from_head_rebuilds_tail() {
        let series = [2.0, 5.0, 3.0, 8.0, 13.0, 7.0, 1.0];
        let d = difference(&series, 2).unwrap();
        assert_eq!(undifference(&d, &series[..2], 2).unwrap(), series[2..].to_vec());
    }

    #[test]
    fn undifference_continues_past_one_lag() {
        // seasonal lag 2, repeating pattern: each step adds 1 to last season
        let out = undifference(&[1.0, 1.0, 1.0, 1.0, 1.0], &[10.0, 20.0], 2).unwrap();
        assert_eq!(out, vec![11.0, 21.0, 12.0, 22.0, 13.0]);
    }

    #[test]
    fn undifference_uses_last_lag_seeds() {
        let out = undifference(&[0.5], &[100.0, 1.0, 2.0], 1).unwrap();
        assert_eq!(out, vec![2.5]);
    }

    #[test]
    fn undifference_requires_enough_seeds() {
        assert_eq!(
            undifference(&[1.0], &[1.0], 2),
            Err(DifferenceError::TrailingTooShort { got: 1, lag: 2 })
        );
    }

    #[test]
    fn undifference_empty_is_empty() {
        assert!(undifference(&[], &[1.0], 1).unwrap().is_empty());
    }
}
