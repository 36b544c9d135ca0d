//! Round-trip integration tests for aether-difference.

use aether_difference::{DifferenceSpec, difference, undifference};
use approx::{assert_relative_eq, relative_eq};

fn irregular_series(n: usize) -> Vec<f64> {
    let mut lcg: u64 = 2024;
    (0..n)
        .map(|t| {
            lcg = lcg.wrapping_mul(6364136223846793005).wrapping_add(1);
            let u = ((lcg >> 33) as f64) / (u32::MAX as f64);
            20.0 + 5.0 * (t as f64 / 8.0).sin() + 3.0 * u
        })
        .collect()
}

#[test]
fn single_lag_round_trip_is_exact() {
    let series = irregular_series(120);
    for lag in [1, 2, 7, 52] {
        let d = difference(&series, lag).unwrap();
        let rebuilt = undifference(&d, &series[..lag], lag).unwrap();
        let mut full = series[..lag].to_vec();
        full.extend(rebuilt);
        for (a, b) in full.iter().zip(series.iter()) {
            assert_relative_eq!(*a, *b, epsilon = 1e-9);
        }
    }
}

#[test]
fn misordered_trailing_values_change_the_result() {
    let series = irregular_series(60);
    let lag = 4;
    let d = difference(&series, lag).unwrap();
    let mut reversed = series[..lag].to_vec();
    reversed.reverse();
    let good = undifference(&d, &series[..lag], lag).unwrap();
    let bad = undifference(&d, &reversed, lag).unwrap();
    assert_ne!(good, bad);
    assert!(
        bad.iter()
            .zip(series[lag..].iter())
            .any(|(a, b)| !relative_eq!(*a, *b, epsilon = 1e-6))
    );
}

#[test]
fn two_stage_inversion_needs_both_windows() {
    let series = irregular_series(200);
    let (train, held_out) = series.split_at(150);
    let spec = DifferenceSpec::new(vec![52, 1]).unwrap();
    let (_, state) = spec.apply(train).unwrap();

    // The exact future differences reproduce the held-out levels.
    let (full_diffed, _) = spec.apply(&series).unwrap();
    let future = &full_diffed[full_diffed.len() - held_out.len()..];
    let levels = state.invert(future).unwrap();
    for (a, b) in levels.iter().zip(held_out.iter()) {
        assert_relative_eq!(*a, *b, epsilon = 1e-8);
    }

    // Seeding the seasonal stage with the trend window breaks reconstruction.
    let trend_seed = state.stages()[1].trailing();
    let after_trend = undifference(future, trend_seed, 1).unwrap();
    let wrong = undifference(&after_trend, &trend_seed.repeat(52), 52).unwrap();
    assert!(
        wrong
            .iter()
            .zip(held_out.iter())
            .any(|(a, b)| !relative_eq!(*a, *b, epsilon = 1e-6))
    );
}
