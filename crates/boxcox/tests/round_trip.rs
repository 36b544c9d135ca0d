//! Round-trip integration tests for aether-boxcox.

use aether_boxcox::{BoxCoxConfig, BoxCoxError, BoxCoxParams, apply, fit_transform, invert};
use rand::SeedableRng;
use rand_distr::{Distribution, Gamma};

fn weekly_concentrations(n: usize, seed: u64) -> Vec<f64> {
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    let gamma = Gamma::new(4.0, 8.0).unwrap();
    (0..n)
        .map(|t| {
            let season = 1.0 + 0.4 * (2.0 * std::f64::consts::PI * t as f64 / 52.0).cos();
            season * gamma.sample(&mut rng) + 0.5
        })
        .collect()
}

#[test]
fn fitted_transform_round_trips() {
    let series = weekly_concentrations(255, 42);
    let (transformed, params) = fit_transform(&series, &BoxCoxConfig::new()).unwrap();
    let restored = invert(&transformed, &params);
    for (a, b) in series.iter().zip(restored.iter()) {
        assert!((a - b).abs() <= 1e-8 * a.max(1.0), "{a} vs {b}");
    }
}

#[test]
fn fixed_lambdas_round_trip() {
    let series = weekly_concentrations(120, 7);
    for lambda in [-2.0, -0.75, -0.18, 0.0, 0.33, 1.0, 2.0] {
        let params = BoxCoxParams::new(lambda).unwrap();
        let restored = invert(&apply(&series, &params).unwrap(), &params);
        for (a, b) in series.iter().zip(restored.iter()) {
            assert!(
                (a - b).abs() <= 1e-7 * a.max(1.0),
                "lambda {lambda}: {a} vs {b}"
            );
        }
    }
}

#[test]
fn transform_applies_identically_to_held_out_data() {
    let series = weekly_concentrations(255, 11);
    let (train, test) = series.split_at(191);
    let (_, params) = fit_transform(train, &BoxCoxConfig::new()).unwrap();
    let direct = apply(test, &params).unwrap();
    let again = apply(test, &params).unwrap();
    assert_eq!(direct, again);
}

#[test]
fn negative_value_in_fit_is_domain_error() {
    let mut series = weekly_concentrations(80, 5);
    series[40] = -3.2;
    let err = fit_transform(&series, &BoxCoxConfig::new()).unwrap_err();
    assert!(matches!(err, BoxCoxError::Domain { index: 40, .. }));
}
