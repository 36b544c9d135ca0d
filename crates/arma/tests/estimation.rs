//! Estimation and forecasting integration tests for aether-arma.

use aether_arma::{ArmaError, ArmaFit, ArmaSpec, FitConfig, forecast};
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};

fn generate_arma11(phi: f64, theta: f64, mu: f64, n: usize, seed: u64) -> Vec<f64> {
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    let normal = Normal::new(0.0, 1.0).unwrap();
    let mut x = vec![0.0; n];
    let mut eps = vec![0.0; n];
    for t in 0..n {
        eps[t] = normal.sample(&mut rng);
        let ar_part = if t > 0 { phi * x[t - 1] } else { 0.0 };
        let ma_part = if t > 0 { theta * eps[t - 1] } else { 0.0 };
        x[t] = ar_part + eps[t] + ma_part;
    }
    x.into_iter().map(|v| v + mu).collect()
}

#[test]
fn arma11_recovery() {
    let data = generate_arma11(0.6, 0.3, 2.0, 2000, 100);
    let fit = ArmaSpec::new(1, 1).fit(&data).unwrap();
    assert!((fit.ar()[0] - 0.6).abs() < 0.1, "phi = {}", fit.ar()[0]);
    assert!((fit.ma()[0] - 0.3).abs() < 0.1, "theta = {}", fit.ma()[0]);
    assert!((fit.intercept() - 2.0).abs() < 0.3, "mu = {}", fit.intercept());
    assert!(fit.sigma2() > 0.8 && fit.sigma2() < 1.2);
}

#[test]
fn richer_model_never_loses_likelihood_by_much() {
    let data = generate_arma11(0.5, 0.0, 0.0, 400, 7);
    let small = ArmaSpec::new(1, 0).fit(&data).unwrap();
    let large = ArmaSpec::new(3, 1).fit(&data).unwrap();
    // nested models: the optimiser should reach at least the smaller optimum
    assert!(large.log_likelihood() >= small.log_likelihood() - 1.0);
    assert!(large.aicc().unwrap() > large.aic());
}

#[test]
fn seasonal_length_fit_and_forecast() {
    // 138 values: what remains of 191 weekly observations after lags 52 and 1
    let data = generate_arma11(0.3, -0.4, 0.0, 138, 42);
    let fit = ArmaSpec::new(5, 1)
        .fit_with(&data, &FitConfig::new())
        .unwrap();
    assert_eq!(fit.n_obs(), 138);
    assert_eq!(fit.n_params(), 7);
    let out = forecast(&fit, 52).unwrap();
    assert_eq!(out.horizon(), 52);
    assert!(out.standard_errors()[0] > 0.0);
    assert!(
        out.standard_errors()
            .windows(2)
            .all(|w| w[1] >= w[0])
    );
    // far-horizon point forecasts revert to the intercept
    assert!((out.point_forecasts()[51] - fit.intercept()).abs() < 0.2);
}

#[test]
fn aicc_undefined_for_tiny_samples() {
    let data = [0.3, -1.1, 0.8, 0.2, -0.5, 1.4, -0.9];
    let fit =
        ArmaFit::from_coefficients(ArmaSpec::new(2, 1), vec![0.2, 0.1], vec![0.3], 0.0, &data)
            .unwrap();
    // k = 5, n = 7: n - k - 1 = 1 is still defined
    assert!(fit.aicc().is_ok());
    let fit = ArmaFit::from_coefficients(
        ArmaSpec::new(3, 1),
        vec![0.2, 0.1, 0.05],
        vec![0.3],
        0.0,
        &data[..6],
    )
    .unwrap();
    assert!(matches!(
        fit.aicc(),
        Err(ArmaError::UndefinedCriterion { n: 6, k: 6 })
    ));
}
