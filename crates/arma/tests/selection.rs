//! Candidate evaluation and selection integration tests for aether-arma.

use aether_arma::{
    ArmaError, DiagnosticConfig, FitConfig, ProposalConfig, SelectionConfig, evaluate_candidates,
    propose_orders, select,
};
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};

fn ar2_series(n: usize, seed: u64) -> Vec<f64> {
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    let normal = Normal::new(0.0, 1.0).unwrap();
    let mut x = vec![0.0; n];
    for t in 2..n {
        x[t] = 0.5 * x[t - 1] - 0.3 * x[t - 2] + normal.sample(&mut rng);
    }
    x
}

#[test]
fn evaluation_preserves_candidate_order() {
    let series = ar2_series(300, 1);
    let orders = [(2, 0), (0, 0), (1, 1), (0, 2)];
    let (fits, reports, failures) = evaluate_candidates(
        &series,
        &orders,
        &FitConfig::new(),
        &DiagnosticConfig::new(),
    );
    assert!(failures.is_empty());
    let fitted: Vec<_> = fits.iter().map(|f| f.order()).collect();
    assert_eq!(fitted, orders.to_vec());
    assert_eq!(reports.len(), orders.len());
}

#[test]
fn failing_candidate_is_isolated() {
    let series = ar2_series(300, 2);
    let orders = [(1, 0), (2, 0)];
    let tight = FitConfig::new().with_max_iters(2);
    let (fits, _, failures) =
        evaluate_candidates(&series, &orders, &tight, &DiagnosticConfig::new());
    assert!(fits.is_empty());
    assert_eq!(failures.len(), 2);
    assert!(
        failures
            .iter()
            .all(|f| matches!(f.error, ArmaError::NonConvergence { .. }))
    );
    assert_eq!(
        select(vec![], vec![], failures, &SelectionConfig::new()),
        Err(ArmaError::NoCandidates)
    );
}

#[test]
fn proposed_family_selects_true_order() {
    let series = ar2_series(1500, 3);
    let orders = propose_orders(&series, &ProposalConfig::new().with_max_orders(2, 0)).unwrap();
    assert_eq!(orders, vec![(2, 0)]);

    let mut all = orders.clone();
    all.extend([(1, 0), (0, 0)]);
    let (fits, reports, failures) =
        evaluate_candidates(&series, &all, &FitConfig::new(), &DiagnosticConfig::new());
    let result = select(fits, reports, failures, &SelectionConfig::new()).unwrap();
    assert_eq!(result.ranking().len(), all.len());
    assert_eq!(result.chosen().order(), (2, 0));
    assert!(
        result
            .ranking()
            .windows(2)
            .all(|w| w[0].aicc() <= w[1].aicc())
    );
    // white noise is far behind an AR(2)
    assert_eq!(result.ranking().last().unwrap().order(), (0, 0));
}
