//! Stability clamp for original-scale interval bounds.
//!
//! Bounds are forced into `[0, cap]`, where `cap` is a multiple of the
//! largest observed value. This biases coverage in exchange for usable
//! intervals, so every adjustment is counted and reported with the forecast.

use serde::{Deserialize, Serialize};

/// Bound adjustments applied to one forecast.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ClampReport {
    /// Upper bounds lowered to the cap.
    pub upper_capped: usize,
    /// Lower bounds lowered to the cap.
    pub lower_capped: usize,
    /// Bounds raised to zero.
    pub zero_floored: usize,
    /// Non-finite bounds replaced by zero (lower) or the cap (upper).
    pub non_finite_replaced: usize,
    /// Inverse Box–Cox evaluations that hit the base floor.
    pub boxcox_floor_hits: usize,
    /// Cap on upper bounds.
    pub cap: f64,
}

impl ClampReport {
    /// Total number of clamp adjustments (floor hits excluded).
    pub fn total_adjustments(&self) -> usize {
        self.upper_capped + self.lower_capped + self.zero_floored + self.non_finite_replaced
    }
}

#[derive(Clone, Copy)]
enum Side {
    Lower,
    Upper,
}

fn clamp_one(value: f64, cap: f64, side: Side, report: &mut ClampReport) -> f64 {
    if !value.is_finite() {
        report.non_finite_replaced += 1;
        match side {
            Side::Lower => 0.0,
            Side::Upper => cap,
        }
    } else if value > cap {
        match side {
            Side::Lower => report.lower_capped += 1,
            Side::Upper => report.upper_capped += 1,
        }
        cap
    } else if value < 0.0 {
        report.zero_floored += 1;
        0.0
    } else {
        value
    }
}

/// Clamps `lower` and `upper` into `[0, cap]`.
///
/// Idempotent: clamping already clamped bounds changes nothing and counts
/// nothing.
pub fn stability_clamp(lower: &[f64], upper: &[f64], cap: f64) -> (Vec<f64>, Vec<f64>, ClampReport) {
    let mut report = ClampReport {
        cap,
        ..ClampReport::default()
    };
    let lower = lower
        .iter()
        .map(|&v| clamp_one(v, cap, Side::Lower, &mut report))
        .collect();
    let upper = upper
        .iter()
        .map(|&v| clamp_one(v, cap, Side::Upper, &mut report))
        .collect();
    (lower, upper, report)
}
