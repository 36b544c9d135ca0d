//! Unconstrained parametrisation used by the optimiser.
//!
//! The optimiser works on `[mu, a_1..a_p, b_1..b_q]` in `R^(1+p+q)`. The
//! raw AR and MA blocks are mapped through partial autocorrelations, so every
//! point of the search space decodes to a stationary AR polynomial and an
//! invertible MA polynomial.

/// Maps raw values to the coefficients of a polynomial `1 − Σ c_i z^i` with
/// all roots outside the unit circle (Jones 1980, Monahan 1984).
///
/// `r_k = tanh(raw_k)` gives partial autocorrelations in `(-1, 1)`; the
/// Durbin–Levinson step `c_j ← c_j − r_k c_{k−j}` builds the coefficients
/// one order at a time.
pub(crate) fn pacf_to_coeffs(raw: &[f64]) -> Vec<f64> {
    let mut coeffs: Vec<f64> = Vec::with_capacity(raw.len());
    for r in raw.iter().map(|a| a.tanh()) {
        let previous = coeffs.clone();
        let k = previous.len();
        for (j, c) in coeffs.iter_mut().enumerate() {
            *c = previous[j] - r * previous[k - 1 - j];
        }
        coeffs.push(r);
    }
    coeffs
}

/// Decoded model parameters.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Coefficients {
    pub(crate) intercept: f64,
    pub(crate) ar: Vec<f64>,
    pub(crate) ma: Vec<f64>,
}

/// Position of each block in the optimiser's parameter vector.
#[derive(Clone, Copy, Debug)]
pub(crate) struct ParamLayout {
    p: usize,
    q: usize,
}

impl ParamLayout {
    pub(crate) fn new(p: usize, q: usize) -> Self {
        Self { p, q }
    }

    pub(crate) fn dim(&self) -> usize {
        1 + self.p + self.q
    }

    /// Decodes a raw vector. MA coefficients are the negated PACF map so
    /// that `1 + Σ θ_j z^j` is invertible.
    pub(crate) fn decode(&self, raw: &[f64]) -> Coefficients {
        let (ar_raw, ma_raw) = raw[1..].split_at(self.p);
        Coefficients {
            intercept: raw[0],
            ar: pacf_to_coeffs(ar_raw),
            ma: pacf_to_coeffs(ma_raw).into_iter().map(|c| -c).collect(),
        }
    }

    /// Starting simplex: white noise around the sample mean, with one
    /// vertex displaced along each axis.
    pub(crate) fn initial_simplex(&self, mean: f64, scale: f64) -> Vec<Vec<f64>> {
        let dim = self.dim();
        let mut origin = vec![0.0; dim];
        origin[0] = mean;
        let mut simplex = Vec::with_capacity(dim + 1);
        simplex.push(origin.clone());
        for i in 0..dim {
            let mut vertex = origin.clone();
            vertex[i] += if i == 0 { 0.5 * scale } else { 0.5 };
            simplex.push(vertex);
        }
        simplex
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn empty_and_zero() {
        assert!(pacf_to_coeffs(&[]).is_empty());
        assert_eq!(pacf_to_coeffs(&[0.0, 0.0, 0.0]), vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn order_one_is_tanh() {
        for a in [-10.0, -0.5, 0.3, 10.0] {
            let c = pacf_to_coeffs(&[a]);
            assert_relative_eq!(c[0], f64::tanh(a), epsilon = 1e-15);
            assert!(c[0].abs() <= 1.0);
        }
    }

    #[test]
    fn order_two_matches_durbin_levinson() {
        let c = pacf_to_coeffs(&[0.5, 0.3]);
        let (r1, r2) = (0.5_f64.tanh(), 0.3_f64.tanh());
        assert_relative_eq!(c[0], r1 - r2 * r1, epsilon = 1e-12);
        assert_relative_eq!(c[1], r2, epsilon = 1e-12);
    }

    #[test]
    fn order_two_lies_in_stationarity_triangle() {
        for raw in [[1.0, -2.0], [-3.0, 2.0], [2.5, 2.5], [0.1, -0.1]] {
            let c = pacf_to_coeffs(&raw);
            assert!(c[1].abs() < 1.0, "{raw:?}: {c:?}");
            assert!(c[0] + c[1] < 1.0, "{raw:?}: {c:?}");
            assert!(c[1] - c[0] < 1.0, "{raw:?}: {c:?}");
        }
    }

    #[test]
    fn decode_splits_blocks_and_negates_ma() {
        let layout = ParamLayout::new(2, 1);
        assert_eq!(layout.dim(), 4);
        let coeffs = layout.decode(&[3.5, 0.5, 0.3, 0.8]);
        assert_eq!(coeffs.intercept, 3.5);
        assert_eq!(coeffs.ar, pacf_to_coeffs(&[0.5, 0.3]));
        assert_relative_eq!(coeffs.ma[0], -(0.8_f64.tanh()), epsilon = 1e-15);
    }

    #[test]
    fn simplex_has_dim_plus_one_vertices() {
        let layout = ParamLayout::new(1, 1);
        let simplex = layout.initial_simplex(10.0, 2.0);
        assert_eq!(simplex.len(), 4);
        assert_eq!(simplex[0], vec![10.0, 0.0, 0.0]);
        assert_eq!(simplex[1], vec![11.0, 0.0, 0.0]);
        assert_eq!(simplex[3], vec![10.0, 0.0, 0.5]);
    }
}
