//! Companion-form state space for a zero-mean ARMA(p,q) process.
//!
//! ```text
//! a[t+1] = T a[t] + R e[t]
//! y[t]   = a[t][0]
//! ```
//!
//! with `T` holding the AR coefficients in its first column and ones on
//! the super-diagonal, `R = [1, theta_1, ..., theta_q, 0, ...]`, and
//! `e[t] ~ N(0, sigma2)`. The state dimension is `max(p, q + 1)`.
//!
//! **Not part of the public API.**

use ndarray::{Array1, Array2};
use nimbus_stats::linalg;

#[derive(Clone, Debug)]
pub(crate) struct StateSpace {
    transition: Array2<f64>,
    selection: Array1<f64>,
    rrt: Array2<f64>,
}

impl StateSpace {
    pub(crate) fn new(ar: &[f64], ma: &[f64]) -> Self {
        let dim = ar.len().max(ma.len() + 1);

        let mut transition = Array2::zeros((dim, dim));
        for (i, &phi) in ar.iter().enumerate() {
            transition[[i, 0]] = phi;
        }
        for i in 1..dim {
            transition[[i - 1, i]] = 1.0;
        }

        let mut selection = Array1::zeros(dim);
        selection[0] = 1.0;
        for (j, &theta) in ma.iter().enumerate() {
            selection[j + 1] = theta;
        }

        let rrt = Array2::from_shape_fn((dim, dim), |(i, j)| selection[i] * selection[j]);

        Self {
            transition,
            selection,
            rrt,
        }
    }

    pub(crate) fn dim(&self) -> usize {
        self.selection.len()
    }

    pub(crate) fn transition(&self) -> &Array2<f64> {
        &self.transition
    }

    pub(crate) fn rrt(&self) -> &Array2<f64> {
        &self.rrt
    }

    /// Unconditional state covariance (in units of `sigma2`), solving
    /// `P = T P T' + R R'` through its vectorised form
    /// `(I - T (x) T) vec(P) = vec(R R')`.
    ///
    /// Returns `None` when the system is singular, i.e. the AR part has a
    /// unit root.
    pub(crate) fn initial_covariance(&self) -> Option<Array2<f64>> {
        let m = self.dim();
        let t = &self.transition;
        let mm = m * m;
        let mut lhs = Array2::<f64>::eye(mm);
        for i in 0..m {
            for j in 0..m {
                for k in 0..m {
                    for l in 0..m {
                        lhs[[i * m + j, k * m + l]] -= t[[i, k]] * t[[j, l]];
                    }
                }
            }
        }
        let rhs = Array1::from_iter(self.rrt.iter().copied());
        let vec_p = linalg::solve(&lhs, &rhs)?;
        let p0 = vec_p.into_shape_with_order((m, m)).ok()?;
        Some(p0)
    }
}
