//! Dense linear algebra for the small systems that show up in OLS and
//! state-space initialisation.
//!
//! Matrices here are at most a few dozen rows, so plain Gaussian
//! elimination with partial pivoting is adequate. Both functions return
//! `None` when a pivot falls below a relative tolerance instead of
//! producing non-finite output.

use ndarray::{Array1, Array2};

/// Relative pivot tolerance below which a matrix is treated as singular.
const PIVOT_TOL: f64 = 1e-12;

/// Solves the square system `a * x = b`.
///
/// Returns `None` if `a` is not square, dimensions disagree, or `a` is
/// numerically singular.
pub fn solve(a: &Array2<f64>, b: &Array1<f64>) -> Option<Array1<f64>> {
    let n = a.nrows();
    if a.ncols() != n || b.len() != n {
        return None;
    }
    let mut m = a.clone();
    let mut x = b.clone();
    let scale = max_abs(&m);
    if scale == 0.0 {
        return None;
    }

    for col in 0..n {
        let pivot_row = pivot(&m, col)?;
        if m[[pivot_row, col]].abs() < PIVOT_TOL * scale {
            return None;
        }
        if pivot_row != col {
            swap_rows(&mut m, pivot_row, col);
            x.swap(pivot_row, col);
        }
        for row in col + 1..n {
            let factor = m[[row, col]] / m[[col, col]];
            if factor == 0.0 {
                continue;
            }
            for k in col..n {
                m[[row, k]] -= factor * m[[col, k]];
            }
            x[row] -= factor * x[col];
        }
    }

    // Back substitution
    for row in (0..n).rev() {
        let mut sum = x[row];
        for k in row + 1..n {
            sum -= m[[row, k]] * x[k];
        }
        x[row] = sum / m[[row, row]];
    }
    Some(x)
}

/// Inverts a square matrix via Gauss-Jordan elimination.
///
/// Returns `None` if `a` is not square or is numerically singular.
pub fn invert(a: &Array2<f64>) -> Option<Array2<f64>> {
    let n = a.nrows();
    if a.ncols() != n {
        return None;
    }
    let mut m = a.clone();
    let mut inv = Array2::eye(n);
    let scale = max_abs(&m);
    if scale == 0.0 {
        return None;
    }

    for col in 0..n {
        let pivot_row = pivot(&m, col)?;
        if m[[pivot_row, col]].abs() < PIVOT_TOL * scale {
            return None;
        }
        if pivot_row != col {
            swap_rows(&mut m, pivot_row, col);
            swap_rows(&mut inv, pivot_row, col);
        }
        let p = m[[col, col]];
        for k in 0..n {
            m[[col, k]] /= p;
            inv[[col, k]] /= p;
        }
        for row in 0..n {
            if row == col {
                continue;
            }
            let factor = m[[row, col]];
            if factor == 0.0 {
                continue;
            }
            for k in 0..n {
                m[[row, k]] -= factor * m[[col, k]];
                inv[[row, k]] -= factor * inv[[col, k]];
            }
        }
    }
    Some(inv)
}

fn max_abs(m: &Array2<f64>) -> f64 {
    m.iter().fold(0.0_f64, |acc, v| acc.max(v.abs()))
}

/// Row index in `col..n` holding the largest magnitude in column `col`.
fn pivot(m: &Array2<f64>, col: usize) -> Option<usize> {
    (col..m.nrows()).max_by(|&i, &j| {
        m[[i, col]]
            .abs()
            .partial_cmp(&m[[j, col]].abs())
            .unwrap_or(std::cmp::Ordering::Equal)
    })
}

fn swap_rows(m: &mut Array2<f64>, a: usize, b: usize) {
    if a == b {
        return;
    }
    for k in 0..m.ncols() {
        m.swap([a, k], [b, k]);
    }
}
