//! Differencing and its inverse.

use crate::error::SeriesError;

/// Applies first differencing `d` times: `out[i] = x[i + 1] - x[i]` per pass.
///
/// The result has `values.len() - d` elements. `d == 0` returns a copy.
///
/// # Errors
///
/// Returns [`SeriesError::EmptySeries`] if `values.len() < d + 1`.
pub fn difference(values: &[f64], d: usize) -> Result<Vec<f64>, SeriesError> {
    if values.len() < d + 1 {
        return Err(SeriesError::EmptySeries { n: values.len(), d });
    }
    let mut out = values.to_vec();
    for _ in 0..d {
        out = out.windows(2).map(|w| w[1] - w[0]).collect();
    }
    Ok(out)
}

/// Returns the `d` seed values at time index `t` of the original series.
///
/// Entry `k` is the `k`-th difference of `values` evaluated at `t`
/// (entry 0 is `values[t]` itself). Passing these seeds to
/// [`undifference`] integrates a `d`-times differenced window that starts
/// at `t + 1`.
///
/// # Errors
///
/// Returns [`SeriesError::EmptySeries`] if the series is shorter than
/// `d + 1`, and [`SeriesError::InvalidArgument`] if `t` is out of range or
/// too early for the `(d - 1)`-th difference to exist (`t < d - 1`).
pub fn seeds_at(values: &[f64], d: usize, t: usize) -> Result<Vec<f64>, SeriesError> {
    if d == 0 {
        return Ok(Vec::new());
    }
    if values.len() < d + 1 {
        return Err(SeriesError::EmptySeries { n: values.len(), d });
    }
    if t >= values.len() || t + 1 < d {
        return Err(SeriesError::InvalidArgument {
            name: "t",
            reason: format!(
                "seed index {t} outside {}..{} for d={d}",
                d - 1,
                values.len()
            ),
        });
    }

    let mut seeds = Vec::with_capacity(d);
    let mut level = values.to_vec();
    for k in 0..d {
        // `level` holds the k-th difference; its element j sits at time j + k.
        seeds.push(level[t - k]);
        level = level.windows(2).map(|w| w[1] - w[0]).collect();
    }
    Ok(seeds)
}

/// Integrates a `d`-times differenced window back to levels.
///
/// `seeds[k]` is the `k`-th difference at the step preceding the window
/// (see [`seeds_at`]). Integration runs from the highest difference down:
/// each pass is a cumulative sum started at the matching seed. The output
/// has the same length as `diff` and excludes the seeds themselves.
///
/// With an empty seed slice (`d == 0`) the input is returned unchanged.
pub fn undifference(diff: &[f64], seeds: &[f64]) -> Vec<f64> {
    let mut out = diff.to_vec();
    for &seed in seeds.iter().rev() {
        let mut acc = seed;
        for v in out.iter_mut() {
            acc += *v;
            *v = acc;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn difference_order_one() {
        let x = [1.0, 4.0, 9.0, 16.0];
        assert_eq!(difference(&x, 1).unwrap(), vec![3.0, 5.0, 7.0]);
    }

    #[test]
    fn difference_order_two() {
        let x = [1.0, 4.0, 9.0, 16.0];
        assert_eq!(difference(&x, 2).unwrap(), vec![2.0, 2.0]);
    }

    #[test]
    fn difference_order_zero_copies() {
        let x = [1.5, -2.0];
        assert_eq!(difference(&x, 0).unwrap(), x.to_vec());
    }

    #[test]
    fn difference_too_short() {
        assert_eq!(
            difference(&[1.0, 2.0], 2).unwrap_err(),
            SeriesError::EmptySeries { n: 2, d: 2 }
        );
        assert_eq!(
            difference(&[], 0).unwrap_err(),
            SeriesError::EmptySeries { n: 0, d: 0 }
        );
    }

    #[test]
    fn difference_exactly_d_plus_one() {
        assert_eq!(difference(&[2.0, 5.0], 1).unwrap(), vec![3.0]);
    }

    #[test]
    fn seeds_order_two() {
        let x = [1.0, 4.0, 9.0, 16.0, 25.0];
        // At t = 4: level 25, first difference 25 - 16 = 9
        assert_eq!(seeds_at(&x, 2, 4).unwrap(), vec![25.0, 9.0]);
        // At t = 1: level 4, first difference 4 - 1 = 3
        assert_eq!(seeds_at(&x, 2, 1).unwrap(), vec![4.0, 3.0]);
    }

    #[test]
    fn seeds_index_too_early() {
        let x = [1.0, 4.0, 9.0];
        assert!(matches!(
            seeds_at(&x, 2, 0),
            Err(SeriesError::InvalidArgument { name: "t", .. })
        ));
        assert!(matches!(
            seeds_at(&x, 1, 3),
            Err(SeriesError::InvalidArgument { name: "t", .. })
        ));
    }

    #[test]
    fn seeds_order_zero_empty() {
        assert!(seeds_at(&[1.0], 0, 0).unwrap().is_empty());
    }

    #[test]
    fn undifference_inverts_order_one() {
        let x = [3.0, 1.0, 4.0, 1.0, 5.0];
        let diff = difference(&x, 1).unwrap();
        let rebuilt = undifference(&diff, &[x[0]]);
        assert_eq!(rebuilt, x[1..].to_vec());
    }

    #[test]
    fn undifference_extends_forecast() {
        // Series 1, 4, 9, 16, 25 has constant second difference 2.
        let x = [1.0, 4.0, 9.0, 16.0, 25.0];
        let seeds = seeds_at(&x, 2, x.len() - 1).unwrap();
        let future = undifference(&[2.0, 2.0, 2.0], &seeds);
        assert_abs_diff_eq!(future[0], 36.0, epsilon = 1e-12);
        assert_abs_diff_eq!(future[1], 49.0, epsilon = 1e-12);
        assert_abs_diff_eq!(future[2], 64.0, epsilon = 1e-12);
    }

    #[test]
    fn undifference_without_seeds_is_identity() {
        assert_eq!(undifference(&[1.0, 2.0], &[]), vec![1.0, 2.0]);
    }
}
