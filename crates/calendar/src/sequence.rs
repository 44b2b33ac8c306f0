//! Monthly sequence generation.

use crate::month::YearMonth;

/// Generates `n_months` consecutive months starting at `start`.
///
/// # Example
///
/// ```ignore
/// let start = YearMonth::new(2000, 11)?;
/// let months = month_sequence(start, 3);
/// // 2000-11, 2000-12, 2001-01
/// ```
pub fn month_sequence(start: YearMonth, n_months: usize) -> Vec<YearMonth> {
    let mut months = Vec::with_capacity(n_months);
    if n_months == 0 {
        return months;
    }
    months.push(start);
    let mut current = start;
    for _ in 1..n_months {
        current = current.next();
        months.push(current);
    }
    months
}

/// Returns `true` when every month follows its predecessor by exactly one step.
///
/// Empty and single-element slices are trivially monthly.
pub fn is_monthly_cadence(months: &[YearMonth]) -> bool {
    months.windows(2).all(|w| w[0].next() == w[1])
}
