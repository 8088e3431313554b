//! Summary statistics over chronological series.
//!
//! Windows follow negative-index slice semantics: `tail(series, 7)` is the
//! last seven points and `window_before_tail(series, 7, 7)` is the seven
//! points before those, truncated at the start of the series.

use serde::{Deserialize, Serialize};

/// Population moments of a series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesMoments {
    pub mean: f64,
    /// Population standard deviation (divides by n).
    pub std_dev: f64,
}

/// Arithmetic mean, or `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Population variance, or `None` for an empty slice.
pub fn population_variance(values: &[f64]) -> Option<f64> {
    let m = mean(values)?;
    let ss: f64 = values.iter().map(|v| (v - m).powi(2)).sum();
    Some(ss / values.len() as f64)
}

/// Population standard deviation, or `None` for an empty slice.
pub fn population_std_dev(values: &[f64]) -> Option<f64> {
    population_variance(values).map(f64::sqrt)
}

/// Mean and population standard deviation together.
pub fn moments(values: &[f64]) -> Option<SeriesMoments> {
    let mean = mean(values)?;
    let std_dev = population_std_dev(values)?;
    Some(SeriesMoments { mean, std_dev })
}

/// Largest value (NaN entries are skipped); `None` for an empty slice.
pub fn max_value(values: &[f64]) -> Option<f64> {
    values.iter().copied().reduce(f64::max)
}

/// Smallest value; `None` for an empty slice.
pub fn min_value(values: &[f64]) -> Option<f64> {
    values.iter().copied().reduce(f64::min)
}

/// The last `len` points (the whole series when shorter).
pub fn tail(values: &[f64], len: usize) -> &[f64] {
    let start = values.len().saturating_sub(len);
    &values[start..]
}

/// Up to `len` points ending `skip` points before the end of the series.
///
/// Empty when the series has `skip` points or fewer.
pub fn window_before_tail(values: &[f64], skip: usize, len: usize) -> &[f64] {
    let end = values.len().saturating_sub(skip);
    let start = end.saturating_sub(len);
    &values[start..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() <= tol
    }

    #[test]
    fn mean_empty_is_none() {
        assert_eq!(mean(&[]), None);
    }

    #[test]
    fn mean_basic() {
        assert!(approx_eq(mean(&[1.0, 2.0, 3.0, 4.0]).unwrap(), 2.5, 1e-15));
    }

    #[test]
    fn population_std_dev_known_value() {
        // Classic example: population sd of this set is exactly 2.
        let v = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert!(approx_eq(population_std_dev(&v).unwrap(), 2.0, 1e-12));
    }

    #[test]
    fn constant_series_has_zero_spread() {
        let m = moments(&[10.0; 5]).unwrap();
        assert_eq!(m.mean, 10.0);
        assert_eq!(m.std_dev, 0.0);
    }

    #[test]
    fn max_min() {
        let v = [0.3, -1.0, 2.5];
        assert_eq!(max_value(&v), Some(2.5));
        assert_eq!(min_value(&v), Some(-1.0));
        assert_eq!(max_value(&[]), None);
    }

    #[test]
    fn tail_shorter_than_window() {
        let v = [1.0, 2.0, 3.0];
        assert_eq!(tail(&v, 7), &v[..]);
        assert_eq!(tail(&v, 2), &[2.0, 3.0]);
    }

    #[test]
    fn window_before_tail_matches_negative_slice() {
        let v: Vec<f64> = (0..20).map(f64::from).collect();
        // slice(-14, -7) of 0..20 is 6..13
        let w = window_before_tail(&v, 7, 7);
        assert_eq!(w, &v[6..13]);
    }

    #[test]
    fn window_before_tail_truncates_at_start() {
        let v: Vec<f64> = (0..10).map(f64::from).collect();
        assert_eq!(window_before_tail(&v, 7, 7), &[0.0, 1.0, 2.0]);
    }

    #[test]
    fn window_before_tail_empty_for_short_series() {
        let v = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0];
        assert!(window_before_tail(&v, 7, 7).is_empty());
        assert!(window_before_tail(&v[..2], 7, 7).is_empty());
    }
}
