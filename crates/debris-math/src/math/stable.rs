//! Guarded scalar primitives.
//!
//! Every helper here turns a degenerate floating-point path (division by
//! zero, NaN, infinities) into an explicit, documented fallback instead of
//! letting non-finite values leak into scores.

/// Clamp `x` into `[0, 1]`.
///
/// NaN maps to 0.0; `+inf` maps to 1.0 and `-inf` to 0.0.
pub fn clamp_unit(x: f64) -> f64 {
    if x.is_nan() {
        return 0.0;
    }
    x.clamp(0.0, 1.0)
}

/// `num / den`, or `None` when the denominator is zero or the quotient is not finite.
pub fn safe_ratio(num: f64, den: f64) -> Option<f64> {
    if den == 0.0 || den.is_nan() {
        return None;
    }
    let q = num / den;
    if q.is_finite() {
        Some(q)
    } else {
        None
    }
}

/// Normalize non-negative weights so they sum to one.
///
/// Returns all zeros when the total is zero or not finite.
pub fn normalize_weights(weights: &[f64]) -> Vec<f64> {
    let total: f64 = weights.iter().sum();
    if !(total.is_finite() && total > 0.0) {
        return vec![0.0; weights.len()];
    }
    weights.iter().map(|w| w / total).collect()
}

/// Replace NaN and negative values with 0.0.
pub fn non_negative(x: f64) -> f64 {
    if x.is_nan() || x < 0.0 {
        0.0
    } else {
        x
    }
}

/// Percentage change from `base` to `value`; `None` when `base` is zero.
pub fn percent_change(base: f64, value: f64) -> Option<f64> {
    safe_ratio(value - base, base).map(|r| r * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
        if a.is_nan() || b.is_nan() {
            return false;
        }
        (a - b).abs() <= tol
    }

    #[test]
    fn clamp_unit_bounds() {
        assert_eq!(clamp_unit(-0.5), 0.0);
        assert_eq!(clamp_unit(0.25), 0.25);
        assert_eq!(clamp_unit(7.0), 1.0);
    }

    #[test]
    fn clamp_unit_non_finite() {
        assert_eq!(clamp_unit(f64::NAN), 0.0);
        assert_eq!(clamp_unit(f64::INFINITY), 1.0);
        assert_eq!(clamp_unit(f64::NEG_INFINITY), 0.0);
    }

    #[test]
    fn safe_ratio_zero_denominator() {
        assert_eq!(safe_ratio(1.0, 0.0), None);
        assert_eq!(safe_ratio(0.0, 0.0), None);
        assert_eq!(safe_ratio(1.0, f64::NAN), None);
    }

    #[test]
    fn safe_ratio_basic() {
        assert!(approx_eq(safe_ratio(3.0, 4.0).unwrap(), 0.75, 1e-15));
    }

    #[test]
    fn normalize_weights_sums_to_one() {
        let out = normalize_weights(&[1.0, 3.0]);
        assert!(approx_eq(out[0], 0.25, 1e-15));
        assert!(approx_eq(out[1], 0.75, 1e-15));
    }

    #[test]
    fn normalize_weights_zero_total() {
        assert_eq!(normalize_weights(&[0.0, 0.0, 0.0]), vec![0.0; 3]);
        assert!(normalize_weights(&[]).is_empty());
    }

    #[test]
    fn non_negative_floors() {
        assert_eq!(non_negative(-2.0), 0.0);
        assert_eq!(non_negative(f64::NAN), 0.0);
        assert_eq!(non_negative(2.5), 2.5);
    }

    #[test]
    fn percent_change_basic() {
        assert!(approx_eq(percent_change(1.0, 10.0).unwrap(), 900.0, 1e-12));
        assert!(approx_eq(percent_change(10.0, 9.0).unwrap(), -10.0, 1e-12));
        assert_eq!(percent_change(0.0, 5.0), None);
    }
}
