//! Single-anchor exponential smoothing.
//!
//! Every step blends the previous forecast with the last observed value:
//! `next = α·current + (1 − α)·last`, starting from `current = last`. The
//! anchor never moves, so the projection stays at (or converges to) the
//! last observation. This is not the recursive Holt/Brown form.

/// Project `periods` values past the end of `series`.
///
/// An empty series yields an empty forecast regardless of `periods`.
/// `alpha` is expected in `(0, 1]`; configuration validation enforces it.
pub fn forecast(series: &[f64], periods: usize, alpha: f64) -> Vec<f64> {
    let Some(&last) = series.last() else {
        return Vec::new();
    };

    let mut current = last;
    (0..periods)
        .map(|_| {
            let next = alpha * current + (1.0 - alpha) * last;
            current = next;
            next
        })
        .collect()
}
