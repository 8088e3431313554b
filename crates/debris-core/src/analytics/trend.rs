//! Trend classification by comparing the recent window to the one before it.

use debris_common::Trend;
use debris_config::TrendSettings;
use debris_math::{mean, percent_change, tail, window_before_tail};
use serde::Serialize;
use tracing::debug;

/// Classification plus the numbers behind it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrendReport {
    pub trend: Trend,
    pub recent_average: Option<f64>,
    pub older_average: Option<f64>,
    /// `None` when there is no older window or it averages to zero.
    pub change_percent: Option<f64>,
}

/// Label a series as increasing, decreasing or stable.
pub fn classify_trend(settings: &TrendSettings, series: &[f64]) -> Trend {
    analyze_trend(settings, series).trend
}

/// Compare the last `window` points against the `window` points before them.
///
/// With fewer than `min_points` values, or no point before the recent
/// window, the result is `InsufficientData`. A zero-mean older window is
/// `Stable`.
pub fn analyze_trend(settings: &TrendSettings, series: &[f64]) -> TrendReport {
    if series.len() < settings.min_points {
        return TrendReport {
            trend: Trend::InsufficientData,
            recent_average: None,
            older_average: None,
            change_percent: None,
        };
    }

    let recent_average = mean(tail(series, settings.window));
    let older_average = mean(window_before_tail(series, settings.window, settings.window));

    let change_percent = match (recent_average, older_average) {
        (Some(recent), Some(older)) => percent_change(older, recent),
        _ => None,
    };

    let trend = match (older_average, change_percent) {
        (None, _) => Trend::InsufficientData,
        (_, Some(pct)) if pct > settings.change_threshold_percent => Trend::Increasing,
        (_, Some(pct)) if pct < -settings.change_threshold_percent => Trend::Decreasing,
        (_, Some(_)) => Trend::Stable,
        (Some(older), None) => {
            debug!(
                points = series.len(),
                older_average = older,
                "zero baseline, trend is stable"
            );
            Trend::Stable
        }
    };

    TrendReport {
        trend,
        recent_average,
        older_average,
        change_percent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s() -> TrendSettings {
        TrendSettings::default()
    }

    #[test]
    fn two_points_is_insufficient() {
        assert_eq!(classify_trend(&s(), &[1.0, 2.0]), Trend::InsufficientData);
        assert_eq!(classify_trend(&s(), &[1.0]), Trend::InsufficientData);
        assert_eq!(classify_trend(&s(), &[]), Trend::InsufficientData);
    }

    #[test]
    fn step_up_is_increasing() {
        let series = [
            1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0, 10.0, 10.0, 10.0, 10.0, 10.0, 10.0, 10.0,
        ];
        let report = analyze_trend(&s(), &series);
        assert_eq!(report.trend, Trend::Increasing);
        assert_eq!(report.recent_average, Some(10.0));
        assert_eq!(report.older_average, Some(1.0));
        assert!((report.change_percent.unwrap() - 900.0).abs() < 1e-9);
    }

    #[test]
    fn step_down_is_decreasing() {
        let series = [
            10.0, 10.0, 10.0, 10.0, 10.0, 10.0, 10.0, 5.0, 5.0, 5.0, 5.0, 5.0, 5.0, 5.0,
        ];
        assert_eq!(classify_trend(&s(), &series), Trend::Decreasing);
    }

    #[test]
    fn small_change_is_stable() {
        let series = [
            100.0, 100.0, 100.0, 100.0, 100.0, 100.0, 100.0, 105.0, 105.0, 105.0, 105.0, 105.0,
            105.0, 105.0,
        ];
        assert_eq!(classify_trend(&s(), &series), Trend::Stable);
    }

    #[test]
    fn short_series_has_no_older_window() {
        // Seven points or fewer: everything is "recent" and there is no baseline.
        let report = analyze_trend(&s(), &[1.0, 5.0, 9.0, 30.0]);
        assert_eq!(report.trend, Trend::InsufficientData);
        assert_eq!(report.recent_average, Some(11.25));
        assert_eq!(report.older_average, None);
        assert_eq!(report.change_percent, None);
    }

    #[test]
    fn partial_older_window_is_used() {
        // Nine points: older window is the first two.
        let series = [2.0, 2.0, 4.0, 4.0, 4.0, 4.0, 4.0, 4.0, 4.0];
        let report = analyze_trend(&s(), &series);
        assert_eq!(report.older_average, Some(2.0));
        assert_eq!(report.trend, Trend::Increasing);
    }

    #[test]
    fn zero_older_mean_is_stable() {
        let series = [
            0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 3.0, 3.0, 3.0, 3.0, 3.0, 3.0, 3.0,
        ];
        let report = analyze_trend(&s(), &series);
        assert_eq!(report.trend, Trend::Stable);
        assert_eq!(report.older_average, Some(0.0));
        assert_eq!(report.change_percent, None);
    }

    #[test]
    fn points_older_than_two_windows_are_ignored() {
        let mut series = vec![1000.0; 10];
        series.extend([1.0; 7]);
        series.extend([1.05; 7]);
        assert_eq!(classify_trend(&s(), &series), Trend::Stable);
    }

    #[test]
    fn negative_baseline_uses_signed_ratio() {
        // (-5 - -10) / -10 = -50%
        let series = [
            -10.0, -10.0, -10.0, -10.0, -10.0, -10.0, -10.0, -5.0, -5.0, -5.0, -5.0, -5.0, -5.0,
            -5.0,
        ];
        assert_eq!(classify_trend(&s(), &series), Trend::Decreasing);
    }
}
