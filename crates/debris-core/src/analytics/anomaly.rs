//! Z-score anomaly detection over a density or risk series.
//!
//! Mean and population standard deviation are computed once over the
//! whole series. Points from index 1 onward whose z-score exceeds the
//! sensitivity threshold are flagged; index 0 is never evaluated.

use debris_common::{Anomaly, Sensitivity, Severity};
use debris_config::AnomalyThresholds;
use debris_math::moments;
use serde::Serialize;
use tracing::debug;

/// An anomaly with its severity bucket.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ClassifiedAnomaly {
    #[serde(flatten)]
    pub anomaly: Anomaly,
    pub severity: Severity,
}

/// Flag statistically unusual points in `series`.
///
/// Returns an empty vector for series shorter than two points and for
/// series whose standard deviation is zero or not finite. Output is in
/// ascending index order.
pub fn detect_anomalies(
    thresholds: &AnomalyThresholds,
    series: &[f64],
    sensitivity: Sensitivity,
) -> Vec<Anomaly> {
    if series.len() < 2 {
        return Vec::new();
    }
    let Some(m) = moments(series) else {
        return Vec::new();
    };
    if m.std_dev == 0.0 || !m.std_dev.is_finite() {
        debug!(
            points = series.len(),
            std_dev = m.std_dev,
            "degenerate spread, no anomalies"
        );
        return Vec::new();
    }

    let threshold = thresholds.threshold(sensitivity);
    series
        .iter()
        .enumerate()
        .skip(1)
        .filter_map(|(index, &value)| {
            let z_score = (value - m.mean).abs() / m.std_dev;
            if z_score > threshold {
                Some(Anomaly {
                    index,
                    value,
                    z_score,
                    anomaly_score: (z_score / (threshold * 2.0)).min(1.0),
                })
            } else {
                None
            }
        })
        .collect()
}

/// Attach a severity to each anomaly.
pub fn classify_anomalies(
    thresholds: &AnomalyThresholds,
    anomalies: &[Anomaly],
) -> Vec<ClassifiedAnomaly> {
    anomalies
        .iter()
        .map(|&anomaly| ClassifiedAnomaly {
            anomaly,
            severity: thresholds.severity(anomaly.anomaly_score),
        })
        .collect()
}

/// Anomalies severe enough to raise an alert.
pub fn alerts(thresholds: &AnomalyThresholds, anomalies: &[Anomaly]) -> Vec<Anomaly> {
    anomalies
        .iter()
        .filter(|a| thresholds.severity(a.anomaly_score) == Severity::High)
        .copied()
        .collect()
}
