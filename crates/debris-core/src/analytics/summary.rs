//! Roll-ups for the monitoring dashboard.
//!
//! Both summaries are built only from the core operations: risk scoring,
//! anomaly detection, trend classification and hotspot ranking.

use debris_common::{RegionMap, Sensitivity, Trend};
use debris_config::AnalyticsConfig;
use debris_math::{max_value, mean, min_value, percent_change};
use serde::Serialize;

use super::anomaly::{alerts, detect_anomalies};
use super::clock::{format_timestamp, Clock, FixedClock};
use super::hotspots::identify_hotspots;
use super::risk::region_risk;
use super::trend::classify_trend;

/// Aggregate view of a risk series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskEvolutionSummary {
    pub points: usize,
    pub average_risk: f64,
    pub max_risk: f64,
    pub min_risk: f64,
    pub trend: Trend,
}

/// Summarize a chronological risk series.
///
/// An empty series summarizes to zeros with `InsufficientData`.
pub fn summarize_risk_evolution(
    config: &AnalyticsConfig,
    risk_series: &[f64],
) -> RiskEvolutionSummary {
    RiskEvolutionSummary {
        points: risk_series.len(),
        average_risk: mean(risk_series).unwrap_or(0.0),
        max_risk: max_value(risk_series).unwrap_or(0.0),
        min_risk: min_value(risk_series).unwrap_or(0.0),
        trend: classify_trend(&config.trend, risk_series),
    }
}

/// Headline numbers for dashboard initialization.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    /// Saturates at `u64::MAX`.
    pub total_tracked_objects: u64,
    pub active_anomalies: usize,
    pub critical_alerts: usize,
    pub high_risk_regions: usize,
    /// Mean region risk; 0 with no regions.
    pub global_collision_risk: f64,
    pub risk_trend: Trend,
    /// Percent change of the last risk value against the one before it.
    pub risk_change_recent: Option<f64>,
    /// Percent change of the last risk value against the value one trend
    /// window earlier.
    pub risk_change_window: Option<f64>,
    pub timestamp: String,
}

/// Build the dashboard overview from the current region map and the
/// global risk history.
pub fn summarize_dashboard(
    config: &AnalyticsConfig,
    regions: &RegionMap,
    risk_series: &[f64],
    sensitivity: Sensitivity,
    hotspot_threshold: f64,
    clock: &dyn Clock,
) -> DashboardSummary {
    // One clock read shared by the hotspot pass and the summary itself.
    let frozen = FixedClock(clock.now());

    let anomalies = detect_anomalies(&config.anomaly, risk_series, sensitivity);
    let critical = alerts(&config.anomaly, &anomalies);
    let hotspots = identify_hotspots(&config.risk, regions, hotspot_threshold, &frozen);

    let region_scores: Vec<f64> = regions
        .values()
        .map(|r| region_risk(&config.risk, r))
        .collect();

    DashboardSummary {
        total_tracked_objects: regions
            .values()
            .fold(0u64, |acc, r| acc.saturating_add(r.object_count)),
        active_anomalies: anomalies.len(),
        critical_alerts: critical.len(),
        high_risk_regions: hotspots.len(),
        global_collision_risk: mean(&region_scores).unwrap_or(0.0),
        risk_trend: classify_trend(&config.trend, risk_series),
        risk_change_recent: change_over(risk_series, 1),
        risk_change_window: change_over(risk_series, config.trend.window),
        timestamp: format_timestamp(frozen.0),
    }
}

/// Percent change between the last value and the one `steps` before it.
fn change_over(series: &[f64], steps: usize) -> Option<f64> {
    let last = *series.last()?;
    let base_index = series.len().checked_sub(steps + 1)?;
    percent_change(series[base_index], last)
}
