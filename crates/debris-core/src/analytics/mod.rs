//! Deterministic debris analytics.
//!
//! Every operation is a pure function of its arguments and one section of
//! [`AnalyticsConfig`]. [`AnalyticsEngine`] bundles a configuration and a
//! [`Clock`] so callers don't have to thread them through each call.
//!
//! Nothing here fails: degenerate numeric input (zero spread, empty
//! windows, non-positive density, zero weight totals) maps to documented
//! fallback values.

pub mod altitude;
pub mod anomaly;
pub mod clock;
pub mod compare;
pub mod explain;
pub mod forecast;
pub mod hotspots;
pub mod risk;
pub mod summary;
pub mod trend;

pub use altitude::{altitude_from_mean_motion, filter_by_altitude, AltitudeBand, CatalogObject};
pub use anomaly::{alerts, classify_anomalies, detect_anomalies, ClassifiedAnomaly};
pub use clock::{format_timestamp, Clock, FixedClock, SystemClock};
pub use compare::{compare_regions, RegionComparison};
pub use explain::{explain_risk_factors, ranked_factors};
pub use forecast::forecast;
pub use hotspots::identify_hotspots;
pub use risk::{risk_components, risk_score, RiskComponents};
pub use summary::{
    summarize_dashboard, summarize_risk_evolution, DashboardSummary, RiskEvolutionSummary,
};
pub use trend::{analyze_trend, classify_trend, TrendReport};

use debris_common::{
    Anomaly, FactorMetrics, Hotspot, Measurement, RegionMap, RegionMetrics, RiskFactor,
    Sensitivity, Trend,
};
use debris_config::AnalyticsConfig;

/// Configured facade over the analytics functions.
#[derive(Debug, Clone)]
pub struct AnalyticsEngine<C: Clock = SystemClock> {
    config: AnalyticsConfig,
    clock: C,
}

impl AnalyticsEngine<SystemClock> {
    pub fn new(config: AnalyticsConfig) -> Self {
        Self::with_clock(config, SystemClock)
    }
}

impl Default for AnalyticsEngine<SystemClock> {
    fn default() -> Self {
        Self::new(AnalyticsConfig::default())
    }
}

impl<C: Clock> AnalyticsEngine<C> {
    pub fn with_clock(config: AnalyticsConfig, clock: C) -> Self {
        Self { config, clock }
    }

    pub fn config(&self) -> &AnalyticsConfig {
        &self.config
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn risk_score(&self, density: f64, object_count: u64, clustering_index: f64) -> f64 {
        risk_score(&self.config.risk, density, object_count, clustering_index)
    }

    pub fn measurement_risk(&self, measurement: &Measurement) -> f64 {
        risk::measurement_risk(&self.config.risk, measurement)
    }

    pub fn detect_anomalies(&self, series: &[f64], sensitivity: Sensitivity) -> Vec<Anomaly> {
        detect_anomalies(&self.config.anomaly, series, sensitivity)
    }

    pub fn classify_anomalies(&self, anomalies: &[Anomaly]) -> Vec<ClassifiedAnomaly> {
        classify_anomalies(&self.config.anomaly, anomalies)
    }

    pub fn alerts(&self, anomalies: &[Anomaly]) -> Vec<Anomaly> {
        alerts(&self.config.anomaly, anomalies)
    }

    /// Forecast with the configured smoothing factor unless one is given.
    pub fn forecast(&self, series: &[f64], periods: usize, alpha: Option<f64>) -> Vec<f64> {
        forecast(
            series,
            periods,
            alpha.unwrap_or(self.config.forecast.alpha),
        )
    }

    pub fn classify_trend(&self, series: &[f64]) -> Trend {
        classify_trend(&self.config.trend, series)
    }

    pub fn analyze_trend(&self, series: &[f64]) -> TrendReport {
        analyze_trend(&self.config.trend, series)
    }

    pub fn explain_risk_factors(&self, metrics: &FactorMetrics) -> Vec<RiskFactor> {
        explain_risk_factors(&self.config.factors, metrics)
    }

    /// Hotspots above `threshold`, or above the configured threshold.
    pub fn identify_hotspots(&self, regions: &RegionMap, threshold: Option<f64>) -> Vec<Hotspot> {
        identify_hotspots(
            &self.config.risk,
            regions,
            threshold.unwrap_or(self.config.hotspots.threshold),
            &self.clock,
        )
    }

    pub fn summarize_risk_evolution(&self, risk_series: &[f64]) -> RiskEvolutionSummary {
        summarize_risk_evolution(&self.config, risk_series)
    }

    pub fn summarize_dashboard(
        &self,
        regions: &RegionMap,
        risk_series: &[f64],
        sensitivity: Sensitivity,
    ) -> DashboardSummary {
        summarize_dashboard(
            &self.config,
            regions,
            risk_series,
            sensitivity,
            self.config.hotspots.threshold,
            &self.clock,
        )
    }

    pub fn compare_regions(
        &self,
        label_a: &str,
        a: &RegionMetrics,
        label_b: &str,
        b: &RegionMetrics,
    ) -> RegionComparison {
        compare_regions(&self.config.risk, label_a, a, label_b, b)
    }
}
