//! Analytics configuration types.
//!
//! Every constant the scoring formulas use lives here with its default, so
//! the policy is explicit and a deployment can tune it through
//! analytics.json without touching code. Sections missing from the file
//! fall back to their defaults.

use debris_common::{Sensitivity, Severity};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Complete analytics configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AnalyticsConfig {
    pub schema_version: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub risk: RiskWeights,
    #[serde(default)]
    pub anomaly: AnomalyThresholds,
    #[serde(default)]
    pub forecast: ForecastSettings,
    #[serde(default)]
    pub trend: TrendSettings,
    #[serde(default)]
    pub factors: FactorWeights,
    #[serde(default)]
    pub hotspots: HotspotSettings,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            schema_version: crate::CONFIG_SCHEMA_VERSION.to_string(),
            description: None,
            risk: RiskWeights::default(),
            anomaly: AnomalyThresholds::default(),
            forecast: ForecastSettings::default(),
            trend: TrendSettings::default(),
            factors: FactorWeights::default(),
            hotspots: HotspotSettings::default(),
        }
    }
}

impl AnalyticsConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, crate::validate::ValidationError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            crate::validate::ValidationError::IoError(format!(
                "Failed to read {}: {}",
                path.display(),
                e
            ))
        })?;

        Self::parse_json(&content)
    }

    /// Parse configuration from a JSON string.
    pub fn parse_json(json: &str) -> Result<Self, crate::validate::ValidationError> {
        serde_json::from_str(json).map_err(|e| {
            crate::validate::ValidationError::ParseError(format!("Invalid JSON: {}", e))
        })
    }
}

/// Collision risk weights: `w_d·ln(density/d_ref) + w_c·(count/c_ref) + w_k·clustering`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct RiskWeights {
    pub density_weight: f64,
    pub count_weight: f64,
    pub cluster_weight: f64,
    /// Density at which the log-density term is zero.
    pub density_reference: f64,
    /// Object count that contributes the full count weight.
    pub count_reference: f64,
}

impl Default for RiskWeights {
    fn default() -> Self {
        Self {
            density_weight: 0.3,
            count_weight: 0.4,
            cluster_weight: 0.3,
            density_reference: 1000.0,
            count_reference: 50000.0,
        }
    }
}

/// Z-score thresholds per sensitivity plus alert severity cut-offs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AnomalyThresholds {
    pub high: f64,
    pub medium: f64,
    pub low: f64,
    /// Anomaly scores strictly above this are `Severity::High` (alerts).
    pub high_severity_score: f64,
    /// Anomaly scores at or above this are at least `Severity::Medium`.
    pub medium_severity_score: f64,
}

impl Default for AnomalyThresholds {
    fn default() -> Self {
        Self {
            high: 1.5,
            medium: 2.0,
            low: 3.0,
            high_severity_score: 0.8,
            medium_severity_score: 0.5,
        }
    }
}

impl AnomalyThresholds {
    /// Z-score threshold for a sensitivity level.
    pub fn threshold(&self, sensitivity: Sensitivity) -> f64 {
        match sensitivity {
            Sensitivity::High => self.high,
            Sensitivity::Medium => self.medium,
            Sensitivity::Low => self.low,
        }
    }

    /// Severity bucket for an anomaly score.
    pub fn severity(&self, anomaly_score: f64) -> Severity {
        if anomaly_score > self.high_severity_score {
            Severity::High
        } else if anomaly_score >= self.medium_severity_score {
            Severity::Medium
        } else {
            Severity::Low
        }
    }
}

/// Exponential smoothing settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ForecastSettings {
    /// Smoothing factor in (0, 1].
    pub alpha: f64,
    /// Horizon used when the caller does not pass one.
    pub default_periods: usize,
}

impl Default for ForecastSettings {
    fn default() -> Self {
        Self {
            alpha: 0.3,
            default_periods: 30,
        }
    }
}

/// Recent-vs-older window comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct TrendSettings {
    /// Points per window.
    pub window: usize,
    /// Minimum series length for a trend label.
    pub min_points: usize,
    /// Absolute percentage change above which a trend is not `stable`.
    pub change_threshold_percent: f64,
}

impl Default for TrendSettings {
    fn default() -> Self {
        Self {
            window: 7,
            min_points: 2,
            change_threshold_percent: 10.0,
        }
    }
}

/// Raw weights for risk-factor explanation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct FactorWeights {
    /// Growth rate that yields a Debris Growth weight of 1.
    pub growth_reference: f64,
    /// Object count that yields an Object Count weight of 1.
    pub count_reference: f64,
    pub orbital_decay_weight: f64,
    /// Inclination Impact weight when the caller supplies none.
    pub default_inclination_weight: f64,
}

impl Default for FactorWeights {
    fn default() -> Self {
        Self {
            growth_reference: 0.1,
            count_reference: 50000.0,
            orbital_decay_weight: 0.05,
            default_inclination_weight: 0.2,
        }
    }
}

/// Hotspot ranking settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct HotspotSettings {
    /// Regions scoring strictly above this are hotspots.
    pub threshold: f64,
}

impl Default for HotspotSettings {
    fn default() -> Self {
        Self { threshold: 0.7 }
    }
}
