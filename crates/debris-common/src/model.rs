//! Analytics data model.
//!
//! Every type here is a transient value: produced fresh by each analytics
//! call, never cached or mutated across calls. Field names serialize in
//! snake_case; the camelCase spellings used by the ingestion layer are
//! accepted as aliases on input.

use clap::ValueEnum;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A snapshot of one region at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Measurement {
    /// Spatial debris density (objects per reference volume); expected > 0.
    pub density: f64,
    #[serde(alias = "objectCount")]
    pub object_count: u64,
    /// Orbital grouping in [0, 1].
    #[serde(alias = "clusteringIndex")]
    pub clustering_index: f64,
}

/// Per-region record consumed by hotspot ranking, comparison and summaries.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RegionMetrics {
    pub density: f64,
    #[serde(alias = "objectCount")]
    pub object_count: u64,
    #[serde(alias = "clustering_index", alias = "clusteringIndex")]
    pub clustering: f64,
    /// Fractional growth of the catalogued population per period.
    #[serde(
        default,
        alias = "growthRate",
        skip_serializing_if = "Option::is_none"
    )]
    pub growth_rate: Option<f64>,
}

impl RegionMetrics {
    pub fn new(density: f64, object_count: u64, clustering: f64) -> Self {
        Self {
            density,
            object_count,
            clustering,
            growth_rate: None,
        }
    }

    pub fn with_growth_rate(mut self, growth_rate: f64) -> Self {
        self.growth_rate = Some(growth_rate);
        self
    }

    pub fn measurement(&self) -> Measurement {
        Measurement {
            density: self.density,
            object_count: self.object_count,
            clustering_index: self.clustering,
        }
    }
}

/// Region name → metrics. Keys are unique; output ordering never depends on
/// map order.
pub type RegionMap = BTreeMap<String, RegionMetrics>;

/// Anomaly detection sensitivity. Higher sensitivity flags more points.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, ValueEnum, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Sensitivity {
    Low,
    #[default]
    Medium,
    High,
}

impl std::str::FromStr for Sensitivity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(Sensitivity::Low),
            "medium" => Ok(Sensitivity::Medium),
            "high" => Ok(Sensitivity::High),
            _ => Err(format!("unknown sensitivity: {}", s)),
        }
    }
}

impl std::fmt::Display for Sensitivity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Sensitivity::Low => write!(f, "low"),
            Sensitivity::Medium => write!(f, "medium"),
            Sensitivity::High => write!(f, "high"),
        }
    }
}

/// A statistically unusual point in a series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Anomaly {
    pub index: usize,
    pub value: f64,
    /// Absolute deviation from the mean in standard deviations; always >= 0.
    pub z_score: f64,
    /// `min(1, z / (2 * threshold))`.
    pub anomaly_score: f64,
}

/// Coarse anomaly severity used for alerting.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Low => write!(f, "low"),
            Severity::Medium => write!(f, "medium"),
            Severity::High => write!(f, "high"),
        }
    }
}

/// Direction label for a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    InsufficientData,
    Increasing,
    Decreasing,
    Stable,
}

impl Trend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Trend::InsufficientData => "insufficient_data",
            Trend::Increasing => "increasing",
            Trend::Decreasing => "decreasing",
            Trend::Stable => "stable",
        }
    }
}

impl std::fmt::Display for Trend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inputs to risk-factor explanation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FactorMetrics {
    #[serde(alias = "growthRate")]
    pub growth_rate: f64,
    #[serde(alias = "objectCount")]
    pub object_count: u64,
    #[serde(alias = "clusteringIndex")]
    pub clustering_index: f64,
    #[serde(default, alias = "inclinationFactor")]
    pub inclination_factor: Option<f64>,
}

/// One weighted contributor to a risk estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RiskFactor {
    pub name: String,
    /// Raw weight before flooring; negative for a shrinking population.
    pub weight: f64,
    /// Share of the total weight; contributions of one set sum to 1.
    pub contribution: f64,
}

/// A region whose risk exceeded the ranking threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Hotspot {
    pub region: String,
    pub risk_score: f64,
    pub density: f64,
    /// RFC 3339 UTC evaluation time.
    pub timestamp: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn region_metrics_accepts_camel_case() {
        let json = r#"{"density": 5000, "objectCount": 40000, "clustering": 0.9, "growthRate": 0.02}"#;
        let m: RegionMetrics = serde_json::from_str(json).unwrap();
        assert_eq!(m.object_count, 40000);
        assert_eq!(m.growth_rate, Some(0.02));
    }

    #[test]
    fn region_metrics_accepts_clustering_index_alias() {
        let json = r#"{"density": 1, "object_count": 1, "clustering_index": 0.5}"#;
        let m: RegionMetrics = serde_json::from_str(json).unwrap();
        assert_eq!(m.clustering, 0.5);
        assert_eq!(m.growth_rate, None);
    }

    #[test]
    fn region_metrics_omits_missing_growth() {
        let json = serde_json::to_string(&RegionMetrics::new(1.0, 2, 0.1)).unwrap();
        assert!(!json.contains("growth_rate"));
    }

    #[test]
    fn region_map_parses_object() {
        let json = r#"{"LEO-750": {"density": 5000, "objectCount": 40000, "clustering": 0.9}}"#;
        let map: RegionMap = serde_json::from_str(json).unwrap();
        assert_eq!(map["LEO-750"].measurement().object_count, 40000);
    }

    #[test]
    fn sensitivity_parse_and_display() {
        assert_eq!("HIGH".parse::<Sensitivity>().unwrap(), Sensitivity::High);
        assert_eq!("low".parse::<Sensitivity>().unwrap(), Sensitivity::Low);
        assert!("extreme".parse::<Sensitivity>().is_err());
        assert_eq!(Sensitivity::default(), Sensitivity::Medium);
        assert_eq!(Sensitivity::Medium.to_string(), "medium");
    }

    #[test]
    fn trend_serialization() {
        assert_eq!(
            serde_json::to_string(&Trend::InsufficientData).unwrap(),
            "\"insufficient_data\""
        );
        assert_eq!(Trend::Increasing.to_string(), "increasing");
    }

    #[test]
    fn severity_ordering() {
        assert!(Severity::High > Severity::Medium);
        assert!(Severity::Medium > Severity::Low);
    }

    #[test]
    fn factor_metrics_inclination_optional() {
        let json = r#"{"growthRate": 0.05, "objectCount": 25000, "clusteringIndex": 0.4}"#;
        let m: FactorMetrics = serde_json::from_str(json).unwrap();
        assert_eq!(m.inclination_factor, None);
    }
}
