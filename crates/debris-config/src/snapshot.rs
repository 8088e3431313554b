//! Configuration snapshots for provenance.
//!
//! A snapshot records which analytics.json produced a set of scores, so a
//! dashboard can tell whether two results were computed under the same
//! weights.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::analytics::AnalyticsConfig;
use crate::resolve::ConfigPaths;

/// A frozen snapshot of configuration state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigSnapshot {
    /// When this snapshot was taken.
    pub timestamp: DateTime<Utc>,

    /// Schema version of the configuration.
    pub schema_version: String,

    /// SHA-256 of the config file content (None when using defaults).
    #[serde(default)]
    pub config_hash: Option<String>,

    /// Path the config was loaded from.
    #[serde(default)]
    pub config_path: Option<String>,

    /// Source of the configuration.
    pub config_source: String,

    /// Key configuration values for quick reference.
    pub summary: ConfigSummary,
}

/// Summary of key configuration values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigSummary {
    /// Density / count / cluster weights.
    pub risk_weights: [f64; 3],
    /// High / medium / low z-score thresholds.
    pub anomaly_thresholds: [f64; 3],
    pub forecast_alpha: f64,
    pub trend_window: usize,
    pub hotspot_threshold: f64,
}

impl ConfigSnapshot {
    /// Create a new snapshot from loaded configuration.
    ///
    /// `raw_json` is the file content the config was parsed from, if any.
    pub fn new(config: &AnalyticsConfig, paths: &ConfigPaths, raw_json: Option<&str>) -> Self {
        ConfigSnapshot {
            timestamp: Utc::now(),
            schema_version: config.schema_version.clone(),
            config_hash: raw_json.map(hash_content),
            config_path: paths.analytics.as_ref().map(|p| p.display().to_string()),
            config_source: paths.analytics_source.to_string(),
            summary: ConfigSummary::from(config),
        }
    }

    /// Whether this snapshot used the built-in defaults.
    pub fn is_default(&self) -> bool {
        self.config_path.is_none()
    }
}

impl From<&AnalyticsConfig> for ConfigSummary {
    fn from(config: &AnalyticsConfig) -> Self {
        ConfigSummary {
            risk_weights: [
                config.risk.density_weight,
                config.risk.count_weight,
                config.risk.cluster_weight,
            ],
            anomaly_thresholds: [
                config.anomaly.high,
                config.anomaly.medium,
                config.anomaly.low,
            ],
            forecast_alpha: config.forecast.alpha,
            trend_window: config.trend.window,
            hotspot_threshold: config.hotspots.threshold,
        }
    }
}

/// Compute the hex SHA-256 of a string.
pub fn hash_content(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    hex::encode(hasher.finalize())
}
