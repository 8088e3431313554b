//! Debris analytics configuration loading and validation.
//!
//! This crate provides:
//! - Typed Rust structs for analytics.json (weights, thresholds, windows)
//! - Config resolution (CLI → env → XDG → system → defaults)
//! - Semantic validation
//! - Config snapshots for provenance in command output

pub mod analytics;
pub mod resolve;
pub mod snapshot;
pub mod validate;

pub use analytics::{
    AnalyticsConfig, AnomalyThresholds, FactorWeights, ForecastSettings, HotspotSettings,
    RiskWeights, TrendSettings,
};
pub use resolve::{resolve_config, ConfigPaths, ConfigSource};
pub use snapshot::ConfigSnapshot;
pub use validate::{validate_config, ValidationError, ValidationResult};

/// Schema version for configuration files.
pub const CONFIG_SCHEMA_VERSION: &str = "1.0.0";
