//! Debris analytics common types and errors.
//!
//! This crate provides foundational types shared across the workspace:
//! - The analytics data model (measurements, anomalies, hotspots, factors)
//! - Common error types with stable codes
//! - Output formats (json, md, summary)
//! - Schema versioning

pub mod error;
pub mod model;
pub mod output;
pub mod schema;

pub use error::{Error, Result};
pub use model::{
    Anomaly, FactorMetrics, Hotspot, Measurement, RegionMap, RegionMetrics, RiskFactor,
    Sensitivity, Severity, Trend,
};
pub use output::OutputFormat;
pub use schema::SCHEMA_VERSION;
