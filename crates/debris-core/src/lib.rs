//! Debris Analytics Core Library
//!
//! This library turns orbital-debris measurements and historical series
//! into risk scores, anomaly flags, forecasts, trend labels, factor
//! explanations and ranked hotspots:
//! - Pure analytics functions and the `AnalyticsEngine` facade
//! - Configuration loading with provenance
//! - Input document parsing for the CLI
//! - Exit codes and structured logging
//!
//! The binary entry point is in `main.rs`.

pub mod analytics;
pub mod config;
pub mod exit_codes;
pub mod input;
pub mod logging;

pub use analytics::AnalyticsEngine;
