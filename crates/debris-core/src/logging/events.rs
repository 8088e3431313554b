//! Structured event vocabulary.
//!
//! Every event carries the run correlation IDs and the analytics stage that
//! produced it, so a JSONL stream from many invocations can be regrouped.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl From<tracing::Level> for Level {
    fn from(level: tracing::Level) -> Self {
        match level {
            tracing::Level::TRACE => Level::Trace,
            tracing::Level::DEBUG => Level::Debug,
            tracing::Level::INFO => Level::Info,
            tracing::Level::WARN => Level::Warn,
            tracing::Level::ERROR => Level::Error,
        }
    }
}

/// Analytics pipeline stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Startup, logging and argument handling.
    Init,
    /// Configuration and input document loading.
    Load,
    /// Risk scoring.
    Score,
    /// Anomaly detection.
    Detect,
    Forecast,
    /// Risk-factor explanation.
    Explain,
    /// Trend classification and hotspot ranking.
    Rank,
    /// Dashboard and risk-evolution roll-ups.
    Summarize,
    /// Rendering the command payload.
    Report,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Init => "init",
            Stage::Load => "load",
            Stage::Score => "score",
            Stage::Detect => "detect",
            Stage::Forecast => "forecast",
            Stage::Explain => "explain",
            Stage::Rank => "rank",
            Stage::Summarize => "summarize",
            Stage::Report => "report",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stable event names.
pub mod event_names {
    pub const RUN_STARTED: &str = "run.started";
    pub const RUN_FINISHED: &str = "run.finished";

    pub const CONFIG_LOADED: &str = "config.loaded";
    pub const CONFIG_DEFAULT_USED: &str = "config.default_used";
    pub const CONFIG_ERROR: &str = "config.error";

    pub const INPUT_LOADED: &str = "input.loaded";
    pub const INPUT_REJECTED: &str = "input.rejected";

    pub const RISK_SCORED: &str = "risk.scored";
    pub const ANOMALIES_DETECTED: &str = "anomalies.detected";
    pub const FORECAST_PRODUCED: &str = "forecast.produced";
    pub const TREND_CLASSIFIED: &str = "trend.classified";
    pub const FACTORS_EXPLAINED: &str = "factors.explained";
    pub const HOTSPOTS_RANKED: &str = "hotspots.ranked";
    pub const REGIONS_COMPARED: &str = "regions.compared";
    pub const SUMMARY_BUILT: &str = "summary.built";
    pub const ALTITUDE_COMPUTED: &str = "altitude.computed";

    pub const INTERNAL_ERROR: &str = "internal_error";
}

/// Correlation IDs shared by every event of one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogContext {
    pub run_id: String,
    pub host_id: String,
}

impl LogContext {
    pub fn new(run_id: impl Into<String>, host_id: impl Into<String>) -> Self {
        LogContext {
            run_id: run_id.into(),
            host_id: host_id.into(),
        }
    }

    /// Fresh run ID on this host.
    pub fn for_current_run() -> Self {
        LogContext::new(super::generate_run_id(), super::get_host_id())
    }
}
