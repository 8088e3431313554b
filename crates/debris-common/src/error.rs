//! Error types for debris analytics.
//!
//! The analytics functions themselves never fail; degenerate numeric input
//! maps to documented fallback values. Errors only arise at the boundaries:
//! loading configuration and parsing caller-supplied input documents.
//!
//! Each error carries:
//! - A stable error code for machine parsing
//! - A category for grouping
//! - A recoverability hint and suggested action for automation
//! - A remediation hint for humans
//!
//! # Human-Facing Output
//!
//! ```text
//! ✗ Invalid Configuration
//!   Reason: invalid configuration: forecast.alpha must be in (0, 1], got 1.5
//!   Fix: Run 'debris-core check' to see which field is out of range.
//! ```
//!
//! # Agent-Facing Output
//!
//! ```json
//! {
//!   "code": 11,
//!   "category": "config",
//!   "message": "invalid configuration: forecast.alpha must be in (0, 1], got 1.5",
//!   "recoverable": true,
//!   "suggested_action": "run_check"
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Result type alias for debris analytics operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Which boundary an error came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Configuration file errors (weights, thresholds, schema).
    Config,
    /// Caller-supplied series, region maps or scalar arguments.
    Input,
    /// Reading files or stdin, and JSON encoding.
    Io,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCategory::Config => write!(f, "config"),
            ErrorCategory::Input => write!(f, "input"),
            ErrorCategory::Io => write!(f, "io"),
        }
    }
}

/// Next step a calling script should take.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestedAction {
    /// Transient; try again.
    Retry,
    /// Regenerate analytics.json from defaults.
    ResetConfig,
    /// Run the config check command.
    RunCheck,
    /// Correct the input document or arguments.
    FixInput,
    /// Needs a human.
    ManualIntervention,
}

impl std::fmt::Display for SuggestedAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SuggestedAction::Retry => write!(f, "retry"),
            SuggestedAction::ResetConfig => write!(f, "reset_config"),
            SuggestedAction::RunCheck => write!(f, "run_check"),
            SuggestedAction::FixInput => write!(f, "fix_input"),
            SuggestedAction::ManualIntervention => write!(f, "manual_intervention"),
        }
    }
}

/// Unified error type for debris analytics.
#[derive(Error, Debug)]
pub enum Error {
    // Configuration errors (10-19)
    #[error("configuration error: {0}")]
    Config(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("config schema version mismatch: expected {expected}, got {actual}")]
    ConfigVersion { expected: String, actual: String },

    // Input errors (20-29)
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("invalid series: {0}")]
    InvalidSeries(String),

    #[error("region not found: {region}")]
    UnknownRegion { region: String },

    // I/O errors (60-69)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Stable numeric code: 10-19 config, 20-29 input, 60-69 I/O.
    pub fn code(&self) -> u32 {
        match self {
            Error::Config(_) => 10,
            Error::InvalidConfig(_) => 11,
            Error::ConfigVersion { .. } => 12,
            Error::InvalidInput(_) => 20,
            Error::InvalidSeries(_) => 21,
            Error::UnknownRegion { .. } => 22,
            Error::Io(_) => 60,
            Error::Json(_) => 61,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::Config(_) | Error::InvalidConfig(_) | Error::ConfigVersion { .. } => {
                ErrorCategory::Config
            }
            Error::InvalidInput(_) | Error::InvalidSeries(_) | Error::UnknownRegion { .. } => {
                ErrorCategory::Input
            }
            Error::Io(_) | Error::Json(_) => ErrorCategory::Io,
        }
    }

    /// Whether retrying (possibly after fixing config) can succeed.
    pub fn is_recoverable(&self) -> bool {
        match self {
            Error::Config(_) => true,
            Error::InvalidConfig(_) => true,
            Error::ConfigVersion { .. } => true,

            // Same input will fail the same way; the caller must change it.
            Error::InvalidInput(_) => false,
            Error::InvalidSeries(_) => false,
            Error::UnknownRegion { .. } => false,

            Error::Io(_) => true,
            Error::Json(_) => false,
        }
    }

    pub fn suggested_action(&self) -> SuggestedAction {
        match self {
            Error::Config(_) => SuggestedAction::RunCheck,
            Error::InvalidConfig(_) => SuggestedAction::RunCheck,
            Error::ConfigVersion { .. } => SuggestedAction::ResetConfig,

            Error::InvalidInput(_) => SuggestedAction::FixInput,
            Error::InvalidSeries(_) => SuggestedAction::FixInput,
            Error::UnknownRegion { .. } => SuggestedAction::FixInput,

            Error::Io(_) => SuggestedAction::Retry,
            Error::Json(_) => SuggestedAction::ManualIntervention,
        }
    }

    /// One-sentence fix shown under the error.
    pub fn remediation(&self) -> &'static str {
        match self {
            Error::Config(_) => {
                "Run 'debris-core check' to validate configuration, or check syntax in analytics.json."
            }
            Error::InvalidConfig(_) => {
                "Run 'debris-core check' to see which field is out of range."
            }
            Error::ConfigVersion { .. } => {
                "Regenerate analytics.json from the built-in defaults with 'debris-core config show'."
            }

            Error::InvalidInput(_) => {
                "Check the command arguments and the shape of the input document."
            }
            Error::InvalidSeries(_) => {
                "Series must be a JSON array (or comma-separated list) of finite numbers."
            }
            Error::UnknownRegion { .. } => {
                "Region names are the keys of the 'regions' object in the input document."
            }

            Error::Io(_) => "Check that the file exists and is readable. Retry the operation.",
            Error::Json(_) => {
                "Invalid JSON in input. Check syntax with 'jq . <file>' before retrying."
            }
        }
    }

    pub fn headline(&self) -> &'static str {
        match self {
            Error::Config(_) => "Configuration Error",
            Error::InvalidConfig(_) => "Invalid Configuration",
            Error::ConfigVersion { .. } => "Configuration Version Mismatch",

            Error::InvalidInput(_) => "Invalid Input",
            Error::InvalidSeries(_) => "Invalid Series",
            Error::UnknownRegion { .. } => "Unknown Region",

            Error::Io(_) => "I/O Error",
            Error::Json(_) => "JSON Parse Error",
        }
    }
}

/// Error body printed to stderr in JSON mode.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructuredError {
    pub code: u32,

    pub category: ErrorCategory,

    /// `Display` text of the error.
    pub message: String,

    pub recoverable: bool,

    pub suggested_action: SuggestedAction,

    /// Additional structured context (e.g., region, expected version).
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub context: HashMap<String, serde_json::Value>,
}

impl From<&Error> for StructuredError {
    fn from(err: &Error) -> Self {
        let mut context = HashMap::new();

        match err {
            Error::UnknownRegion { region } => {
                context.insert("region".to_string(), serde_json::json!(region));
            }
            Error::ConfigVersion { expected, actual } => {
                context.insert("expected_version".to_string(), serde_json::json!(expected));
                context.insert("actual_version".to_string(), serde_json::json!(actual));
            }
            _ => {}
        }

        StructuredError {
            code: err.code(),
            category: err.category(),
            message: err.to_string(),
            recoverable: err.is_recoverable(),
            suggested_action: err.suggested_action(),
            context,
        }
    }
}

impl StructuredError {
    /// Attach an extra context field; values that fail to serialize are dropped.
    pub fn with_context(mut self, key: impl Into<String>, value: impl Serialize) -> Self {
        if let Ok(v) = serde_json::to_value(value) {
            self.context.insert(key.into(), v);
        }
        self
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| {
            format!(r#"{{"code":{},"error":"serialization_failed"}}"#, self.code)
        })
    }

    pub fn to_json_pretty(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| self.to_json())
    }
}

/// Three-line stderr rendering used by the markdown and summary formats.
pub fn format_error_human(err: &Error, use_color: bool) -> String {
    let (red, cyan, reset) = if use_color {
        ("\x1b[31m", "\x1b[36m", "\x1b[0m")
    } else {
        ("", "", "")
    };

    let headline = err.headline();
    let remediation = err.remediation();
    format!("{red}✗{reset} {headline}\n  Reason: {err}\n  {cyan}Fix:{reset} {remediation}")
}
