//! Logging configuration.
//!
//! Sources, lowest to highest precedence:
//! - Built-in defaults (human format, `info`)
//! - `RUST_LOG` (coarse level only; full directives are honoured by the filter)
//! - `DEBRIS_LOG` and `DEBRIS_LOG_FORMAT`
//! - CLI flags (`-v`, `-q`)

use serde::{Deserialize, Serialize};

pub const ENV_LOG_LEVEL: &str = "DEBRIS_LOG";
pub const ENV_LOG_FORMAT: &str = "DEBRIS_LOG_FORMAT";
pub const ENV_RUST_LOG: &str = "RUST_LOG";

/// Crates whose events the default filter admits.
const LOG_TARGETS: [&str; 3] = ["debris_core", "debris_config", "debris_common"];

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Human,
    /// One JSON object per line.
    Jsonl,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "human" | "text" | "pretty" => Ok(LogFormat::Human),
            "jsonl" | "json" => Ok(LogFormat::Jsonl),
            other => Err(format!("unknown log format: {other}")),
        }
    }
}

impl std::fmt::Display for LogFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            LogFormat::Human => "human",
            LogFormat::Jsonl => "jsonl",
        })
    }
}

/// Minimum level that reaches the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
    Off,
}

impl LogLevel {
    /// Level implied by `-v`/`-q` counts; `None` leaves the configured level alone.
    pub fn from_verbosity(verbose: u8, quiet: bool) -> Option<LogLevel> {
        if quiet {
            return Some(LogLevel::Error);
        }
        match verbose {
            0 => None,
            1 => Some(LogLevel::Debug),
            _ => Some(LogLevel::Trace),
        }
    }
}

impl std::str::FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            "off" | "none" => Ok(LogLevel::Off),
            other => Err(format!("unknown log level: {other}")),
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
            LogLevel::Off => "off",
        })
    }
}

impl From<LogLevel> for tracing_subscriber::filter::LevelFilter {
    fn from(level: LogLevel) -> Self {
        use tracing_subscriber::filter::LevelFilter;
        match level {
            LogLevel::Trace => LevelFilter::TRACE,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Off => LevelFilter::OFF,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    pub format: LogFormat,
    pub level: LogLevel,
    /// Timestamps on human output.
    pub timestamps: bool,
    /// Raw `RUST_LOG` directives, used verbatim when no explicit level is set.
    pub rust_log: Option<String>,
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            format: LogFormat::Human,
            level: LogLevel::Info,
            timestamps: true,
            rust_log: None,
        }
    }
}

impl LogConfig {
    /// Build from the process environment plus CLI overrides.
    pub fn from_env(cli_level: Option<LogLevel>, cli_format: Option<LogFormat>) -> Self {
        Self::from_lookup(|key| std::env::var(key).ok(), cli_level, cli_format)
    }

    /// Build from an arbitrary variable lookup plus CLI overrides.
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
        cli_level: Option<LogLevel>,
        cli_format: Option<LogFormat>,
    ) -> Self {
        let mut config = LogConfig::default();

        match lookup(ENV_LOG_LEVEL).and_then(|v| v.parse::<LogLevel>().ok()) {
            Some(level) => config.level = level,
            None => config.rust_log = lookup(ENV_RUST_LOG).filter(|v| !v.trim().is_empty()),
        }

        if let Some(format) = lookup(ENV_LOG_FORMAT).and_then(|v| v.parse::<LogFormat>().ok()) {
            config.format = format;
        }

        if let Some(level) = cli_level {
            config.level = level;
            config.rust_log = None;
        }
        if let Some(format) = cli_format {
            config.format = format;
        }
        config
    }

    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self.rust_log = None;
        self
    }

    pub fn with_timestamps(mut self, enabled: bool) -> Self {
        self.timestamps = enabled;
        self
    }

    /// `EnvFilter` directive string for this configuration.
    pub fn filter_directive(&self) -> String {
        if let Some(directives) = &self.rust_log {
            return directives.clone();
        }
        LOG_TARGETS
            .iter()
            .map(|target| format!("{}={}", target, self.level))
            .collect::<Vec<_>>()
            .join(",")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_without_environment() {
        let config = LogConfig::from_lookup(lookup(&[]), None, None);
        assert_eq!(config, LogConfig::default());
        assert_eq!(
            config.filter_directive(),
            "debris_core=info,debris_config=info,debris_common=info"
        );
    }

    #[test]
    fn debris_log_beats_rust_log() {
        let config = LogConfig::from_lookup(
            lookup(&[(ENV_LOG_LEVEL, "debug"), (ENV_RUST_LOG, "trace")]),
            None,
            None,
        );
        assert_eq!(config.level, LogLevel::Debug);
        assert_eq!(config.rust_log, None);
    }

    #[test]
    fn rust_log_directives_pass_through() {
        let config =
            LogConfig::from_lookup(lookup(&[(ENV_RUST_LOG, "debris_core=trace")]), None, None);
        assert_eq!(config.filter_directive(), "debris_core=trace");
    }

    #[test]
    fn cli_overrides_environment() {
        let config = LogConfig::from_lookup(
            lookup(&[
                (ENV_LOG_LEVEL, "error"),
                (ENV_LOG_FORMAT, "human"),
                (ENV_RUST_LOG, "trace"),
            ]),
            Some(LogLevel::Trace),
            Some(LogFormat::Jsonl),
        );
        assert_eq!(config.level, LogLevel::Trace);
        assert_eq!(config.format, LogFormat::Jsonl);
    }

    #[test]
    fn unparseable_values_are_ignored() {
        let config = LogConfig::from_lookup(
            lookup(&[(ENV_LOG_LEVEL, "loud"), (ENV_LOG_FORMAT, "xml")]),
            None,
            None,
        );
        assert_eq!(config.level, LogLevel::Info);
        assert_eq!(config.format, LogFormat::Human);
    }

    #[test]
    fn verbosity_mapping() {
        assert_eq!(LogLevel::from_verbosity(0, false), None);
        assert_eq!(LogLevel::from_verbosity(1, false), Some(LogLevel::Debug));
        assert_eq!(LogLevel::from_verbosity(3, false), Some(LogLevel::Trace));
        assert_eq!(LogLevel::from_verbosity(2, true), Some(LogLevel::Error));
    }

    #[test]
    fn parse_and_display() {
        assert_eq!("JSON".parse::<LogFormat>().unwrap(), LogFormat::Jsonl);
        assert_eq!("warning".parse::<LogLevel>().unwrap(), LogLevel::Warn);
        assert!("verbose".parse::<LogLevel>().is_err());
        assert_eq!(LogLevel::Off.to_string(), "off");
        assert_eq!(LogFormat::Jsonl.to_string(), "jsonl");
    }
}
