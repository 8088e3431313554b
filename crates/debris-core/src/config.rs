//! Configuration loading and validation for debris-core.
//!
//! This module handles:
//! - Resolving analytics.json (CLI > env > XDG > system > defaults)
//! - Shape checking via serde and semantic validation
//! - Config snapshot generation for command output

pub use debris_config::{AnalyticsConfig, ConfigPaths, ConfigSnapshot, ConfigSource};
pub use debris_config::ValidationError;

use debris_config::{resolve_config, validate_config};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur during config loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("I/O error reading {path}: {source}")]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: ValidationError,
    },

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl From<ConfigError> for debris_common::Error {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::NotFound { .. } => debris_common::Error::Config(err.to_string()),
            ConfigError::IoError { source, .. } => debris_common::Error::Io(source),
            ConfigError::ParseError { .. } => debris_common::Error::Config(err.to_string()),
            ConfigError::Validation(inner) => inner.into(),
        }
    }
}

/// Configuration with provenance.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub config: AnalyticsConfig,
    pub paths: ConfigPaths,
    /// Raw file content, kept for hashing.
    raw: Option<String>,
}

impl ResolvedConfig {
    /// Built-in defaults with no backing file.
    pub fn builtin() -> Self {
        Self {
            config: AnalyticsConfig::default(),
            paths: ConfigPaths::default(),
            raw: None,
        }
    }

    pub fn source(&self) -> &ConfigSource {
        &self.paths.analytics_source
    }

    pub fn path(&self) -> Option<&Path> {
        self.paths.analytics.as_deref()
    }

    /// Provenance snapshot for command output.
    pub fn snapshot(&self) -> ConfigSnapshot {
        ConfigSnapshot::new(&self.config, &self.paths, self.raw.as_deref())
    }
}

/// Configuration resolution options.
#[derive(Debug, Default, Clone)]
pub struct ConfigOptions {
    /// Explicit analytics.json path (highest priority). Must exist.
    pub config_path: Option<PathBuf>,
}

/// Load configuration with the standard resolution order, then validate it.
///
/// An explicit path that does not exist is an error rather than a silent
/// fall back to defaults.
pub fn load_config(options: &ConfigOptions) -> Result<ResolvedConfig, ConfigError> {
    if let Some(path) = &options.config_path {
        if !path.exists() {
            return Err(ConfigError::NotFound { path: path.clone() });
        }
    }

    let paths = resolve_config(options.config_path.as_deref());
    let resolved = match paths.analytics.clone() {
        Some(path) => {
            let raw = std::fs::read_to_string(&path).map_err(|source| ConfigError::IoError {
                path: path.clone(),
                source,
            })?;
            let config = AnalyticsConfig::parse_json(&raw)
                .map_err(|source| ConfigError::ParseError { path, source })?;
            ResolvedConfig {
                config,
                paths,
                raw: Some(raw),
            }
        }
        None => ResolvedConfig {
            paths,
            ..ResolvedConfig::builtin()
        },
    };

    validate_config(&resolved.config)?;

    tracing::debug!(
        source = %resolved.paths.analytics_source,
        path = ?resolved.paths.analytics,
        "configuration loaded"
    );
    Ok(resolved)
}
