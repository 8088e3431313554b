//! Locating analytics.json.
//!
//! Candidates are tried in order and the first existing file wins:
//! CLI argument, `DEBRIS_ANALYTICS_CONFIG`, `DEBRIS_ANALYTICS_CONFIG_DIR`,
//! the user config directory, then `/etc/debris-analytics`. With none of
//! them present the built-in defaults apply.

use std::path::{Path, PathBuf};

/// Outcome of config discovery.
#[derive(Debug, Clone, Default)]
pub struct ConfigPaths {
    /// `None` means no file was found.
    pub analytics: Option<PathBuf>,
    pub analytics_source: ConfigSource,
}

/// Which candidate supplied the config file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ConfigSource {
    CliArgument,
    /// Either of the two environment variables.
    Environment,
    /// `$XDG_CONFIG_HOME/debris-analytics` or the platform equivalent.
    XdgConfig,
    SystemConfig,
    #[default]
    BuiltinDefault,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ConfigSource::CliArgument => "CLI argument",
            ConfigSource::Environment => "environment variable",
            ConfigSource::XdgConfig => "XDG config",
            ConfigSource::SystemConfig => "system config",
            ConfigSource::BuiltinDefault => "builtin default",
        };
        f.write_str(label)
    }
}

/// Direct path to a config file.
pub const ENV_CONFIG_PATH: &str = "DEBRIS_ANALYTICS_CONFIG";
/// Directory holding `analytics.json`.
pub const ENV_CONFIG_DIR: &str = "DEBRIS_ANALYTICS_CONFIG_DIR";

pub const CONFIG_FILENAME: &str = "analytics.json";

const APP_NAME: &str = "debris-analytics";

/// Find the analytics config file.
///
/// A CLI path that does not exist is skipped here; callers that must
/// fail on a missing explicit path check for it themselves.
pub fn resolve_config(cli_path: Option<&Path>) -> ConfigPaths {
    let env_file = std::env::var_os(ENV_CONFIG_PATH).map(PathBuf::from);
    let env_dir = std::env::var_os(ENV_CONFIG_DIR).map(|d| PathBuf::from(d).join(CONFIG_FILENAME));

    let candidates = [
        (cli_path.map(Path::to_path_buf), ConfigSource::CliArgument),
        (env_file, ConfigSource::Environment),
        (env_dir, ConfigSource::Environment),
        (
            xdg_config_dir().map(|d| d.join(CONFIG_FILENAME)),
            ConfigSource::XdgConfig,
        ),
        (
            Some(system_config_dir().join(CONFIG_FILENAME)),
            ConfigSource::SystemConfig,
        ),
    ];

    candidates
        .into_iter()
        .find_map(|(path, source)| path.filter(|p| p.exists()).map(|p| (p, source)))
        .map(|(path, source)| ConfigPaths {
            analytics: Some(path),
            analytics_source: source,
        })
        .unwrap_or_default()
}

/// Per-user config directory for debris-analytics.
pub fn xdg_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_NAME))
}

pub fn system_config_dir() -> PathBuf {
    Path::new("/etc").join(APP_NAME)
}
