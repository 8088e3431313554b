//! No-mock configuration validation + resolution tests.
//!
//! Covers:
//! - Loading and validating real analytics.json files on disk
//! - Resolution order (CLI > env path > env dir)

use debris_config::resolve::{resolve_config, ConfigSource, ENV_CONFIG_DIR, ENV_CONFIG_PATH};
use debris_config::validate::{validate_config, ValidationError};
use debris_config::AnalyticsConfig;
use std::env;
use std::fs;
use std::path::Path;
use std::sync::{Mutex, OnceLock};
use tempfile::TempDir;

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

struct EnvGuard {
    keys: Vec<String>,
    saved: Vec<Option<String>>,
}

impl EnvGuard {
    fn new(keys: &[&str]) -> Self {
        let mut saved = Vec::with_capacity(keys.len());
        for key in keys {
            saved.push(env::var(key).ok());
        }
        Self {
            keys: keys.iter().map(|k| k.to_string()).collect(),
            saved,
        }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (idx, key) in self.keys.iter().enumerate() {
            match self.saved.get(idx).and_then(|v| v.as_ref()) {
                Some(val) => env::set_var(key, val),
                None => env::remove_var(key),
            }
        }
    }
}

fn with_env_lock<T>(f: impl FnOnce() -> T) -> T {
    let _guard = ENV_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .expect("env lock poisoned");
    f()
}

fn write_config(dest: &Path, body: &str) {
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent).expect("create config parent");
    }
    fs::write(dest, body).expect("write config");
}

const TUNED: &str = r#"{
    "schema_version": "1.0.0",
    "description": "tighter hotspot gate for LEO monitoring",
    "hotspots": { "threshold": 0.55 },
    "forecast": { "alpha": 0.5, "default_periods": 14 }
}"#;

#[test]
fn tuned_file_loads_and_validates() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("analytics.json");
    write_config(&path, TUNED);

    let config = AnalyticsConfig::from_file(&path).expect("load tuned config");
    validate_config(&config).expect("tuned config is valid");
    assert_eq!(config.hotspots.threshold, 0.55);
    assert_eq!(config.forecast.default_periods, 14);
    assert_eq!(config.risk.count_reference, 50000.0);
}

#[test]
fn missing_file_is_io_error() {
    let dir = TempDir::new().unwrap();
    let err = AnalyticsConfig::from_file(&dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, ValidationError::IoError(_)));
}

#[test]
fn out_of_range_file_fails_validation() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("analytics.json");
    write_config(
        &path,
        r#"{"schema_version": "1.0.0", "forecast": {"alpha": 1.5}}"#,
    );

    let config = AnalyticsConfig::from_file(&path).unwrap();
    let err = validate_config(&config).unwrap_err();
    assert!(err.to_string().contains("forecast.alpha"));
}

#[test]
fn cli_path_wins_over_environment() {
    with_env_lock(|| {
        let _guard = EnvGuard::new(&[ENV_CONFIG_PATH, ENV_CONFIG_DIR]);
        let dir = TempDir::new().unwrap();
        let cli = dir.path().join("cli.json");
        let from_env = dir.path().join("env.json");
        write_config(&cli, TUNED);
        write_config(&from_env, TUNED);
        env::set_var(ENV_CONFIG_PATH, &from_env);

        let paths = resolve_config(Some(&cli));
        assert_eq!(paths.analytics.as_deref(), Some(cli.as_path()));
        assert_eq!(paths.analytics_source, ConfigSource::CliArgument);
    });
}

#[test]
fn env_path_used_without_cli() {
    with_env_lock(|| {
        let _guard = EnvGuard::new(&[ENV_CONFIG_PATH, ENV_CONFIG_DIR]);
        let dir = TempDir::new().unwrap();
        let from_env = dir.path().join("env.json");
        write_config(&from_env, TUNED);
        env::set_var(ENV_CONFIG_PATH, &from_env);
        env::remove_var(ENV_CONFIG_DIR);

        let paths = resolve_config(None);
        assert_eq!(paths.analytics.as_deref(), Some(from_env.as_path()));
        assert_eq!(paths.analytics_source, ConfigSource::Environment);
    });
}

#[test]
fn env_dir_used_when_path_unset() {
    with_env_lock(|| {
        let _guard = EnvGuard::new(&[ENV_CONFIG_PATH, ENV_CONFIG_DIR]);
        let dir = TempDir::new().unwrap();
        let expected = dir.path().join("analytics.json");
        write_config(&expected, TUNED);
        env::remove_var(ENV_CONFIG_PATH);
        env::set_var(ENV_CONFIG_DIR, dir.path());

        let paths = resolve_config(None);
        assert_eq!(paths.analytics.as_deref(), Some(expected.as_path()));
        assert_eq!(paths.analytics_source, ConfigSource::Environment);
    });
}
