//! Configuration validation errors and semantic validation.

use thiserror::Error;

use crate::analytics::AnalyticsConfig;

/// Validation result type.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Configuration validation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("I/O error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Semantic validation failed: {0}")]
    SemanticError(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    #[error("Version mismatch: expected {expected}, got {actual}")]
    VersionMismatch { expected: String, actual: String },
}

impl ValidationError {
    /// Error code for structured error reporting.
    pub fn code(&self) -> u32 {
        match self {
            ValidationError::IoError(_) => 60,
            ValidationError::ParseError(_) => 61,
            ValidationError::SemanticError(_) => 63,
            ValidationError::InvalidValue { .. } => 65,
            ValidationError::VersionMismatch { .. } => 66,
        }
    }
}

impl From<ValidationError> for debris_common::Error {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::IoError(msg) => debris_common::Error::Config(msg),
            ValidationError::ParseError(msg) => debris_common::Error::Config(msg),
            ValidationError::VersionMismatch { expected, actual } => {
                debris_common::Error::ConfigVersion { expected, actual }
            }
            other => debris_common::Error::InvalidConfig(other.to_string()),
        }
    }
}

/// Validate analytics configuration semantically.
pub fn validate_config(config: &AnalyticsConfig) -> ValidationResult<()> {
    if config.schema_version != crate::CONFIG_SCHEMA_VERSION {
        return Err(ValidationError::VersionMismatch {
            expected: crate::CONFIG_SCHEMA_VERSION.to_string(),
            actual: config.schema_version.clone(),
        });
    }

    // Risk weights
    let risk = &config.risk;
    validate_non_negative("risk.density_weight", risk.density_weight)?;
    validate_non_negative("risk.count_weight", risk.count_weight)?;
    validate_non_negative("risk.cluster_weight", risk.cluster_weight)?;
    validate_positive("risk.density_reference", risk.density_reference)?;
    validate_positive("risk.count_reference", risk.count_reference)?;

    // Anomaly thresholds: higher sensitivity must mean a lower threshold.
    let anomaly = &config.anomaly;
    validate_positive("anomaly.high", anomaly.high)?;
    validate_positive("anomaly.medium", anomaly.medium)?;
    validate_positive("anomaly.low", anomaly.low)?;
    if !(anomaly.high <= anomaly.medium && anomaly.medium <= anomaly.low) {
        return Err(ValidationError::SemanticError(format!(
            "anomaly thresholds must satisfy high <= medium <= low, got high={}, medium={}, low={}",
            anomaly.high, anomaly.medium, anomaly.low
        )));
    }
    validate_unit("anomaly.high_severity_score", anomaly.high_severity_score)?;
    validate_unit("anomaly.medium_severity_score", anomaly.medium_severity_score)?;
    if anomaly.medium_severity_score > anomaly.high_severity_score {
        return Err(ValidationError::SemanticError(format!(
            "anomaly.medium_severity_score ({}) must not exceed anomaly.high_severity_score ({})",
            anomaly.medium_severity_score, anomaly.high_severity_score
        )));
    }

    // Forecast
    let alpha = config.forecast.alpha;
    if !(alpha > 0.0 && alpha <= 1.0) {
        return Err(ValidationError::InvalidValue {
            field: "forecast.alpha".to_string(),
            message: format!("Must be in (0, 1], got {}", alpha),
        });
    }

    // Trend
    if config.trend.window == 0 {
        return Err(ValidationError::InvalidValue {
            field: "trend.window".to_string(),
            message: "Must be at least 1".to_string(),
        });
    }
    if config.trend.min_points < 2 {
        return Err(ValidationError::InvalidValue {
            field: "trend.min_points".to_string(),
            message: format!("Must be at least 2, got {}", config.trend.min_points),
        });
    }
    validate_non_negative(
        "trend.change_threshold_percent",
        config.trend.change_threshold_percent,
    )?;

    // Factor weights
    let factors = &config.factors;
    validate_positive("factors.growth_reference", factors.growth_reference)?;
    validate_positive("factors.count_reference", factors.count_reference)?;
    validate_non_negative("factors.orbital_decay_weight", factors.orbital_decay_weight)?;
    validate_non_negative(
        "factors.default_inclination_weight",
        factors.default_inclination_weight,
    )?;

    // Hotspots
    validate_unit("hotspots.threshold", config.hotspots.threshold)?;

    Ok(())
}

fn validate_positive(field: &str, value: f64) -> ValidationResult<()> {
    if !(value.is_finite() && value > 0.0) {
        return Err(ValidationError::InvalidValue {
            field: field.to_string(),
            message: format!("Must be positive, got {}", value),
        });
    }
    Ok(())
}

fn validate_non_negative(field: &str, value: f64) -> ValidationResult<()> {
    if !(value.is_finite() && value >= 0.0) {
        return Err(ValidationError::InvalidValue {
            field: field.to_string(),
            message: format!("Must be non-negative, got {}", value),
        });
    }
    Ok(())
}

fn validate_unit(field: &str, value: f64) -> ValidationResult<()> {
    if !(0.0..=1.0).contains(&value) {
        return Err(ValidationError::InvalidValue {
            field: field.to_string(),
            message: format!("Must be in [0, 1], got {}", value),
        });
    }
    Ok(())
}
