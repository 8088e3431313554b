//! Exit codes for the debris-core CLI.
//!
//! Automation can branch on the exit code without parsing output.
//!
//! Ranges:
//! - 0-1: operational outcomes
//! - 10-19: caller errors (fix the arguments, config or input)
//! - 20-29: internal and I/O errors

use debris_common::error::ErrorCategory;
use debris_common::Error;

/// Stable process exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Ran to completion; nothing flagged.
    Clean = 0,

    /// Ran to completion and found anomalies, alerts or hotspots.
    Flagged = 1,

    /// Invalid command-line arguments.
    ArgsError = 10,

    /// Configuration could not be loaded or failed validation.
    ConfigError = 11,

    /// Input document or series was malformed.
    InputError = 12,

    /// Bug; please report.
    InternalError = 20,

    IoError = 21,
}

impl ExitCode {
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Clean or Flagged.
    pub fn is_success(self) -> bool {
        (self as i32) < 10
    }

    pub fn is_user_error(self) -> bool {
        (10..20).contains(&(self as i32))
    }

    pub fn is_internal_error(self) -> bool {
        (self as i32) >= 20
    }

    /// `Flagged` when `flagged` is true, otherwise `Clean`.
    pub fn outcome(flagged: bool) -> Self {
        if flagged {
            ExitCode::Flagged
        } else {
            ExitCode::Clean
        }
    }

    /// Name used in JSON error output.
    pub fn code_name(&self) -> &'static str {
        match self {
            ExitCode::Clean => "OK_CLEAN",
            ExitCode::Flagged => "OK_FLAGGED",
            ExitCode::ArgsError => "ERR_ARGS",
            ExitCode::ConfigError => "ERR_CONFIG",
            ExitCode::InputError => "ERR_INPUT",
            ExitCode::InternalError => "ERR_INTERNAL",
            ExitCode::IoError => "ERR_IO",
        }
    }
}

impl From<&Error> for ExitCode {
    fn from(err: &Error) -> Self {
        match (err.category(), err) {
            (_, Error::Json(_)) => ExitCode::InputError,
            (ErrorCategory::Config, _) => ExitCode::ConfigError,
            (ErrorCategory::Input, _) => ExitCode::InputError,
            (ErrorCategory::Io, _) => ExitCode::IoError,
        }
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code as i32
    }
}

impl std::fmt::Display for ExitCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.code_name(), self.as_i32())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_values_are_stable() {
        assert_eq!(ExitCode::Clean.as_i32(), 0);
        assert_eq!(ExitCode::Flagged.as_i32(), 1);
        assert_eq!(ExitCode::ArgsError.as_i32(), 10);
        assert_eq!(ExitCode::ConfigError.as_i32(), 11);
        assert_eq!(ExitCode::InputError.as_i32(), 12);
        assert_eq!(ExitCode::InternalError.as_i32(), 20);
        assert_eq!(ExitCode::IoError.as_i32(), 21);
    }

    #[test]
    fn classification() {
        assert!(ExitCode::Flagged.is_success());
        assert!(!ExitCode::ArgsError.is_success());
        assert!(ExitCode::InputError.is_user_error());
        assert!(ExitCode::IoError.is_internal_error());
        assert!(!ExitCode::ConfigError.is_internal_error());
    }

    #[test]
    fn outcome_helper() {
        assert_eq!(ExitCode::outcome(true), ExitCode::Flagged);
        assert_eq!(ExitCode::outcome(false), ExitCode::Clean);
    }

    #[test]
    fn errors_map_to_codes() {
        assert_eq!(
            ExitCode::from(&Error::InvalidConfig("x".into())),
            ExitCode::ConfigError
        );
        assert_eq!(
            ExitCode::from(&Error::InvalidSeries("x".into())),
            ExitCode::InputError
        );
        let io = Error::Io(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        assert_eq!(ExitCode::from(&io), ExitCode::IoError);
        let json = Error::Json(serde_json::from_str::<u8>("x").unwrap_err());
        assert_eq!(ExitCode::from(&json), ExitCode::InputError);
    }

    #[test]
    fn display_includes_name_and_number() {
        assert_eq!(ExitCode::Flagged.to_string(), "OK_FLAGGED (1)");
    }
}
