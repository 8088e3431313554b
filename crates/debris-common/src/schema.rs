//! Output schema versioning.

/// Version stamped on every structured payload the CLI emits.
///
/// Bump the minor version for additive fields, the major version for
/// renames or removals.
pub const SCHEMA_VERSION: &str = "1.0.0";
