//! Error types for coda
//!
//! Provides a unified error type used across all coda crates.

use std::path::PathBuf;

/// Main error type for coda operations
#[derive(Debug, thiserror::Error)]
pub enum CodaError {
    // === IO Errors ===

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write file {path}: {source}")]
    FileWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    // === Configuration Errors ===

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid configuration at {path}: {message}")]
    ConfigInvalid { path: PathBuf, message: String },

    #[error("Configuration file not found: {0}")]
    ConfigNotFound(PathBuf),

    // === Matcher Errors ===

    #[error("Invalid match pattern '{pattern}': {message}")]
    Pattern { pattern: String, message: String },

    #[error("Matcher failed: {0}")]
    Matcher(String),

    // === Internal Errors ===

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CodaError {
    /// Create a config error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a pattern error
    pub fn pattern(pattern: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Pattern {
            pattern: pattern.into(),
            message: msg.into(),
        }
    }

    /// Create a matcher error
    pub fn matcher(msg: impl Into<String>) -> Self {
        Self::Matcher(msg.into())
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Check if this error should be treated as "no match" by the detector
    ///
    /// Matcher and pattern failures never propagate out of the edit path;
    /// the affected check is simply skipped.
    pub fn is_match_failure(&self) -> bool {
        matches!(self, Self::Pattern { .. } | Self::Matcher(_))
    }
}

/// Result type alias using CodaError
pub type Result<T> = std::result::Result<T, CodaError>;

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Display Tests ====================

    #[test]
    fn test_error_display_config() {
        let err = CodaError::config("missing key");
        assert_eq!(err.to_string(), "Configuration error: missing key");
    }

    #[test]
    fn test_error_display_config_invalid() {
        let err = CodaError::ConfigInvalid {
            path: PathBuf::from("/home/user/.config/coda/config.toml"),
            message: "syntax error".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("Invalid configuration"));
        assert!(msg.contains("config.toml"));
        assert!(msg.contains("syntax error"));
    }

    #[test]
    fn test_error_display_config_not_found() {
        let err = CodaError::ConfigNotFound(PathBuf::from("/missing/config.toml"));
        assert!(err.to_string().contains("/missing/config.toml"));
    }

    #[test]
    fn test_error_display_pattern() {
        let err = CodaError::pattern("[unclosed", "missing closing bracket");
        let msg = err.to_string();
        assert!(msg.contains("[unclosed"));
        assert!(msg.contains("missing closing bracket"));
    }

    #[test]
    fn test_error_display_matcher() {
        let err = CodaError::matcher("predicate panicked");
        assert_eq!(err.to_string(), "Matcher failed: predicate panicked");
    }

    #[test]
    fn test_error_display_file_read() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = CodaError::FileRead {
            path: PathBuf::from("/etc/shadow"),
            source: io_err,
        };
        let msg = err.to_string();
        assert!(msg.contains("Failed to read file"));
        assert!(msg.contains("/etc/shadow"));
    }

    #[test]
    fn test_error_display_internal() {
        let err = CodaError::internal("unexpected state");
        assert_eq!(err.to_string(), "Internal error: unexpected state");
    }

    // ==================== Classification Tests ====================

    #[test]
    fn test_match_failures() {
        assert!(CodaError::pattern("x(", "unclosed group").is_match_failure());
        assert!(CodaError::matcher("boom").is_match_failure());
        assert!(!CodaError::config("bad").is_match_failure());
        assert!(!CodaError::internal("bad").is_match_failure());
    }

    // ==================== From Trait Tests ====================

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "not found");
        let err: CodaError = io_err.into();
        assert!(matches!(err, CodaError::Io(_)));
    }

    // ==================== Result Type Tests ====================

    #[test]
    fn test_result_chaining() {
        let result: Result<i32> = Ok(21);
        let mapped = result.map(|x| x * 2);
        assert_eq!(mapped.unwrap(), 42);
    }
}
