//! Error types for dashgate

use std::path::PathBuf;
use thiserror::Error;

/// Result type for dashgate operations
pub type Result<T> = std::result::Result<T, DashgateError>;

/// Main error type for dashgate
#[derive(Error, Debug)]
pub enum DashgateError {
    /// Configuration errors (policy file loading and validation)
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Authorization misconfiguration surfaced by a query
    #[error("Authorization error: {0}")]
    Authz(#[from] AuthzError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-related errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to parse config: {0}")]
    Parse(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// A reference to something outside the closed catalogs.
///
/// These are programming or configuration mistakes, never a "denied" answer.
/// A denied check is a plain `false`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthzError {
    #[error("unknown permission '{0}' is not in the permission catalog")]
    UnknownPermission(String),

    #[error("unknown role '{0}' is not in the role catalog")]
    UnknownRole(String),
}

impl From<serde_json::Error> for DashgateError {
    fn from(err: serde_json::Error) -> Self {
        DashgateError::Config(ConfigError::Parse(err.to_string()))
    }
}

impl DashgateError {
    /// True for errors caused by policy or call-site misconfiguration.
    pub fn is_configuration_error(&self) -> bool {
        matches!(self, DashgateError::Config(_) | DashgateError::Authz(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AuthzError::UnknownPermission("nonexistent.permission".to_string());
        assert_eq!(
            err.to_string(),
            "unknown permission 'nonexistent.permission' is not in the permission catalog"
        );
    }

    #[test]
    fn test_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: DashgateError = io_err.into();
        assert!(matches!(err, DashgateError::Io(_)));
        assert!(!err.is_configuration_error());

        let err: DashgateError = AuthzError::UnknownRole("root".to_string()).into();
        assert!(err.is_configuration_error());
    }

    #[test]
    fn test_json_error_is_parse_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: DashgateError = json_err.into();
        assert!(matches!(err, DashgateError::Config(ConfigError::Parse(_))));
    }
}
