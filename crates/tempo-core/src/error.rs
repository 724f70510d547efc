//! Error types for Tempo

use thiserror::Error;

/// The main error type for Tempo operations
#[derive(Debug, Error)]
pub enum TempoError {
    #[error("System failed: {0}")]
    SystemFailed(String),

    #[error("System already borrowed: {0}")]
    SystemBusy(String),

    #[error("System panicked: {0}")]
    SystemPanicked(String),

    #[error("Unknown phase: {0}")]
    UnknownPhase(String),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParseError(String),

    #[error("TOML serialization error: {0}")]
    TomlSerError(String),
}

impl TempoError {
    /// Shorthand for a failure raised from inside a system callback
    pub fn system(message: impl Into<String>) -> Self {
        TempoError::SystemFailed(message.into())
    }
}

/// Result type alias for Tempo operations
pub type Result<T> = std::result::Result<T, TempoError>;

impl From<toml::de::Error> for TempoError {
    fn from(err: toml::de::Error) -> Self {
        TempoError::TomlParseError(err.to_string())
    }
}

impl From<toml::ser::Error> for TempoError {
    fn from(err: toml::ser::Error) -> Self {
        TempoError::TomlSerError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_shorthand() {
        let err = TempoError::system("boom");
        assert!(matches!(err, TempoError::SystemFailed(ref m) if m == "boom"));
        assert_eq!(err.to_string(), "System failed: boom");
    }

    #[test]
    fn test_toml_error_conversion() {
        let parse: std::result::Result<toml::Value, _> = toml::from_str("not = = valid");
        let err: TempoError = parse.unwrap_err().into();
        assert!(matches!(err, TempoError::TomlParseError(_)));
    }
}
