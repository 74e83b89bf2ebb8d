//! Error types for propman library

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for propman operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for propman library
#[derive(Error, Debug)]
pub enum Error {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("Failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file '{path}': {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to create directory '{path}': {source}")]
    DirectoryCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // -------------------------------------------------------------------------
    // Serialization Errors
    // -------------------------------------------------------------------------
    #[error("Failed to serialize data: {0}")]
    Serialize(#[from] serde_json::Error),

    #[cfg(feature = "toml")]
    #[error("TOML error: {0}")]
    Toml(String),

    #[error("Failed to parse backing store: {0}")]
    Parse(String),

    #[error("Failed to format backing store: {0}")]
    Format(String),

    // -------------------------------------------------------------------------
    // Data Errors
    // -------------------------------------------------------------------------
    #[error("Invalid {type_name} value '{value}': {reason}")]
    InvalidValue {
        type_name: String,
        value: String,
        reason: String,
    },

    #[error("Null value for property '{0}': null values are not supported")]
    NullValue(String),

    // -------------------------------------------------------------------------
    // Type Support Errors
    // -------------------------------------------------------------------------
    #[error("Unsupported property type: {0}")]
    UnsupportedType(String),

    #[error("Ambiguous accessors for property '{property}': '{first}' and '{second}'")]
    AmbiguousAccessor {
        property: String,
        first: String,
        second: String,
    },

    #[error("Accessor type mismatch for property '{property}': read {read}, write {write}")]
    AccessorTypeMismatch {
        property: String,
        read: String,
        write: String,
    },

    #[error("Type mismatch: expected {expected}, got {actual}")]
    TypeMismatch { expected: String, actual: String },

    // -------------------------------------------------------------------------
    // Registry Errors
    // -------------------------------------------------------------------------
    #[error("Type '{0}' has been already registered")]
    AlreadyRegistered(String),

    #[error("Type '{0}' is not registered")]
    NotRegistered(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Check if this error is caller-fixable misuse of the registry
    #[must_use]
    pub fn is_usage_error(&self) -> bool {
        matches!(
            self,
            Error::AlreadyRegistered(_) | Error::NotRegistered(_) | Error::Config(_)
        )
    }

    /// Check if this error comes from the contents of a backing store or instance
    ///
    /// Malformed store text from every backend surfaces as [`Error::Parse`].
    #[must_use]
    pub fn is_data_error(&self) -> bool {
        matches!(
            self,
            Error::InvalidValue { .. } | Error::NullValue(_) | Error::Parse(_)
        )
    }

    /// Check if the settings type itself cannot be bound
    #[must_use]
    pub fn is_type_error(&self) -> bool {
        matches!(
            self,
            Error::UnsupportedType(_)
                | Error::AmbiguousAccessor { .. }
                | Error::AccessorTypeMismatch { .. }
                | Error::TypeMismatch { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classification() {
        assert!(Error::AlreadyRegistered("Bean".into()).is_usage_error());
        assert!(Error::NullValue("name".into()).is_data_error());
        assert!(Error::UnsupportedType("BigInt".into()).is_type_error());
        assert!(!Error::Parse("bad".into()).is_usage_error());
        assert!(Error::Parse("bad".into()).is_data_error());
    }

    #[test]
    fn test_format_failure_is_not_caller_fixable() {
        let err = Error::Format("timestamp".into());
        assert!(!err.is_usage_error());
        assert!(!err.is_data_error());
        assert!(!err.is_type_error());
    }

    #[test]
    fn test_error_messages_name_the_culprit() {
        let err = Error::UnsupportedType("num_bigint::BigInt".into());
        assert!(err.to_string().contains("num_bigint::BigInt"));

        let err = Error::NotRegistered("app::Settings".into());
        assert_eq!(err.to_string(), "Type 'app::Settings' is not registered");
    }
}
