//! Error types for the Atelier workspace.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the entire Atelier workspace.
///
/// This provides typed, structured error variants with automatic conversion
/// from common error types via the `From` trait.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum AtelierError {
    /// Entity not found error with type information
    #[error("Entity not found: {entity_type} '{id}'")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// Mode string outside the closed enumeration
    #[error("Invalid mode: '{0}'")]
    InvalidMode(String),

    /// A matched reflection category reached the resolver without a template.
    ///
    /// This is an internal consistency violation, never a user-facing error:
    /// the keyword matcher only returns categories that belong to the mode.
    #[error("No reflection template for mode '{mode}' category '{category}'")]
    TemplateMissing { mode: String, category: String },

    /// Retrieval or generation collaborator failure (network, HTTP, parse)
    #[error("Collaborator failure: {message}")]
    Collaborator { message: String },

    /// The generation collaborator returned output without a required field
    #[error("Malformed collaborator output: missing field '{field}'")]
    MalformedOutput { field: String },

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON", etc.
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AtelierError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a NotFound error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates a Collaborator error
    pub fn collaborator(message: impl Into<String>) -> Self {
        Self::Collaborator {
            message: message.into(),
        }
    }

    /// Creates a MalformedOutput error for a missing required field
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MalformedOutput {
            field: field.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is a NotFound error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a collaborator failure (including malformed output)
    pub fn is_collaborator(&self) -> bool {
        matches!(
            self,
            Self::Collaborator { .. } | Self::MalformedOutput { .. }
        )
    }

    /// Check if this is a config error
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for AtelierError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for AtelierError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for AtelierError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// Conversion from anyhow::Error (transitional, should be removed eventually)
impl From<anyhow::Error> for AtelierError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// A type alias for `Result<T, AtelierError>`.
pub type Result<T> = std::result::Result<T, AtelierError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_helper() {
        let err = AtelierError::not_found("style", "neon-grid");
        assert!(err.is_not_found());
        assert_eq!(
            err.to_string(),
            "Entity not found: style 'neon-grid'"
        );
    }

    #[test]
    fn test_missing_field_is_collaborator_kind() {
        let err = AtelierError::missing_field("rationale");
        assert!(err.is_collaborator());
        assert_eq!(
            err.to_string(),
            "Malformed collaborator output: missing field 'rationale'"
        );
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: AtelierError = io.into();
        assert!(matches!(err, AtelierError::Io { .. }));
    }
}
