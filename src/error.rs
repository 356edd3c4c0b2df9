//! Error types for sapdm.
//!
//! Manifest generation itself cannot fail once a context has been resolved;
//! every error here is raised either while validating the input context or by
//! the loading and rendering layers around the generator.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for sapdm operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for sapdm.
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // Context Errors
    // ========================================================================
    /// One or more required properties are absent.
    #[error("Missing required properties: {}", .missing.join(", "))]
    MissingProperties {
        /// Every missing property, `env.` prefixed for environment facts
        missing: Vec<String>,
    },

    /// A property is present but has an unusable value.
    #[error("Invalid value for property '{name}': {message}")]
    InvalidProperty {
        /// Property name
        name: String,
        /// Error message
        message: String,
    },

    /// The zone does not follow the `<region>-<suffix>` convention.
    #[error("Malformed zone '{0}': expected '<region>-<suffix>', e.g. 'us-central1-a'")]
    MalformedZone(String),

    /// Error loading a context file.
    #[error("Failed to load context from '{path}': {message}")]
    ContextLoad {
        /// Path to the context file
        path: PathBuf,
        /// Error message
        message: String,
    },

    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// Invalid tool configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    // ========================================================================
    // Wrapped Errors
    // ========================================================================
    /// YAML error.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create an invalid property error.
    pub fn invalid_property(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidProperty {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Create a context load error.
    pub fn context_load(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::ContextLoad {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Names of the missing properties, if this is a missing-properties error.
    pub fn missing_properties(&self) -> Option<&[String]> {
        match self {
            Error::MissingProperties { missing } => Some(missing),
            _ => None,
        }
    }

    /// Whether the error comes from the input context rather than the
    /// surrounding I/O.
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            Error::MissingProperties { .. } | Error::InvalidProperty { .. } | Error::MalformedZone(_)
        )
    }
}
