// Allow unused assignments for diagnostic fields - they're used by the macros
#![allow(unused_assignments)]

use miette::Diagnostic;
use thiserror::Error;

/// Core error type for probe documents
#[derive(Error, Debug, Diagnostic)]
pub enum ProberError {
    /// Serialization error
    #[error("Serialization error: {message}")]
    #[diagnostic(
        code(prober::serialization_error),
        help("Ensure the probe document is valid JSON or YAML")
    )]
    SerializationError {
        #[allow(unused)]
        message: String,
        #[source]
        #[allow(unused)]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Probe definition is structurally invalid
    #[error("Invalid probe definition: {reason}")]
    #[diagnostic(code(prober::invalid_definition), help("{suggestion}"))]
    InvalidDefinition {
        #[allow(unused)]
        reason: String,
        #[allow(unused)]
        suggestion: String,
    },
}

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, ProberError>;

impl ProberError {
    pub fn serialization_error(
        message: impl Into<String>,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::SerializationError {
            message: message.into(),
            source,
        }
    }

    pub fn invalid_definition(reason: impl Into<String>, suggestion: impl Into<String>) -> Self {
        Self::InvalidDefinition {
            reason: reason.into(),
            suggestion: suggestion.into(),
        }
    }
}
