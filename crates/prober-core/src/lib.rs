//! Prober Core - Probe documents and result types
//!
//! This crate provides:
//! - The declarative `Handler` document and its typed `ProbeHandler` form
//! - `ProbeResult` / `ProbeOutcome`
//! - The `ProbeDefinition` file format
//! - Error types with miette diagnostics

pub mod definition;
pub mod error;
pub mod handler;
pub mod outcome;

// Re-export commonly used types
pub use definition::ProbeDefinition;
pub use error::{ProberError, Result};
pub use handler::{Handler, HttpPostAction, ProbeHandler};
pub use outcome::{ProbeOutcome, ProbeResult};

// Re-export k8s-openapi types for convenience
pub use k8s_openapi;
pub use k8s_openapi::api::core::v1::{Container, ContainerPort, Pod};
pub use k8s_openapi::apimachinery::pkg::util::intstr::IntOrString;

/// Serialize a value to pretty JSON
pub fn to_json_pretty<T: serde::Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(|e| {
        ProberError::serialization_error(
            format!("Failed to serialize to JSON: {}", e),
            Some(Box::new(e)),
        )
    })
}

/// Deserialize a value from JSON
pub fn from_json<T: for<'de> serde::Deserialize<'de>>(data: &str) -> Result<T> {
    serde_json::from_str(data).map_err(|e| {
        ProberError::serialization_error(
            format!("Failed to deserialize from JSON: {}", e),
            Some(Box::new(e)),
        )
    })
}

/// Deserialize a value from YAML
pub fn from_yaml<T: for<'de> serde::Deserialize<'de>>(data: &str) -> Result<T> {
    serde_yaml::from_str(data).map_err(|e| {
        ProberError::serialization_error(
            format!("Failed to deserialize from YAML: {}", e),
            Some(Box::new(e)),
        )
    })
}
