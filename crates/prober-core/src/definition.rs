use crate::error::{ProberError, Result};
use crate::handler::Handler;
use k8s_openapi::api::core::v1::Pod;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Kubernetes default probe timeout
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 1;

/// A probe together with the workload it targets, as loaded from a file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProbeDefinition {
    pub handler: Handler,
    /// Workload used to resolve named ports and the default host
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pod: Option<Pod>,
    /// Name of the container inside `pod`
    pub container: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_seconds: Option<u64>,
}

impl ProbeDefinition {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS))
    }

    /// Structural checks that don't need the network
    pub fn validate(&self) -> Result<()> {
        if self.container.is_empty() {
            return Err(ProberError::invalid_definition(
                "container name is empty",
                "Set `container` to the name of a container in the pod spec",
            ));
        }
        if self.timeout_seconds == Some(0) {
            return Err(ProberError::invalid_definition(
                "timeoutSeconds must be at least 1",
                "Omit `timeoutSeconds` to use the default of 1 second",
            ));
        }
        Ok(())
    }
}
