use crate::error::Result;
use crate::exec::ExecProber;
use async_trait::async_trait;
use k8s_openapi::api::core::v1::{Container, Pod};
use prober_core::ProbeOutcome;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::debug;

/// One recorded exec probe invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecCall {
    pub pod_name: Option<String>,
    pub container_name: String,
    pub command: Vec<String>,
}

/// Exec prober for testing: returns a configured outcome and records calls
pub struct MockExecProber {
    outcome: Arc<RwLock<ProbeOutcome>>,
    calls: Arc<RwLock<Vec<ExecCall>>>,
}

impl MockExecProber {
    /// Succeeds with empty output until told otherwise
    pub fn new() -> Self {
        Self {
            outcome: Arc::new(RwLock::new(ProbeOutcome::success(""))),
            calls: Arc::new(RwLock::new(Vec::new())),
        }
    }

    pub async fn set_outcome(&self, outcome: ProbeOutcome) {
        *self.outcome.write().await = outcome;
    }

    pub async fn calls(&self) -> Vec<ExecCall> {
        self.calls.read().await.clone()
    }
}

impl Default for MockExecProber {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ExecProber for MockExecProber {
    async fn probe(
        &self,
        pod: &Pod,
        container: &Container,
        command: &[String],
        _timeout: Duration,
    ) -> Result<ProbeOutcome> {
        debug!("Mock: exec probe in {}: {:?}", container.name, command);
        self.calls.write().await.push(ExecCall {
            pod_name: pod.metadata.name.clone(),
            container_name: container.name.clone(),
            command: command.to_vec(),
        });
        Ok(self.outcome.read().await.clone())
    }
}
