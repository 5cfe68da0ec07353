use crate::error::{ProbeError, Result};
use async_trait::async_trait;
use k8s_openapi::api::core::v1::{Container, Pod};
use prober_core::ProbeOutcome;
use std::time::Duration;
use tracing::debug;

/// Runs an exec probe's command inside the target environment.
///
/// The dispatcher only calls this; what "inside the container" means is up
/// to the implementation. `Err` is reserved for commands that could not be
/// run at all.
#[async_trait]
pub trait ExecProber: Send + Sync {
    async fn probe(
        &self,
        pod: &Pod,
        container: &Container,
        command: &[String],
        timeout: Duration,
    ) -> Result<ProbeOutcome>;
}

/// Output from a command execution
#[derive(Debug, Clone)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
}

impl From<std::process::Output> for CommandOutput {
    fn from(output: std::process::Output) -> Self {
        Self {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            exit_code: output.status.code().unwrap_or(-1),
        }
    }
}

/// Runs the command as a local process
#[derive(Debug, Clone, Copy, Default)]
pub struct CommandExecProber;

#[async_trait]
impl ExecProber for CommandExecProber {
    async fn probe(
        &self,
        _pod: &Pod,
        container: &Container,
        command: &[String],
        timeout: Duration,
    ) -> Result<ProbeOutcome> {
        let (program, args) = command.split_first().ok_or_else(|| {
            ProbeError::invalid_config(
                format!("exec probe for container {} has no command", container.name),
                "Set `exec.command` to the program and its arguments",
            )
        })?;
        let command_line = command.join(" ");
        debug!("Executing probe for container {}: {}", container.name, command_line);

        let child = tokio::process::Command::new(program)
            .args(args)
            .kill_on_drop(true)
            .output();

        let output: CommandOutput = match tokio::time::timeout(timeout, child).await {
            Ok(Ok(output)) => output.into(),
            Ok(Err(e)) => return Err(ProbeError::exec_failed(command_line, e.to_string())),
            Err(_) => {
                return Ok(ProbeOutcome::failure(format!(
                    "command '{}' timed out after {:?}",
                    command_line, timeout
                )))
            }
        };

        debug!(
            "Probe command exited with code {}: {}",
            output.exit_code, command_line
        );

        if output.exit_code == 0 {
            Ok(ProbeOutcome::success(output.stdout))
        } else {
            Ok(ProbeOutcome::failure(format!(
                "command exited with code {} (stdout: {}, stderr: {})",
                output.exit_code,
                output.stdout.trim(),
                output.stderr.trim()
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prober_core::ProbeResult;

    fn sh(script: &str) -> Vec<String> {
        vec!["/bin/sh".to_string(), "-c".to_string(), script.to_string()]
    }

    async fn run(command: &[String], timeout: Duration) -> Result<ProbeOutcome> {
        let container = Container {
            name: "app".to_string(),
            ..Default::default()
        };
        CommandExecProber
            .probe(&Pod::default(), &container, command, timeout)
            .await
    }

    #[tokio::test]
    async fn test_exit_zero_is_success() {
        let outcome = run(&sh("echo healthy"), Duration::from_secs(5)).await.unwrap();
        assert_eq!(outcome.result, ProbeResult::Success);
        assert_eq!(outcome.output.trim(), "healthy");
    }

    #[tokio::test]
    async fn test_nonzero_exit_is_failure() {
        let outcome = run(&sh("echo unhealthy >&2; exit 3"), Duration::from_secs(5))
            .await
            .unwrap();
        assert_eq!(outcome.result, ProbeResult::Failure);
        assert!(outcome.output.contains("code 3"));
        assert!(outcome.output.contains("unhealthy"));
    }

    #[tokio::test]
    async fn test_timeout_is_failure() {
        let outcome = run(&sh("sleep 5"), Duration::from_millis(100)).await.unwrap();
        assert_eq!(outcome.result, ProbeResult::Failure);
        assert!(outcome.output.contains("timed out"));
    }

    #[tokio::test]
    async fn test_missing_program_is_error() {
        let command = vec!["/nonexistent/probe-binary".to_string()];
        let err = run(&command, Duration::from_secs(5)).await.unwrap_err();
        assert!(matches!(err, ProbeError::ExecFailed { .. }));
    }

    #[tokio::test]
    async fn test_empty_command_is_error() {
        let err = run(&[], Duration::from_secs(5)).await.unwrap_err();
        assert!(matches!(err, ProbeError::InvalidConfig { .. }));
    }
}
