use miette::Diagnostic;
use thiserror::Error;

/// Pre-flight errors for a single probe attempt.
///
/// Network-level problems are never reported through this type; they are
/// folded into `ProbeResult::Failure` at the transport boundary.
#[derive(Error, Debug, Diagnostic)]
pub enum ProbeError {
    /// Handler has none of its four actions set
    #[error("missing probe handler for {pod}:{container_name}")]
    #[diagnostic(
        code(prober::runtime::missing_handler),
        help("Set exactly one of `exec`, `httpGet`, `httpPost` or `tcpSocket` on the handler")
    )]
    MissingHandler {
        #[allow(unused)]
        pod: String,
        #[allow(unused)]
        container_name: String,
    },

    /// Pod or container needed to resolve the probe target is absent
    #[error("failed to resolve probe target: {reason}")]
    #[diagnostic(
        code(prober::runtime::invalid_target),
        help("Pass the pod the probe belongs to, and make sure the container name matches its spec")
    )]
    InvalidTarget {
        #[allow(unused)]
        reason: String,
    },

    /// Named port is not declared and is not a number either
    #[error("port {port_name} not found")]
    #[diagnostic(
        code(prober::runtime::port_not_found),
        help("Declare a port named '{port_name}' under the container's `ports`, or use a port number")
    )]
    PortNotFound {
        #[allow(unused)]
        port_name: String,
    },

    /// Resolved port is outside 1..=65535
    #[error("invalid port number: {port}")]
    #[diagnostic(
        code(prober::runtime::invalid_port),
        help("Port numbers must be in the range 1 to 65535")
    )]
    InvalidPort {
        #[allow(unused)]
        port: i64,
    },

    /// Invalid configuration
    #[error("Invalid configuration: {message}")]
    #[diagnostic(code(prober::runtime::invalid_config), help("{suggestion}"))]
    InvalidConfig {
        #[allow(unused)]
        message: String,
        #[allow(unused)]
        suggestion: String,
    },

    /// The exec collaborator could not run the command at all
    #[error("exec probe '{command}' could not be run: {message}")]
    #[diagnostic(
        code(prober::runtime::exec_failed),
        help("Verify the command exists in the target environment and is executable")
    )]
    ExecFailed {
        #[allow(unused)]
        command: String,
        #[allow(unused)]
        message: String,
    },

    /// HTTP client construction failed
    #[error("failed to build HTTP client: {message}")]
    #[diagnostic(
        code(prober::runtime::client_build_failed),
        help("This usually means the TLS backend could not be initialized")
    )]
    ClientBuildFailed {
        #[allow(unused)]
        message: String,
    },
}

/// Result type alias for probe operations
pub type Result<T> = std::result::Result<T, ProbeError>;

impl ProbeError {
    pub fn missing_handler(pod: impl Into<String>, container_name: impl Into<String>) -> Self {
        Self::MissingHandler {
            pod: pod.into(),
            container_name: container_name.into(),
        }
    }

    pub fn invalid_target(reason: impl Into<String>) -> Self {
        Self::InvalidTarget {
            reason: reason.into(),
        }
    }

    pub fn port_not_found(port_name: impl Into<String>) -> Self {
        Self::PortNotFound {
            port_name: port_name.into(),
        }
    }

    pub fn invalid_port(port: i64) -> Self {
        Self::InvalidPort { port }
    }

    pub fn invalid_config(message: impl Into<String>, suggestion: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
            suggestion: suggestion.into(),
        }
    }

    pub fn exec_failed(command: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ExecFailed {
            command: command.into(),
            message: message.into(),
        }
    }

    pub fn client_build_failed(message: impl Into<String>) -> Self {
        Self::ClientBuildFailed {
            message: message.into(),
        }
    }
}
