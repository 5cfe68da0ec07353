// Allow unused assignments for diagnostic fields - they're used by the thiserror/miette macros
#![allow(unused_assignments)]

pub mod config;
pub mod error;
pub mod exec;
pub mod http;
pub mod mock;
pub mod prober;
pub mod request;
pub mod resolve;
pub mod tcp;

// Re-export primary types
pub use config::{ProberConfig, DEFAULT_USER_AGENT, MAX_RESPONSE_BODY_BYTES};
pub use error::{ProbeError, Result};
pub use exec::{CommandExecProber, CommandOutput, ExecProber};
pub use http::{
    classify_status, HttpExecutor, HttpGetProber, HttpPostProber, PostBody, RedirectPolicy,
};
pub use mock::MockExecProber;
pub use prober::Prober;
pub use request::{build_headers, format_url, join_host_port};
pub use resolve::{find_port_by_name, resolve_port, ProbeTarget};
pub use tcp::TcpProber;

// Re-export core types callers need alongside the prober
pub use prober_core::{Handler, HttpPostAction, ProbeHandler, ProbeOutcome, ProbeResult};
