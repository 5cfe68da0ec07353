use crate::request::join_host_port;
use prober_core::ProbeOutcome;
use std::time::Duration;
use tokio::net::TcpStream;
use tracing::debug;

/// Checks that a TCP port accepts connections
#[derive(Debug, Clone, Copy, Default)]
pub struct TcpProber;

impl TcpProber {
    pub fn new() -> Self {
        Self
    }

    /// Connect to `host:port` and close the connection straight away.
    /// Any dial error or an expired deadline is a failure.
    pub async fn probe(&self, host: &str, port: u16, timeout: Duration) -> ProbeOutcome {
        let addr = join_host_port(host, port);
        let dial_host = host.trim_start_matches('[').trim_end_matches(']');

        match tokio::time::timeout(timeout, TcpStream::connect((dial_host, port))).await {
            Ok(Ok(stream)) => {
                drop(stream);
                debug!("TCP probe connected to {}", addr);
                ProbeOutcome::success(format!("connected to {}", addr))
            }
            Ok(Err(e)) => ProbeOutcome::failure(format!("dial tcp {}: {}", addr, e)),
            Err(_) => ProbeOutcome::failure(format!(
                "dial tcp {}: i/o timeout after {:?}",
                addr, timeout
            )),
        }
    }
}
