use crate::config::ProberConfig;
use crate::error::{ProbeError, Result};
use crate::exec::{CommandExecProber, ExecProber};
use crate::http::{HttpExecutor, HttpGetProber, HttpPostProber, PostBody};
use crate::request::{build_headers, format_url, normalize_scheme};
use crate::resolve::{format_pod, ProbeTarget};
use crate::tcp::TcpProber;
use k8s_openapi::api::core::v1::Pod;
use prober_core::{Handler, ProbeHandler, ProbeOutcome};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Runs exec, httpGet, httpPost or tcpSocket probes, one attempt per call.
///
/// Holds only immutable state, so one `Prober` can serve concurrent callers.
pub struct Prober {
    http_get: HttpGetProber,
    http_post: HttpPostProber,
    tcp: TcpProber,
    exec: Arc<dyn ExecProber>,
}

impl Prober {
    pub fn new(config: ProberConfig, exec: Arc<dyn ExecProber>) -> Result<Self> {
        let executor = HttpExecutor::new(&config)?;
        Ok(Self {
            http_get: HttpGetProber::new(executor.clone()),
            http_post: HttpPostProber::new(executor),
            tcp: TcpProber::new(),
            exec,
        })
    }

    /// Default configuration with local-process exec probes
    pub fn with_defaults() -> Result<Self> {
        Self::new(ProberConfig::default(), Arc::new(CommandExecProber))
    }

    /// Probe `container_name` in `pod` once using `handler`.
    ///
    /// `Err` means the probe could not be attempted (no action set, missing
    /// pod or container, bad port). Network problems are reported as
    /// `ProbeResult::Failure` instead.
    pub async fn run_probe(
        &self,
        handler: &Handler,
        pod: Option<&Pod>,
        container_name: &str,
        timeout: Duration,
    ) -> Result<ProbeOutcome> {
        let Some(handler) = ProbeHandler::select(handler) else {
            warn!(
                "Failed to find probe handler for container {} in pod {}",
                container_name,
                format_pod(pod)
            );
            return Err(ProbeError::missing_handler(format_pod(pod), container_name));
        };
        self.run(&handler, pod, container_name, timeout).await
    }

    /// Like [`run_probe`](Self::run_probe), for an already selected action
    pub async fn run(
        &self,
        handler: &ProbeHandler,
        pod: Option<&Pod>,
        container_name: &str,
        timeout: Duration,
    ) -> Result<ProbeOutcome> {
        let target = ProbeTarget::resolve(pod, container_name)?;
        let start = Instant::now();

        let outcome = match tokio::time::timeout(timeout, self.dispatch(handler, target, timeout))
            .await
        {
            Ok(outcome) => outcome?,
            Err(_) => ProbeOutcome::failure(format!("probe timed out after {:?}", timeout)),
        };

        debug!(
            "{} probe for container {} finished in {:?}: {}",
            handler.kind(),
            container_name,
            start.elapsed(),
            outcome.result
        );
        Ok(outcome)
    }

    async fn dispatch(
        &self,
        handler: &ProbeHandler,
        target: ProbeTarget<'_>,
        timeout: Duration,
    ) -> Result<ProbeOutcome> {
        match handler {
            ProbeHandler::Exec(exec) => {
                let command = exec.command.as_deref().unwrap_or_default();
                debug!(
                    "Exec-Probe Pod: {}, Container: {}, Command: {:?}",
                    format_pod(Some(target.pod)),
                    target.container.name,
                    command
                );
                self.exec
                    .probe(target.pod, target.container, command, timeout)
                    .await
            }
            ProbeHandler::HttpGet(get) => {
                let port = target.port(&get.port)?;
                let host = target.host(get.host.as_deref())?;
                let scheme = normalize_scheme(get.scheme.as_deref());
                let path = get.path.as_deref().unwrap_or_default();
                debug!(
                    "HTTP-Probe Host: {}://{}, Port: {}, Path: {}",
                    scheme, host, port, path
                );
                let url = format_url(&scheme, &host, port, path);
                let headers = build_headers(get.http_headers.as_deref());
                debug!("HTTP-Probe Headers: {:?}", headers);
                Ok(self.http_get.probe(&url, headers, timeout).await)
            }
            ProbeHandler::HttpPost(post) => {
                let port = target.port(&post.port)?;
                let host = target.host(post.host.as_deref())?;
                let scheme = normalize_scheme(post.scheme.as_deref());
                let path = post.path.as_deref().unwrap_or_default();
                debug!(
                    "HTTP-Probe Host: {}://{}, Port: {}, Path: {}",
                    scheme, host, port, path
                );
                let url = format_url(&scheme, &host, port, path);
                let headers = build_headers(post.http_headers.as_deref());
                debug!("HTTP-Probe Headers: {:?}", headers);
                let body = PostBody::from_action(post);
                Ok(self.http_post.probe(&url, headers, &body, timeout).await)
            }
            ProbeHandler::TcpSocket(tcp) => {
                let port = target.port(&tcp.port)?;
                let host = target.host(tcp.host.as_deref())?;
                debug!(
                    "TCP-Probe Host: {}, Port: {}, Timeout: {:?}",
                    host, port, timeout
                );
                Ok(self.tcp.probe(&host, port, timeout).await)
            }
        }
    }
}
