//! HTTP probes.
//!
//! `GET` and `POST` probes share one client and one execution path: the
//! wrappers only build the request, [`HttpExecutor::execute`] sends it,
//! bounds the response body and classifies the status code.

pub mod get;
pub mod post;
pub mod redirect;

pub use get::HttpGetProber;
pub use post::{HttpPostProber, PostBody};
pub use redirect::{RedirectPolicy, MAX_REDIRECTS};

use crate::config::ProberConfig;
use crate::error::{ProbeError, Result};
use prober_core::{ProbeOutcome, ProbeResult};
use reqwest::header::{HeaderMap, HeaderValue, HOST, USER_AGENT};
use reqwest::{Client, RequestBuilder, Response};
use tracing::{debug, info};

/// Shared HTTP client plus the per-response policy
#[derive(Debug, Clone)]
pub struct HttpExecutor {
    client: Client,
    user_agent: HeaderValue,
    max_body_bytes: usize,
}

impl HttpExecutor {
    pub fn new(config: &ProberConfig) -> Result<Self> {
        let user_agent = HeaderValue::from_str(&config.user_agent).map_err(|e| {
            ProbeError::invalid_config(
                format!("user agent {:?} is not a valid header value: {}", config.user_agent, e),
                "Use printable ASCII characters in the user agent",
            )
        })?;

        // Probes must not go through the node's proxy or reuse connections.
        let client = Client::builder()
            .redirect(RedirectPolicy::new(config.follow_non_local_redirects).into_policy())
            .danger_accept_invalid_certs(config.insecure_skip_tls_verify)
            .no_proxy()
            .pool_max_idle_per_host(0)
            .build()
            .map_err(|e| ProbeError::client_build_failed(e.to_string()))?;

        Ok(Self {
            client,
            user_agent,
            max_body_bytes: config.max_response_body_bytes,
        })
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Send `request` with `headers` applied and classify the response.
    ///
    /// Transport errors (refused, timed out, TLS, redirect loop) become a
    /// `Failure` carrying the error text; they are never returned as errors.
    pub async fn execute(
        &self,
        request: RequestBuilder,
        url: &str,
        mut headers: HeaderMap,
    ) -> ProbeOutcome {
        if !headers.contains_key(USER_AGENT) {
            headers.insert(USER_AGENT, self.user_agent.clone());
        }
        if let Some(host) = headers.get(HOST) {
            debug!("Probe for {} uses Host {:?}", url, host);
        }

        let request = match request.headers(headers.clone()).build() {
            Ok(request) => request,
            Err(e) => return ProbeOutcome::failure(error_chain(&e)),
        };

        let mut response = match self.client.execute(request).await {
            Ok(response) => response,
            Err(e) => return ProbeOutcome::failure(error_chain(&e)),
        };

        let status = response.status().as_u16();
        let body = match read_at_most(&mut response, self.max_body_bytes).await {
            Ok(body) => body,
            Err(e) => return ProbeOutcome::failure(error_chain(&e)),
        };
        if body.truncated {
            info!(
                "Non fatal body truncation for {}, status {}, kept {} bytes",
                url,
                status,
                body.bytes.len()
            );
        }
        let body = String::from_utf8_lossy(&body.bytes).into_owned();

        match classify_status(status) {
            ProbeResult::Success => {
                info!("Probe succeeded for {}, status {}", url, status);
                ProbeOutcome::success(body)
            }
            ProbeResult::Warning => {
                info!("Probe terminated redirects for {}, status {}", url, status);
                ProbeOutcome::warning(body)
            }
            _ => {
                info!(
                    "Probe failed for {} with request headers {:?}, response body: {}",
                    url, headers, body
                );
                ProbeOutcome::failure(format!("HTTP probe failed with statuscode: {}", status))
            }
        }
    }
}

/// Map an HTTP status code to a probe result.
///
/// 2xx is success, 3xx a warning (a redirect the client did not follow),
/// everything else a failure.
pub fn classify_status(code: u16) -> ProbeResult {
    match code {
        200..=299 => ProbeResult::Success,
        300..=399 => ProbeResult::Warning,
        _ => ProbeResult::Failure,
    }
}

/// Response body cut at the byte budget
#[derive(Debug)]
pub struct BoundedBody {
    pub bytes: Vec<u8>,
    /// More bytes were available than were kept
    pub truncated: bool,
}

/// Read at most `limit` bytes of the body, discarding the rest
pub async fn read_at_most(response: &mut Response, limit: usize) -> reqwest::Result<BoundedBody> {
    let mut bytes = Vec::new();
    while let Some(chunk) = response.chunk().await? {
        let remaining = limit - bytes.len();
        if chunk.len() > remaining {
            bytes.extend_from_slice(&chunk[..remaining]);
            return Ok(BoundedBody {
                bytes,
                truncated: true,
            });
        }
        bytes.extend_from_slice(&chunk);
    }
    Ok(BoundedBody {
        bytes,
        truncated: false,
    })
}

/// Error message followed by its sources, `outer: inner: root`
pub(crate) fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

#[cfg(test)]
pub(crate) mod testutil {
    use std::net::SocketAddr;
    use tokio::net::TcpListener;

    /// Serve `router` on an ephemeral localhost port
    pub async fn serve(router: axum::Router) -> SocketAddr {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        addr
    }
}
