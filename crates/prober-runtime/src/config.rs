/// Largest response body kept from an HTTP probe (10 KiB)
pub const MAX_RESPONSE_BODY_BYTES: usize = 10 * 1024;

/// User-Agent sent when the probe doesn't set one
pub const DEFAULT_USER_AGENT: &str = concat!("prober/", env!("CARGO_PKG_VERSION"));

/// Configuration for a [`Prober`](crate::Prober)
#[derive(Debug, Clone)]
pub struct ProberConfig {
    /// Follow redirects to other hosts. When false, such a redirect ends
    /// the probe with a warning.
    pub follow_non_local_redirects: bool,
    pub user_agent: String,
    /// Response bytes kept before silently truncating
    pub max_response_body_bytes: usize,
    /// Accept any TLS certificate presented by the target
    pub insecure_skip_tls_verify: bool,
}

impl Default for ProberConfig {
    fn default() -> Self {
        Self {
            follow_non_local_redirects: false,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            max_response_body_bytes: MAX_RESPONSE_BODY_BYTES,
            insecure_skip_tls_verify: true,
        }
    }
}
