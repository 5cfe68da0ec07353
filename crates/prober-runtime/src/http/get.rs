use super::HttpExecutor;
use prober_core::ProbeOutcome;
use reqwest::header::HeaderMap;
use std::time::Duration;

/// Runs HTTP GET checks
#[derive(Debug, Clone)]
pub struct HttpGetProber {
    executor: HttpExecutor,
}

impl HttpGetProber {
    pub fn new(executor: HttpExecutor) -> Self {
        Self { executor }
    }

    /// GET `url`. Any 2xx response is a success.
    pub async fn probe(&self, url: &str, headers: HeaderMap, timeout: Duration) -> ProbeOutcome {
        let request = self.executor.client().get(url).timeout(timeout);
        self.executor.execute(request, url, headers).await
    }
}
