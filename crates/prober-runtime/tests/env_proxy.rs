//! Proxy environment variables must not affect HTTP checks.
//!
//! Lives in its own test binary because it changes the process environment.

use axum::routing::get;
use axum::Router;
use prober_runtime::{HttpExecutor, HttpGetProber, ProbeResult, ProberConfig};
use reqwest::header::HeaderMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

#[tokio::test]
async fn test_http_get_ignores_proxy_environment() {
    // Anything connecting here would have been routed through the proxy
    let proxy = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let proxy_addr = proxy.local_addr().unwrap();
    let proxied = Arc::new(AtomicUsize::new(0));
    let counter = proxied.clone();
    tokio::spawn(async move {
        while let Ok((stream, _)) = proxy.accept().await {
            counter.fetch_add(1, Ordering::SeqCst);
            drop(stream);
        }
    });

    let target = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let target_addr = target.local_addr().unwrap();
    let router = Router::new().route("/healthz", get(|| async { "ok" }));
    tokio::spawn(async move {
        axum::serve(target, router).await.unwrap();
    });

    let proxy_url = format!("http://{}", proxy_addr);
    for var in ["HTTP_PROXY", "http_proxy", "HTTPS_PROXY", "https_proxy", "ALL_PROXY", "all_proxy"] {
        std::env::set_var(var, &proxy_url);
    }
    for var in ["NO_PROXY", "no_proxy"] {
        std::env::remove_var(var);
    }

    let executor = HttpExecutor::new(&ProberConfig::default()).unwrap();
    let prober = HttpGetProber::new(executor);
    let url = format!("http://{}/healthz", target_addr);

    let outcome = prober
        .probe(&url, HeaderMap::new(), Duration::from_secs(5))
        .await;

    assert_eq!(outcome.result, ProbeResult::Success, "{}", outcome.output);
    assert_eq!(outcome.output, "ok");
    assert_eq!(proxied.load(Ordering::SeqCst), 0);
}
