use super::HttpExecutor;
use prober_core::{HttpPostAction, ProbeOutcome};
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use std::time::Duration;

/// Payload of a POST probe
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostBody<'a> {
    Empty,
    /// URL-encoded form, sent as `application/x-www-form-urlencoded`
    Form(Vec<(&'a str, &'a str)>),
    /// Raw string, sent as `application/json`
    Raw(&'a str),
}

impl<'a> PostBody<'a> {
    /// Form data wins over a raw body when both are set
    pub fn from_action(action: &'a HttpPostAction) -> Self {
        if let Some(pairs) = action.form_pairs() {
            return PostBody::Form(pairs);
        }
        match action.body.as_deref() {
            Some(body) if !body.is_empty() => PostBody::Raw(body),
            _ => PostBody::Empty,
        }
    }
}

/// Runs HTTP POST checks
#[derive(Debug, Clone)]
pub struct HttpPostProber {
    executor: HttpExecutor,
}

impl HttpPostProber {
    pub fn new(executor: HttpExecutor) -> Self {
        Self { executor }
    }

    /// POST `body` to `url`. Caller headers override the defaulted
    /// `Content-Type`.
    pub async fn probe(
        &self,
        url: &str,
        headers: HeaderMap,
        body: &PostBody<'_>,
        timeout: Duration,
    ) -> ProbeOutcome {
        let request = self.executor.client().post(url).timeout(timeout);
        let request = match body {
            PostBody::Empty => request,
            PostBody::Form(pairs) => request.form(pairs),
            PostBody::Raw(raw) => request
                .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
                .body(raw.to_string()),
        };
        self.executor.execute(request, url, headers).await
    }
}
