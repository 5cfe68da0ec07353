use k8s_openapi::api::core::v1::{ExecAction, HTTPGetAction, HTTPHeader, TCPSocketAction};
use k8s_openapi::apimachinery::pkg::util::intstr::IntOrString;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Declarative description of a single health check.
///
/// This is the document shape accepted on the wire: every arm is optional so
/// that it round-trips with Kubernetes-style manifests. Exactly one arm is
/// expected to be set; [`ProbeHandler::select`] turns it into the typed form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Handler {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exec: Option<ExecAction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http_get: Option<HTTPGetAction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http_post: Option<HttpPostAction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tcp_socket: Option<TCPSocketAction>,
}

/// An HTTP POST check. Mirrors `HTTPGetAction` with an optional payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpPostAction {
    /// Path to access on the HTTP server
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Name or number of the port to access on the container
    pub port: IntOrString,
    /// Host name to connect to, defaults to the pod IP
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    /// Scheme to use for connecting to the host, defaults to HTTP
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheme: Option<String>,
    /// Custom headers to set in the request. Repeated names are allowed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http_headers: Option<Vec<HTTPHeader>>,
    /// Raw request body, sent as `application/json`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    /// Form values, sent URL-encoded. Takes precedence over `body`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub form: Option<BTreeMap<String, Vec<String>>>,
}

impl HttpPostAction {
    /// Flatten the form into `(name, value)` pairs in key order
    pub fn form_pairs(&self) -> Option<Vec<(&str, &str)>> {
        self.form.as_ref().map(|form| {
            form.iter()
                .flat_map(|(name, values)| {
                    values.iter().map(move |v| (name.as_str(), v.as_str()))
                })
                .collect()
        })
    }
}

/// The typed form of a [`Handler`]: exactly one action.
#[derive(Debug, Clone, PartialEq)]
pub enum ProbeHandler {
    Exec(ExecAction),
    HttpGet(HTTPGetAction),
    HttpPost(HttpPostAction),
    TcpSocket(TCPSocketAction),
}

impl ProbeHandler {
    /// Pick the action to run. The order exec, httpGet, httpPost, tcpSocket
    /// is fixed; lower-priority arms are ignored when several are set.
    pub fn select(handler: &Handler) -> Option<Self> {
        if let Some(exec) = &handler.exec {
            return Some(ProbeHandler::Exec(exec.clone()));
        }
        if let Some(get) = &handler.http_get {
            return Some(ProbeHandler::HttpGet(get.clone()));
        }
        if let Some(post) = &handler.http_post {
            return Some(ProbeHandler::HttpPost(post.clone()));
        }
        handler
            .tcp_socket
            .as_ref()
            .map(|tcp| ProbeHandler::TcpSocket(tcp.clone()))
    }

    /// Wire name of the selected arm
    pub fn kind(&self) -> &'static str {
        match self {
            ProbeHandler::Exec(_) => "exec",
            ProbeHandler::HttpGet(_) => "httpGet",
            ProbeHandler::HttpPost(_) => "httpPost",
            ProbeHandler::TcpSocket(_) => "tcpSocket",
        }
    }

    /// Port reference of the network arms
    pub fn port(&self) -> Option<&IntOrString> {
        match self {
            ProbeHandler::Exec(_) => None,
            ProbeHandler::HttpGet(get) => Some(&get.port),
            ProbeHandler::HttpPost(post) => Some(&post.port),
            ProbeHandler::TcpSocket(tcp) => Some(&tcp.port),
        }
    }
}

impl From<ProbeHandler> for Handler {
    fn from(handler: ProbeHandler) -> Self {
        match handler {
            ProbeHandler::Exec(exec) => Handler {
                exec: Some(exec),
                ..Default::default()
            },
            ProbeHandler::HttpGet(get) => Handler {
                http_get: Some(get),
                ..Default::default()
            },
            ProbeHandler::HttpPost(post) => Handler {
                http_post: Some(post),
                ..Default::default()
            },
            ProbeHandler::TcpSocket(tcp) => Handler {
                tcp_socket: Some(tcp),
                ..Default::default()
            },
        }
    }
}
