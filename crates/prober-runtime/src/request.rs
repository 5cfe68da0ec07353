use k8s_openapi::api::core::v1::HTTPHeader;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Url;
use std::borrow::Cow;
use tracing::{debug, warn};

/// Join host and port, bracketing IPv6 literals
pub fn join_host_port(host: &str, port: u16) -> String {
    if host.contains(':') && !host.starts_with('[') {
        format!("[{}]:{}", host, port)
    } else {
        format!("{}:{}", host, port)
    }
}

/// Build the probe URL as `scheme://host:port` followed by `path`.
///
/// A relative path gets its leading `/`, and an absolute URL given as the
/// path keeps only its path, query and fragment. Anything that still does
/// not parse is passed along unchanged; by the time a probe runs it is too
/// late to reject it, and the transport will report a failure if it really
/// is unusable.
pub fn format_url(scheme: &str, host: &str, port: u16, path: &str) -> String {
    let url = format!(
        "{}://{}{}",
        scheme,
        join_host_port(host, port),
        normalize_path(path)
    );
    if let Err(e) = Url::parse(&url) {
        debug!("Probe path {:?} does not form a valid URL ({}), using it as is", path, e);
    }
    url
}

fn normalize_path(path: &str) -> Cow<'_, str> {
    if path.is_empty() || path.starts_with(['/', '?', '#']) {
        return Cow::Borrowed(path);
    }

    if let Ok(absolute) = Url::parse(path) {
        if absolute.has_host() {
            let mut reference = absolute.path().to_string();
            if let Some(query) = absolute.query() {
                reference.push('?');
                reference.push_str(query);
            }
            if let Some(fragment) = absolute.fragment() {
                reference.push('#');
                reference.push_str(fragment);
            }
            return Cow::Owned(reference);
        }
    }

    Cow::Owned(format!("/{}", path))
}

/// Lowercased scheme, defaulting to `http`
pub fn normalize_scheme(scheme: Option<&str>) -> String {
    match scheme {
        Some(s) if !s.is_empty() => s.to_ascii_lowercase(),
        _ => "http".to_string(),
    }
}

/// Build a header map from the probe's header list.
///
/// Repeated names are appended. Entries that are not valid HTTP header
/// names or values are skipped.
pub fn build_headers(headers: Option<&[HTTPHeader]>) -> HeaderMap {
    let mut map = HeaderMap::new();
    for header in headers.unwrap_or_default() {
        let name = match HeaderName::from_bytes(header.name.as_bytes()) {
            Ok(name) => name,
            Err(e) => {
                warn!("Skipping probe header with invalid name {:?}: {}", header.name, e);
                continue;
            }
        };
        let value = match HeaderValue::from_str(&header.value) {
            Ok(value) => value,
            Err(e) => {
                warn!("Skipping probe header {} with invalid value: {}", name, e);
                continue;
            }
        };
        map.append(name, value);
    }
    map
}
