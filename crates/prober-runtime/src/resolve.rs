use crate::error::{ProbeError, Result};
use k8s_openapi::api::core::v1::{Container, Pod};
use k8s_openapi::apimachinery::pkg::util::intstr::IntOrString;

/// The pod and container a probe runs against
#[derive(Debug, Clone, Copy)]
pub struct ProbeTarget<'a> {
    pub pod: &'a Pod,
    pub container: &'a Container,
}

impl<'a> ProbeTarget<'a> {
    /// Look up the probed container in the pod spec
    pub fn resolve(pod: Option<&'a Pod>, container_name: &str) -> Result<Self> {
        let pod = pod.ok_or_else(|| ProbeError::invalid_target("invalid pod"))?;

        let container = pod
            .spec
            .as_ref()
            .and_then(|spec| spec.containers.iter().find(|c| c.name == container_name))
            .ok_or_else(|| {
                ProbeError::invalid_target(format!("container {} not found", container_name))
            })?;

        Ok(Self { pod, container })
    }

    pub fn port(&self, port: &IntOrString) -> Result<u16> {
        resolve_port(port, self.container)
    }

    pub fn host(&self, host: Option<&str>) -> Result<String> {
        resolve_host(host, self.pod)
    }
}

/// Resolve a numeric or named port against the container's declared ports.
///
/// Numbers are taken as-is. Names are matched against `ports[].name` in
/// declaration order; if none match, the name is parsed as a decimal number.
/// The range check runs last, so a port found by name can still be rejected
/// as an invalid number.
pub fn resolve_port(port: &IntOrString, container: &Container) -> Result<u16> {
    let number = match port {
        IntOrString::Int(n) => i64::from(*n),
        IntOrString::String(name) => match find_port_by_name(container, name) {
            Some(n) => i64::from(n),
            None => name
                .parse::<i64>()
                .map_err(|_| ProbeError::port_not_found(name))?,
        },
    };

    u16::try_from(number)
        .ok()
        .filter(|p| *p > 0)
        .ok_or_else(|| ProbeError::invalid_port(number))
}

/// Find a declared container port by name
pub fn find_port_by_name(container: &Container, port_name: &str) -> Option<i32> {
    container
        .ports
        .as_deref()
        .unwrap_or_default()
        .iter()
        .find(|p| p.name.as_deref() == Some(port_name))
        .map(|p| p.container_port)
}

/// Host a network probe dials: the explicit host, else the pod IP
pub fn resolve_host(host: Option<&str>, pod: &Pod) -> Result<String> {
    if let Some(host) = host.filter(|h| !h.is_empty()) {
        return Ok(host.to_string());
    }

    pod.status
        .as_ref()
        .and_then(|s| s.pod_ip.as_deref())
        .filter(|ip| !ip.is_empty())
        .map(str::to_string)
        .ok_or_else(|| ProbeError::invalid_target("pod has no IP address and no host was given"))
}

/// Human-readable pod identity, `name_namespace(uid)`.
///
/// Underscore is not valid in a pod name, so the result is unambiguous.
pub fn format_pod(pod: Option<&Pod>) -> String {
    match pod {
        Some(pod) => format!(
            "{}_{}({})",
            pod.metadata.name.as_deref().unwrap_or_default(),
            pod.metadata.namespace.as_deref().unwrap_or_default(),
            pod.metadata.uid.as_deref().unwrap_or_default()
        ),
        None => "<nil>".to_string(),
    }
}
