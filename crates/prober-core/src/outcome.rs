use serde::{Deserialize, Serialize};

/// Classified result of a single probe attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProbeResult {
    /// The probe could not be attempted
    Unknown,
    Success,
    Failure,
    /// An HTTP redirect that was not followed
    Warning,
}

impl std::fmt::Display for ProbeResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProbeResult::Unknown => write!(f, "unknown"),
            ProbeResult::Success => write!(f, "success"),
            ProbeResult::Failure => write!(f, "failure"),
            ProbeResult::Warning => write!(f, "warning"),
        }
    }
}

/// Outcome of a single probe, with a best-effort diagnostic
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbeOutcome {
    pub result: ProbeResult,
    /// Response body, command output or error text
    pub output: String,
}

impl ProbeOutcome {
    pub fn new(result: ProbeResult, output: impl Into<String>) -> Self {
        Self {
            result,
            output: output.into(),
        }
    }

    pub fn success(output: impl Into<String>) -> Self {
        Self::new(ProbeResult::Success, output)
    }

    pub fn failure(output: impl Into<String>) -> Self {
        Self::new(ProbeResult::Failure, output)
    }

    pub fn warning(output: impl Into<String>) -> Self {
        Self::new(ProbeResult::Warning, output)
    }

    /// Outcome to report for a probe that failed pre-flight
    pub fn unknown(err: &dyn std::error::Error) -> Self {
        Self::new(ProbeResult::Unknown, err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_display() {
        assert_eq!(ProbeResult::Unknown.to_string(), "unknown");
        assert_eq!(ProbeResult::Warning.to_string(), "warning");
    }

    #[test]
    fn test_outcome_serializes_lowercase_result() {
        let outcome = ProbeOutcome::failure("HTTP probe failed with statuscode: 503");
        let json = serde_json::to_string(&outcome).unwrap();
        assert_eq!(
            json,
            r#"{"result":"failure","output":"HTTP probe failed with statuscode: 503"}"#
        );
    }

    #[test]
    fn test_unknown_carries_error_text() {
        let err = std::io::Error::new(std::io::ErrorKind::Other, "invalid port number: 0");
        let outcome = ProbeOutcome::unknown(&err);
        assert_eq!(outcome.result, ProbeResult::Unknown);
        assert_eq!(outcome.output, "invalid port number: 0");
    }
}
