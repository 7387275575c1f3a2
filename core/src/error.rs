//! Error types for the harness.
//!
//! # Design
//! Every failure a single test can hit maps to exactly one variant. Callers
//! match on `Assertion` to report which path diverged; `Transport`, `Parse`
//! and `Serialization` carry the underlying message only, since the source
//! errors are not useful beyond their text once a test has failed.

use thiserror::Error;

/// Errors produced while building, sending, or checking a request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HarnessError {
    /// The request never produced a response: DNS, TCP, TLS, or a malformed URL.
    #[error("transport failure: {0}")]
    Transport(String),

    /// The response did not satisfy an expectation.
    #[error("assertion failed at `{path}`: expected {expected}, got {actual}")]
    Assertion {
        path: String,
        expected: String,
        actual: String,
    },

    /// The response body was not valid JSON where JSON was expected.
    #[error("response body is not JSON: {0}")]
    Parse(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// Running the case panicked; carries the panic message.
    #[error("case panicked: {0}")]
    Panic(String),

    /// A configuration value could not be interpreted.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl HarnessError {
    pub(crate) fn assertion(
        path: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        HarnessError::Assertion {
            path: path.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assertion_message_names_path_expected_and_actual() {
        let err = HarnessError::assertion("data.id", "2", "3");
        assert_eq!(
            err.to_string(),
            "assertion failed at `data.id`: expected 2, got 3"
        );
    }

    #[test]
    fn transport_message_keeps_cause() {
        let err = HarnessError::Transport("connection refused".to_string());
        assert_eq!(err.to_string(), "transport failure: connection refused");
    }
}
