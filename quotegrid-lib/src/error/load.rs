//! Page load error types

use std::time::Duration;

/// Errors that end a single page load.
///
/// Both variants are recoverable: the caller re-submits the same view state
/// to try again. The type is `Clone` so it can be held inside
/// [`RequestState`](crate::api::RequestState).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoadError {
    /// Transport-level failure: connection error, timeout or non-2xx status.
    #[error("Network failure: {message}")]
    NetworkFailure {
        /// HTTP status code, when the server answered.
        status: Option<u16>,
        /// Error message.
        message: String,
    },

    /// The response body did not match the `{ data, total }` contract.
    #[error("Parse failure: {message}")]
    ParseFailure {
        /// Description of the shape violation.
        message: String,
        /// Raw response body, if available.
        body: Option<String>,
    },
}

impl LoadError {
    /// Creates a network failure without a status code.
    pub fn network(message: impl Into<String>) -> Self {
        Self::NetworkFailure {
            status: None,
            message: message.into(),
        }
    }

    /// Creates a network failure for a non-success HTTP status.
    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self::NetworkFailure {
            status: Some(status),
            message: message.into(),
        }
    }

    /// Creates a network failure for a request that exceeded its timeout.
    pub fn timeout(after: Duration) -> Self {
        Self::network(format!("Timeout after {:?}", after))
    }

    /// Creates a new parse failure.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::ParseFailure {
            message: message.into(),
            body: None,
        }
    }

    /// Creates a new parse failure with the raw response body.
    pub fn parse_with_body(message: impl Into<String>, body: impl Into<String>) -> Self {
        Self::ParseFailure {
            message: message.into(),
            body: Some(body.into()),
        }
    }

    /// Returns `true` if this is a transport-level failure.
    pub fn is_network(&self) -> bool {
        matches!(self, Self::NetworkFailure { .. })
    }

    /// Returns `true` if this is a response shape violation.
    pub fn is_parse(&self) -> bool {
        matches!(self, Self::ParseFailure { .. })
    }

    /// Returns the HTTP status code if the server answered with an error.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::NetworkFailure { status, .. } => *status,
            Self::ParseFailure { .. } => None,
        }
    }
}

impl From<reqwest::Error> for LoadError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            return Self::parse(err.to_string());
        }
        Self::NetworkFailure {
            status: err.status().map(|s| s.as_u16()),
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_predicates() {
        let err = LoadError::http(500, "boom");
        assert!(err.is_network());
        assert!(!err.is_parse());
        assert_eq!(err.status_code(), Some(500));

        let err = LoadError::parse("missing data");
        assert!(err.is_parse());
        assert_eq!(err.status_code(), None);
    }

    #[test]
    fn test_timeout_is_network_failure() {
        let err = LoadError::timeout(Duration::from_secs(10));
        assert!(err.is_network());
        assert_eq!(err.to_string(), "Network failure: Timeout after 10s");
    }
}
