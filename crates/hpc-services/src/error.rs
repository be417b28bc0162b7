//! Error types for external service calls
//!
//! Errors are cloneable so they can be kept in request state and published
//! to observers.

/// External service failure
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ServiceError {
    /// The service could not be reached
    #[error("service unreachable: {0}")]
    Network(String),

    /// The service answered with a non-success status
    #[error("service returned {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body text
        body: String,
    },

    /// The response body could not be decoded
    #[error("malformed response: {0}")]
    Decode(String),

    /// The completion backend of the LLM validator failed
    #[error("completion backend failed: {0}")]
    Backend(String),
}

impl ServiceError {
    /// Whether a later identical call might succeed
    ///
    /// Informational only; calls are never retried automatically.
    #[inline]
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network(_) | Self::Backend(_) => true,
            Self::Status { status, .. } => *status >= 500,
            Self::Decode(_) => false,
        }
    }
}

impl From<reqwest::Error> for ServiceError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retryable_classification() {
        assert!(ServiceError::Network("refused".into()).is_retryable());
        assert!(ServiceError::Status { status: 503, body: String::new() }.is_retryable());
        assert!(!ServiceError::Status { status: 400, body: String::new() }.is_retryable());
        assert!(!ServiceError::Decode("eof".into()).is_retryable());
    }

    #[test]
    fn status_display_includes_body() {
        let err = ServiceError::Status {
            status: 400,
            body: "Invalid YAML content".into(),
        };
        assert_eq!(err.to_string(), "service returned 400: Invalid YAML content");
    }
}
