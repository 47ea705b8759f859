//! AI client error types.

use thiserror::Error;

/// Errors that can occur when talking to the AI service.
#[derive(Debug, Error)]
pub enum AiError {
    /// The HTTP client could not be constructed.
    #[error("failed to build AI client: {0}")]
    Client(String),

    /// The request exceeded the configured timeout.
    #[error("AI request timed out after {0}s")]
    Timeout(u64),

    /// A connection or transport error occurred.
    #[error("network error: {0}")]
    Network(String),

    /// The service answered with a non-success status.
    #[error("AI API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    /// The body could not be decoded into the expected shape.
    #[error("malformed AI response: {0}")]
    MalformedResponse(String),

    /// `evaluate` returned a different number of results than items sent.
    #[error("AI returned {actual} results for {expected} items")]
    ResultCountMismatch { expected: usize, actual: usize },
}

impl AiError {
    /// Whether a later attempt might succeed.
    ///
    /// Timeouts, transport failures, rate limiting and 5xx responses are
    /// transient; everything else is returned to the caller immediately.
    pub fn is_transient(&self) -> bool {
        match self {
            AiError::Timeout(_) | AiError::Network(_) => true,
            AiError::Api { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_transient_errors() {
        assert!(AiError::Timeout(5).is_transient());
        assert!(AiError::Network("reset".into()).is_transient());
        assert!(AiError::Api { status: 503, message: String::new() }.is_transient());
        assert!(AiError::Api { status: 429, message: String::new() }.is_transient());
        assert!(!AiError::Api { status: 422, message: String::new() }.is_transient());
        assert!(!AiError::MalformedResponse("x".into()).is_transient());
        assert!(!AiError::ResultCountMismatch { expected: 2, actual: 1 }.is_transient());
    }
}
