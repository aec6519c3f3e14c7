//! Error types for the Anthropic client.

use thiserror::Error;

/// Result type for Anthropic client operations.
pub type Result<T> = std::result::Result<T, AnthropicError>;

/// Anthropic client errors.
///
/// Variants are classified so callers (and the built-in retry loop) can
/// distinguish failures worth retrying from ones that will never succeed:
/// rate limits, server errors, timeouts, and transport failures are
/// transient; malformed requests and bad credentials are not.
#[derive(Debug, Error)]
pub enum AnthropicError {
    /// Configuration error (missing API key, invalid settings)
    #[error("Configuration error: {0}")]
    Config(String),

    /// The request was rejected as malformed (HTTP 400/404/413/422)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// API key missing, invalid, or lacking permission (HTTP 401/403)
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// Rate limit exceeded (HTTP 429)
    #[error("Rate limited: {0}")]
    RateLimited(String),

    /// Server-side failure, including overload (HTTP 5xx and 529)
    #[error("Server error: {0}")]
    Server(String),

    /// The per-attempt deadline elapsed before a response arrived
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// Network error (connection failed, DNS, TLS)
    #[error("Network error: {0}")]
    Network(String),

    /// Parse error (invalid JSON, unexpected response format)
    #[error("Parse error: {0}")]
    Parse(String),
}

impl AnthropicError {
    /// Whether a fresh attempt at the same request could plausibly succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            AnthropicError::RateLimited(_)
                | AnthropicError::Server(_)
                | AnthropicError::Timeout(_)
                | AnthropicError::Network(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_classification() {
        assert!(AnthropicError::RateLimited("429".into()).is_retryable());
        assert!(AnthropicError::Server("overloaded".into()).is_retryable());
        assert!(AnthropicError::Timeout("120s".into()).is_retryable());
        assert!(AnthropicError::Network("connection reset".into()).is_retryable());

        assert!(!AnthropicError::InvalidRequest("bad field".into()).is_retryable());
        assert!(!AnthropicError::Authentication("bad key".into()).is_retryable());
        assert!(!AnthropicError::Config("no key".into()).is_retryable());
        assert!(!AnthropicError::Parse("bad json".into()).is_retryable());
    }
}
