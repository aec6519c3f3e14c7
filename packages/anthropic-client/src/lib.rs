//! Pure Anthropic REST API client
//!
//! A clean, minimal client for the Anthropic Messages API with no
//! domain-specific logic. Handles authentication headers, retry with
//! exponential backoff, and error classification.
//!
//! # Example
//!
//! ```rust,ignore
//! use anthropic_client::{AnthropicClient, MessagesRequest, Message};
//!
//! let client = AnthropicClient::from_env()?;
//!
//! let response = client.messages(&MessagesRequest::new("claude-3-5-sonnet-20241022")
//!     .max_tokens(1024)
//!     .system("You are a helpful assistant")
//!     .message(Message::user("Hello!")))
//!     .await?;
//!
//! println!("{}", response.text());
//! ```

pub mod error;
pub mod types;

pub use error::{AnthropicError, Result};
pub use types::*;

use std::time::Duration;

use reqwest::{Client, StatusCode};
use tracing::{debug, warn};

/// Default API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";

/// API version header value.
pub const API_VERSION: &str = "2023-06-01";

/// Default per-attempt timeout (generation can be slow for large outputs).
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Default number of attempts per request (first try plus retries).
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Pure Anthropic API client.
#[derive(Clone)]
pub struct AnthropicClient {
    http_client: Client,
    api_key: String,
    base_url: String,
    max_retries: u32,
}

impl AnthropicClient {
    /// Create a new Anthropic client with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_timeout(api_key, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Create a client with a custom per-attempt timeout.
    ///
    /// The timeout is applied at the HTTP client level, so it bounds each
    /// individual attempt rather than the whole retry sequence.
    pub fn with_timeout(api_key: impl Into<String>, timeout: Duration) -> Self {
        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            http_client,
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }

    /// Create from environment variable `ANTHROPIC_API_KEY`.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("ANTHROPIC_API_KEY")
            .map_err(|_| AnthropicError::Config("ANTHROPIC_API_KEY not set".into()))?;
        if api_key.trim().is_empty() {
            return Err(AnthropicError::Config("ANTHROPIC_API_KEY is empty".into()));
        }
        Ok(Self::new(api_key))
    }

    /// Set a custom base URL (for proxies and test servers).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the maximum number of attempts per request.
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries.max(1);
        self
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Send a Messages API request.
    ///
    /// Retries transient failures (rate limits, server errors, timeouts,
    /// network errors) with exponential backoff: 1s, 2s, 4s, etc. Malformed
    /// requests and authentication failures are returned immediately.
    pub async fn messages(&self, request: &MessagesRequest) -> Result<MessagesResponse> {
        let url = format!("{}/v1/messages", self.base_url);
        let start = std::time::Instant::now();

        let mut attempts = 0;
        loop {
            attempts += 1;
            match self.send_once(&url, request).await {
                Ok(response) => {
                    debug!(
                        model = %response.model,
                        input_tokens = response.usage.input_tokens,
                        output_tokens = response.usage.output_tokens,
                        duration_ms = start.elapsed().as_millis() as u64,
                        attempts,
                        "Anthropic messages request completed"
                    );
                    return Ok(response);
                }
                Err(e) if e.is_retryable() && attempts < self.max_retries => {
                    let delay = Duration::from_secs(2u64.pow(attempts - 1));
                    warn!(
                        error = %e,
                        attempt = attempts,
                        delay_secs = delay.as_secs(),
                        "Anthropic request failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) => {
                    warn!(error = %e, attempts, "Anthropic request failed");
                    return Err(e);
                }
            }
        }
    }

    async fn send_once(&self, url: &str, request: &MessagesRequest) -> Result<MessagesResponse> {
        let response = self
            .http_client
            .post(url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .header("content-type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AnthropicError::Timeout(e.to_string())
                } else {
                    AnthropicError::Network(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(classify_status(status, &error_text));
        }

        response
            .json::<MessagesResponse>()
            .await
            .map_err(|e| AnthropicError::Parse(e.to_string()))
    }
}

/// Map a non-success HTTP status to the error taxonomy.
fn classify_status(status: StatusCode, body: &str) -> AnthropicError {
    let detail = format!("HTTP {}: {}", status.as_u16(), body);
    match status.as_u16() {
        401 | 403 => AnthropicError::Authentication(detail),
        429 => AnthropicError::RateLimited(detail),
        s if s >= 500 => AnthropicError::Server(detail),
        _ => AnthropicError::InvalidRequest(detail),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_builder() {
        let client = AnthropicClient::new("sk-ant-test")
            .with_base_url("https://proxy.internal")
            .with_max_retries(5);

        assert_eq!(client.base_url, "https://proxy.internal");
        assert_eq!(client.max_retries, 5);
        assert_eq!(client.api_key, "sk-ant-test");
    }

    #[test]
    fn test_max_retries_floor() {
        let client = AnthropicClient::new("sk-ant-test").with_max_retries(0);
        assert_eq!(client.max_retries, 1);
    }

    #[test]
    fn test_classify_status() {
        assert!(matches!(
            classify_status(StatusCode::BAD_REQUEST, "bad field"),
            AnthropicError::InvalidRequest(_)
        ));
        assert!(matches!(
            classify_status(StatusCode::NOT_FOUND, "no such model"),
            AnthropicError::InvalidRequest(_)
        ));
        assert!(matches!(
            classify_status(StatusCode::UNAUTHORIZED, "bad key"),
            AnthropicError::Authentication(_)
        ));
        assert!(matches!(
            classify_status(StatusCode::FORBIDDEN, "no access"),
            AnthropicError::Authentication(_)
        ));
        assert!(matches!(
            classify_status(StatusCode::TOO_MANY_REQUESTS, "slow down"),
            AnthropicError::RateLimited(_)
        ));
        assert!(matches!(
            classify_status(StatusCode::INTERNAL_SERVER_ERROR, "boom"),
            AnthropicError::Server(_)
        ));
        // 529 is the overloaded status
        let overloaded = StatusCode::from_u16(529).unwrap();
        assert!(matches!(
            classify_status(overloaded, "overloaded"),
            AnthropicError::Server(_)
        ));
    }
}
