//! Testing utilities including mock implementations.
//!
//! These are useful for testing applications that run analyses without
//! making real generation or network calls.

use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use crate::error::{AnalysisError, Result};
use crate::traits::generator::{GenerationOutcome, GenerationRequest, StopKind, TextGenerator};
use crate::types::result::TokenUsage;

/// Model name reported by [`MockGenerator`].
pub const MOCK_MODEL: &str = "mock-model";

/// A mock text generator for testing.
///
/// Serves queued responses front to back, repeating the last one once the
/// queue is down to a single entry, and records every request for
/// assertions. Clones share the same queue and call log.
#[derive(Clone, Default)]
pub struct MockGenerator {
    /// Queued responses, served in order
    responses: Arc<RwLock<Vec<GenerationOutcome>>>,

    /// When set, every call fails with this message
    failure: Option<String>,

    /// Call tracking for assertions
    calls: Arc<RwLock<Vec<GenerationRequest>>>,
}

impl MockGenerator {
    /// Create a new mock generator with default behavior.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response with a clean stop and zeroed usage.
    pub fn with_response(self, text: impl Into<String>) -> Self {
        self.responses.write().unwrap().push(GenerationOutcome {
            text: text.into(),
            model: MOCK_MODEL.to_string(),
            stop: StopKind::Complete,
            usage: TokenUsage::default(),
        });
        self
    }

    /// Set the stop reason on the most recently queued response.
    pub fn with_stop(self, stop: StopKind) -> Self {
        self.ensure_queued();
        if let Some(last) = self.responses.write().unwrap().last_mut() {
            last.stop = stop;
        }
        self
    }

    /// Set measured usage on the most recently queued response.
    pub fn with_usage(self, input_tokens: u32, output_tokens: u32) -> Self {
        self.ensure_queued();
        if let Some(last) = self.responses.write().unwrap().last_mut() {
            last.usage = TokenUsage {
                input_tokens,
                output_tokens,
            };
        }
        self
    }

    /// A generator whose every call fails with the given message.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            failure: Some(message.into()),
            ..Default::default()
        }
    }

    /// All requests made against this mock.
    pub fn calls(&self) -> Vec<GenerationRequest> {
        self.calls.read().unwrap().clone()
    }

    /// Clear request history.
    pub fn clear_calls(&self) {
        self.calls.write().unwrap().clear();
    }

    fn ensure_queued(&self) {
        let mut queue = self.responses.write().unwrap();
        if queue.is_empty() {
            queue.push(default_outcome());
        }
    }
}

/// Minimal response that parses cleanly into an all-defaults analysis.
fn default_outcome() -> GenerationOutcome {
    GenerationOutcome {
        text: r#"{"categories": {}}"#.to_string(),
        model: MOCK_MODEL.to_string(),
        stop: StopKind::Complete,
        usage: TokenUsage::default(),
    }
}

#[async_trait]
impl TextGenerator for MockGenerator {
    async fn generate(&self, request: GenerationRequest) -> Result<GenerationOutcome> {
        self.calls.write().unwrap().push(request);

        if let Some(message) = &self.failure {
            return Err(AnalysisError::Generation(message.clone().into()));
        }

        let mut queue = self.responses.write().unwrap();
        Ok(match queue.len() {
            0 => default_outcome(),
            1 => queue[0].clone(),
            _ => queue.remove(0),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> GenerationRequest {
        GenerationRequest {
            system: "system".to_string(),
            content: "content".to_string(),
            model: "m".to_string(),
            max_tokens: 100,
            temperature: 0.2,
        }
    }

    #[tokio::test]
    async fn test_serves_queued_responses_in_order() {
        let mock = MockGenerator::new()
            .with_response("first")
            .with_response("second");

        assert_eq!(mock.generate(request()).await.unwrap().text, "first");
        assert_eq!(mock.generate(request()).await.unwrap().text, "second");
        // the last response repeats
        assert_eq!(mock.generate(request()).await.unwrap().text, "second");
        assert_eq!(mock.calls().len(), 3);
    }

    #[tokio::test]
    async fn test_empty_queue_serves_parseable_default() {
        let mock = MockGenerator::new();
        let outcome = mock.generate(request()).await.unwrap();
        assert!(serde_json::from_str::<serde_json::Value>(&outcome.text).is_ok());
        assert_eq!(outcome.model, MOCK_MODEL);
        assert_eq!(outcome.stop, StopKind::Complete);
    }

    #[tokio::test]
    async fn test_failing_mock() {
        let mock = MockGenerator::failing("socket closed");
        let error = mock.generate(request()).await.unwrap_err();
        assert!(error.to_string().contains("socket closed"));
        // the failed call is still recorded
        assert_eq!(mock.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_stop_and_usage_builders() {
        let mock = MockGenerator::new()
            .with_response("{}")
            .with_stop(StopKind::MaxTokens)
            .with_usage(10, 20);

        let outcome = mock.generate(request()).await.unwrap();
        assert!(outcome.truncated());
        assert_eq!(outcome.usage.input_tokens, 10);
        assert_eq!(outcome.usage.output_tokens, 20);

        mock.clear_calls();
        assert!(mock.calls().is_empty());
    }
}
