//! Anthropic implementation of the text generation trait.
//!
//! Wraps the `anthropic-client` crate. Transport, retry, and error
//! classification live in the client; this adapter only maps between the
//! pipeline's generation seam and the Messages API shapes.

use async_trait::async_trait;
use tracing::warn;

use anthropic_client::{AnthropicClient, Message, MessagesRequest, StopReason};

use crate::error::{AnalysisError, Result};
use crate::pipeline::analyzer::Analyzer;
use crate::traits::generator::{GenerationOutcome, GenerationRequest, StopKind, TextGenerator};
use crate::types::result::TokenUsage;

/// Anthropic-backed text generator.
#[derive(Clone)]
pub struct AnthropicGenerator {
    client: AnthropicClient,
}

impl AnthropicGenerator {
    /// Wrap an existing client.
    pub fn new(client: AnthropicClient) -> Self {
        Self { client }
    }

    /// Create from the `ANTHROPIC_API_KEY` environment variable.
    pub fn from_env() -> Result<Self> {
        let client = AnthropicClient::from_env()
            .map_err(|error| AnalysisError::Config(error.to_string()))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl TextGenerator for AnthropicGenerator {
    async fn generate(&self, request: GenerationRequest) -> Result<GenerationOutcome> {
        let GenerationRequest {
            system,
            content,
            model,
            max_tokens,
            temperature,
        } = request;

        let api_request = MessagesRequest::new(model)
            .system(system)
            .max_tokens(max_tokens)
            .temperature(temperature)
            .message(Message::user(content));

        let response = self
            .client
            .messages(&api_request)
            .await
            .map_err(|error| AnalysisError::Generation(Box::new(error)))?;

        Ok(GenerationOutcome {
            text: response.text(),
            model: response.model.clone(),
            stop: map_stop(response.stop_reason),
            usage: TokenUsage {
                input_tokens: response.usage.input_tokens,
                output_tokens: response.usage.output_tokens,
            },
        })
    }
}

/// An absent stop reason is treated as a clean finish.
fn map_stop(stop_reason: Option<StopReason>) -> StopKind {
    match stop_reason {
        Some(StopReason::MaxTokens) => StopKind::MaxTokens,
        Some(StopReason::StopSequence) => StopKind::StopSequence,
        Some(StopReason::EndTurn) | None => StopKind::Complete,
    }
}

impl Analyzer<AnthropicGenerator> {
    /// Build an analyzer from the environment, degrading to an unconfigured
    /// analyzer when `ANTHROPIC_API_KEY` is not set.
    pub fn from_env() -> Self {
        match AnthropicGenerator::from_env() {
            Ok(generator) => Analyzer::new(generator),
            Err(error) => {
                warn!(
                    error = %error,
                    "generation service not configured; analyses will return defaults"
                );
                Analyzer::unconfigured()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stop_reason_mapping() {
        assert_eq!(map_stop(Some(StopReason::EndTurn)), StopKind::Complete);
        assert_eq!(map_stop(Some(StopReason::MaxTokens)), StopKind::MaxTokens);
        assert_eq!(
            map_stop(Some(StopReason::StopSequence)),
            StopKind::StopSequence
        );
        assert_eq!(map_stop(None), StopKind::Complete);
    }

    #[test]
    fn test_wraps_existing_client() {
        let generator = AnthropicGenerator::new(AnthropicClient::new("test-key"));
        // the adapter holds the client as-is; nothing to configure here
        let _ = generator.clone();
    }
}
