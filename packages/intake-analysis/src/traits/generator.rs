//! Text generation trait.
//!
//! The pipeline needs exactly one LLM capability: single-shot generation
//! from a system prompt plus a user document. Implementations wrap a
//! specific provider and own transport, retry, and error classification.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::result::TokenUsage;

/// Why generation stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopKind {
    /// The model finished on its own
    Complete,

    /// Output was cut off by the token budget
    MaxTokens,

    /// A configured stop sequence fired
    StopSequence,
}

/// A single-shot generation request.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    /// System prompt: instructions and the output contract
    pub system: String,

    /// User content: the rendered data context
    pub content: String,

    /// Model to use
    pub model: String,

    /// Output token budget
    pub max_tokens: u32,

    /// Sampling temperature
    pub temperature: f32,
}

/// Generated text plus accounting.
#[derive(Debug, Clone)]
pub struct GenerationOutcome {
    /// Raw generated text
    pub text: String,

    /// Model that actually served the request
    pub model: String,

    /// Why generation stopped
    pub stop: StopKind,

    /// Measured token usage
    pub usage: TokenUsage,
}

impl GenerationOutcome {
    /// Whether the output was cut off by the token budget.
    pub fn truncated(&self) -> bool {
        self.stop == StopKind::MaxTokens
    }
}

/// Text generation abstraction.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate text for a single request.
    async fn generate(&self, request: GenerationRequest) -> Result<GenerationOutcome>;
}
