//! Generation service implementations.
//!
//! Reference implementations of the text generation trait. Users can use
//! these directly or implement their own against another provider.

#[cfg(feature = "anthropic")]
mod anthropic;

#[cfg(feature = "anthropic")]
pub use anthropic::AnthropicGenerator;
