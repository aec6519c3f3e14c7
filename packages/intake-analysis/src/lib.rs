//! Business Intake Analysis Library
//!
//! Turns scraped business signals (profile listing, sitemap, site crawl,
//! competitor snapshots, technical audit, citation scan) into a
//! confidence-scored answer set for the intake questionnaire, plus
//! strategic marketing insights.
//!
//! # Design Philosophy
//!
//! **"Always ship an answer"**
//!
//! - Every analysis answers all 68 questionnaire fields, every time
//! - Confidence scores say how trustworthy each answer is, instead of
//!   errors saying there is no answer
//! - Generation failures, truncated output, and malformed output degrade
//!   to synthesized defaults, never to a failed run
//! - Evidence is opaque: presence and absence matter, internal shape does not
//!
//! # Usage
//!
//! ```rust,ignore
//! use intake_analysis::{AnalysisInput, Analyzer};
//! use intake_analysis::generation::AnthropicGenerator;
//!
//! let generator = AnthropicGenerator::from_env()?;
//! let analyzer = Analyzer::new(generator);
//!
//! let input = AnalysisInput::new(session_id, "Acme Plumbing", "https://acme.example")
//!     .with_profile_data(profile)
//!     .with_crawl_data(crawl);
//!
//! let outcome = analyzer.analyze(&input).await;
//! assert!(outcome.success);
//! ```
//!
//! # Modules
//!
//! - [`taxonomy`] - The fixed 7-category, 68-field questionnaire
//! - [`types`] - Input, field, insight, and result types
//! - [`traits`] - The text generation seam
//! - [`pipeline`] - Defaults, prompts, parsing, repair, merging, orchestration
//! - [`testing`] - Mock implementations for testing

pub mod error;
pub mod pipeline;
pub mod taxonomy;
pub mod testing;
pub mod traits;
pub mod types;

#[cfg(feature = "anthropic")]
pub mod generation;

// Re-export core types at crate root
pub use error::AnalysisError;
pub use traits::generator::{GenerationOutcome, GenerationRequest, StopKind, TextGenerator};
pub use types::{
    config::{AnalysisConfig, DEFAULT_MODEL},
    field::{
        FieldMap, FieldSource, FieldValue, InferredField, CONFIDENCE_DERIVED, CONFIDENCE_FLOOR,
    },
    input::AnalysisInput,
    insights::StrategicInsights,
    result::{AnalysisCategories, AnalysisMetrics, AnalysisOutcome, AnalysisResult, TokenUsage},
};

// Re-export pipeline components
pub use pipeline::{
    // Orchestration
    data_quality_score, Analyzer, FALLBACK_MODEL,
    // Defaults
    default_insights, synthesize_defaults,
    // Prompts
    build_data_context, build_system_prompt, estimate_tokens, system_prompt_hash,
    ANALYSIS_SYSTEM_PROMPT,
    // Parsing and repair
    build_result, find_balanced_span, parse_analysis_response, repair_json_fragment,
    ParsedFragments, SpanEnd,
};

#[cfg(feature = "anthropic")]
pub use generation::AnthropicGenerator;
