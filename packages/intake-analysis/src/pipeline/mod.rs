//! Analysis pipeline - the core of the library.
//!
//! The pipeline orchestrates:
//! - Default synthesis (the no-evidence safety net)
//! - Prompt building (taxonomy-derived system prompt + data context)
//! - Generation through the text-generation seam
//! - Resilient parsing and repair of model output
//! - Merging parsed answers over defaults with confidence aggregation

pub mod analyzer;
pub mod defaults;
pub mod merge;
pub mod parser;
pub mod prompts;
pub mod repair;

pub use analyzer::{data_quality_score, Analyzer, FALLBACK_MODEL};
pub use defaults::{default_insights, synthesize_defaults};
pub use merge::build_result;
pub use parser::{find_balanced_span, parse_analysis_response, ParsedFragments, SpanEnd};
pub use prompts::{
    build_data_context, build_system_prompt, estimate_tokens, system_prompt_hash,
    ANALYSIS_SYSTEM_PROMPT,
};
pub use repair::repair_json_fragment;
