//! Prompts for the analysis pipeline.
//!
//! The system prompt carries the questionnaire contract: every taxonomy
//! field with its expected value shape, the per-field answer object, the
//! source vocabulary, and confidence guidance. The data context renders the
//! collected evidence; sections for missing evidence say so explicitly and
//! recommend the collection step that would fill them.

use serde_json::Value;
use sha2::{Digest, Sha256};

use crate::taxonomy;
use crate::types::input::AnalysisInput;

/// Static framing and rules for the analysis system prompt.
///
/// `{taxonomy}` is replaced with the rendered field registry.
pub const ANALYSIS_SYSTEM_PROMPT: &str = r#"You are a local-marketing analyst. Using only the evidence in the user message, answer the business intake questionnaire below and produce strategic insights for the business.

Questionnaire:
{taxonomy}

Answer rules:
1. Output a single JSON object. No prose, no code fences.
2. The object has exactly two top-level keys: "categories" and "insights".
3. "categories" contains the seven category objects named above. Every field you answer is an object:
   {"value": <typed as listed>, "source": "<source>", "confidence": 0.0-1.0, "reasoning": "one short sentence", "alternativeValues": [<optional plausible alternatives>]}
4. Set "value" to null when the evidence does not determine an answer. Never invent facts the evidence does not support.
5. "source" must be one of: profile-data, sitemap, crawl, competitor-data, audit-data, citation-data, model-inference, user-input.
6. Owner-verified corrections outrank every other source; when present, emit them with source "user-input" at confidence 1.0.
7. Calibrate "confidence": direct observation in evidence 0.8-1.0, strong inference 0.5-0.7, weak inference 0.2-0.4.
8. "insights" contains exactly these keys: contentGaps, competitorComparison, targetCustomerAnalysis, rankingOpportunities, quickWins, recommendations, riskFactors. Ground every insight in the evidence; when a section cannot be grounded, say so inside it rather than inventing specifics.
9. Answer every field in every category."#;

/// Build the full system prompt.
///
/// Deterministic: depends only on the taxonomy and the template, never on
/// the input.
pub fn build_system_prompt() -> String {
    ANALYSIS_SYSTEM_PROMPT.replace("{taxonomy}", &render_taxonomy())
}

/// Hash of the system prompt for cache invalidation.
///
/// Stored alongside persisted analyses so a prompt change can invalidate
/// cached results.
pub fn system_prompt_hash() -> String {
    let mut hasher = Sha256::new();
    hasher.update(build_system_prompt().as_bytes());
    format!("{:x}", hasher.finalize())
}

fn render_taxonomy() -> String {
    let mut out = String::new();
    for category in taxonomy::CATEGORIES {
        out.push_str(&format!("\n## {} (\"{}\")\n", category.title, category.name));
        for field in category.fields {
            out.push_str(&format!(
                "- {} ({}): {}\n",
                field.name,
                field.kind.describe(),
                field.guidance
            ));
        }
    }
    out
}

/// Render the evidence document sent as the user message.
///
/// Sections appear in a fixed order. Present evidence is rendered as pretty
/// JSON and truncated to `max_section_chars`; absent evidence renders an
/// explicit not-available line so the model never mistakes missing data for
/// a negative finding.
pub fn build_data_context(input: &AnalysisInput, max_section_chars: usize) -> String {
    let mut sections = Vec::new();

    sections.push(format!(
        "=== BUSINESS BASICS ===\nName: {}\nWebsite: {}\nIndustry: {}\nLocation: {}",
        input.business_name,
        input.website,
        input.industry.as_deref().unwrap_or("not provided"),
        match (input.city.as_deref(), input.state.as_deref()) {
            (Some(city), Some(state)) => format!("{}, {}", city, state),
            (Some(city), None) => city.to_string(),
            (None, Some(state)) => state.to_string(),
            (None, None) => "not provided".to_string(),
        }
    ));

    sections.push(evidence_section(
        "BUSINESS PROFILE",
        input.profile_data.as_ref(),
        "No business profile data available. Recommend running the profile scrape.",
        max_section_chars,
    ));
    sections.push(evidence_section(
        "SITEMAP",
        input.sitemap_data.as_ref(),
        "No sitemap data available. Recommend fetching the sitemap.",
        max_section_chars,
    ));
    sections.push(evidence_section(
        "SITE CRAWL",
        input.crawl_data.as_ref(),
        "No crawl data available. Recommend running the site crawl.",
        max_section_chars,
    ));
    sections.push(list_section(
        "COMPETITORS",
        "Competitor",
        input.competitor_data.as_deref(),
        "No competitor data available. Recommend collecting competitor snapshots.",
        max_section_chars,
    ));
    sections.push(evidence_section(
        "TECHNICAL AUDIT",
        input.audit_data.as_ref(),
        "No audit data available. Recommend running the technical audit.",
        max_section_chars,
    ));
    sections.push(list_section(
        "CITATIONS",
        "Citation",
        input.citation_data.as_deref(),
        "No citation data available. Recommend running the citation scan.",
        max_section_chars,
    ));

    if let Some(corrections) = input.user_verified.as_ref() {
        sections.push(format!(
            "=== OWNER-VERIFIED CORRECTIONS ===\nThe owner reviewed a previous analysis and confirmed these values. They are authoritative over any conflicting evidence above.\n{}",
            render_value(corrections, max_section_chars)
        ));
    }

    sections.join("\n---\n")
}

fn evidence_section(
    title: &str,
    data: Option<&Value>,
    missing_line: &str,
    max_section_chars: usize,
) -> String {
    match data {
        Some(value) => format!("=== {} ===\n{}", title, render_value(value, max_section_chars)),
        None => format!("=== {} ===\n{}", title, missing_line),
    }
}

fn list_section(
    title: &str,
    singular: &str,
    data: Option<&[Value]>,
    missing_line: &str,
    max_section_chars: usize,
) -> String {
    match data {
        Some(entries) => {
            let body = entries
                .iter()
                .enumerate()
                .map(|(i, entry)| {
                    format!(
                        "{} {}:\n{}",
                        singular,
                        i + 1,
                        serde_json::to_string_pretty(entry).unwrap_or_default()
                    )
                })
                .collect::<Vec<_>>()
                .join("\n");
            format!(
                "=== {} ===\n{}",
                title,
                truncate_chars(body, max_section_chars)
            )
        }
        None => format!("=== {} ===\n{}", title, missing_line),
    }
}

fn render_value(value: &Value, max_section_chars: usize) -> String {
    truncate_chars(
        serde_json::to_string_pretty(value).unwrap_or_default(),
        max_section_chars,
    )
}

fn truncate_chars(text: String, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text;
    }
    let kept: String = text.chars().take(max_chars).collect();
    format!("{}\n[truncated]", kept)
}

/// Rough token estimate at four characters per token.
pub fn estimate_tokens(text: &str) -> u32 {
    text.chars().count().div_ceil(4) as u32
}
