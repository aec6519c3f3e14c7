//! Analysis orchestration.
//!
//! `Analyzer` sequences prompt building, generation, parsing, and merging.
//! Its postcondition is that `analyze` never fails: an unconfigured
//! generator, a transport error, truncated output, and unparseable output
//! all converge on a structurally complete result whose warnings, errors,
//! and confidence metrics say how degraded it is.

use std::time::Instant;

use tracing::{info, warn};

use crate::pipeline::merge::build_result;
use crate::pipeline::parser::parse_analysis_response;
use crate::pipeline::prompts::{build_data_context, build_system_prompt, estimate_tokens};
use crate::pipeline::repair::repair_json_fragment;
use crate::traits::generator::{GenerationRequest, TextGenerator};
use crate::types::config::AnalysisConfig;
use crate::types::input::AnalysisInput;
use crate::types::result::AnalysisOutcome;

/// Model name reported when no generation ran.
pub const FALLBACK_MODEL: &str = "fallback";

/// Dollars per million input tokens. Unknown models are priced like the
/// default model family.
const INPUT_RATE_PER_MTOK: f64 = 3.0;

/// Dollars per million output tokens.
const OUTPUT_RATE_PER_MTOK: f64 = 15.0;

/// Runs complete intake analyses against a text generation service.
pub struct Analyzer<G> {
    generator: Option<G>,
    config: AnalysisConfig,
}

impl<G> Analyzer<G> {
    /// Analyzer with no generation service. Every run returns the
    /// synthesized default analysis under the `"fallback"` model name.
    pub fn unconfigured() -> Self {
        Self {
            generator: None,
            config: AnalysisConfig::default(),
        }
    }

    /// Replace the analysis configuration.
    pub fn with_config(mut self, config: AnalysisConfig) -> Self {
        self.config = config;
        self
    }

    /// The active configuration.
    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }
}

impl<G: TextGenerator> Analyzer<G> {
    /// Analyzer backed by a generation service.
    pub fn new(generator: G) -> Self {
        Self {
            generator: Some(generator),
            config: AnalysisConfig::default(),
        }
    }

    /// Run one analysis.
    ///
    /// Always returns `success: true`. Failures along the way degrade the
    /// result instead of aborting it; callers can inspect `data.model`,
    /// `data.warnings`, and `data.errors` to see what happened.
    pub async fn analyze(&self, input: &AnalysisInput) -> AnalysisOutcome {
        let started = Instant::now();
        let quality = data_quality_score(input);
        info!(
            session_id = %input.session_id,
            business = %input.business_name,
            data_quality = quality,
            "starting intake analysis"
        );

        let Some(generator) = &self.generator else {
            warn!("generation service not configured; returning default analysis");
            let mut data = build_result(
                None,
                None,
                input,
                &self.config,
                quality,
                FALLBACK_MODEL,
                vec!["generation service not configured; returning default analysis".to_string()],
            );
            data.processing_time_ms = started.elapsed().as_millis() as u64;
            return AnalysisOutcome {
                success: true,
                data,
                estimated_cost: 0.0,
            };
        };

        let system = build_system_prompt();
        let context = build_data_context(input, self.config.max_section_chars);
        let input_estimate = estimate_tokens(&system) + estimate_tokens(&context);

        let request = GenerationRequest {
            system,
            content: context,
            model: self.config.model.clone(),
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
        };

        let outcome = match generator.generate(request).await {
            Ok(outcome) => outcome,
            Err(error) => {
                warn!(error = %error, "analysis generation failed; returning default analysis");
                let mut data = build_result(
                    None,
                    None,
                    input,
                    &self.config,
                    quality,
                    FALLBACK_MODEL,
                    vec![format!("analysis generation failed: {error}")],
                );
                data.errors.push(error.to_string());
                data.processing_time_ms = started.elapsed().as_millis() as u64;
                return AnalysisOutcome {
                    success: true,
                    data,
                    estimated_cost: 0.0,
                };
            }
        };

        let output_estimate = estimate_tokens(&outcome.text);
        let mut warnings = Vec::new();

        // the token ceiling cuts output mid-document often enough that a
        // repair ahead of parsing pays for itself
        let text = if outcome.truncated() {
            warn!(model = %outcome.model, "generation stopped at the token ceiling");
            warnings.push(
                "generation stopped at the token ceiling; output was repaired before parsing"
                    .to_string(),
            );
            repair_json_fragment(&outcome.text)
        } else {
            outcome.text.clone()
        };

        let parsed = parse_analysis_response(&text);
        let (categories, insights) = match &parsed {
            Some(fragments) => {
                if fragments.categories.is_none() {
                    warnings.push(
                        "analysis response carried no usable category data; defaults kept"
                            .to_string(),
                    );
                }
                (fragments.categories.as_ref(), fragments.insights.as_ref())
            }
            None => {
                warn!("analysis response could not be parsed; returning default analysis");
                warnings.push(
                    "analysis response could not be parsed; returning default analysis".to_string(),
                );
                (None, None)
            }
        };

        let mut data = build_result(
            categories,
            insights,
            input,
            &self.config,
            quality,
            &outcome.model,
            warnings,
        );
        data.token_usage = outcome.usage;
        data.processing_time_ms = started.elapsed().as_millis() as u64;

        let estimated_cost = estimate_cost(input_estimate, output_estimate);
        info!(
            session_id = %input.session_id,
            model = %data.model,
            overall_confidence = data.metrics.overall_confidence,
            elapsed_ms = data.processing_time_ms,
            "intake analysis finished"
        );

        AnalysisOutcome {
            success: true,
            data,
            estimated_cost,
        }
    }
}

/// Score how much collected evidence backs an analysis, 0 to 100.
///
/// Presence-weighted: profile 25, crawl 25, sitemap 15, competitors 15,
/// audit 10, citations 10.
pub fn data_quality_score(input: &AnalysisInput) -> u8 {
    let mut score = 0;
    if input.profile_data.is_some() {
        score += 25;
    }
    if input.crawl_data.is_some() {
        score += 25;
    }
    if input.sitemap_data.is_some() {
        score += 15;
    }
    if input.competitor_data.is_some() {
        score += 15;
    }
    if input.audit_data.is_some() {
        score += 10;
    }
    if input.citation_data.is_some() {
        score += 10;
    }
    score
}

/// Estimated spend in dollars for one generation call, from char-length
/// token estimates.
fn estimate_cost(input_tokens: u32, output_tokens: u32) -> f64 {
    f64::from(input_tokens) / 1_000_000.0 * INPUT_RATE_PER_MTOK
        + f64::from(output_tokens) / 1_000_000.0 * OUTPUT_RATE_PER_MTOK
}
