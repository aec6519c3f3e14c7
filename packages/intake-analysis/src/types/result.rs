//! Analysis result types: the answer envelope returned to callers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::field::FieldMap;
use super::insights::StrategicInsights;

/// Answered fields for all seven taxonomy categories.
///
/// Field maps are ordered, so serialized output lists fields in taxonomy
/// order regardless of what order the model answered them in.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisCategories {
    pub business_context: FieldMap,
    pub revenue_services: FieldMap,
    pub local_presence: FieldMap,
    pub website_readiness: FieldMap,
    pub tone_voice: FieldMap,
    pub conversion_tracking: FieldMap,
    pub ai_readiness: FieldMap,
}

impl AnalysisCategories {
    /// Iterate categories as (name, map) pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &FieldMap)> {
        [
            ("businessContext", &self.business_context),
            ("revenueServices", &self.revenue_services),
            ("localPresence", &self.local_presence),
            ("websiteReadiness", &self.website_readiness),
            ("toneVoice", &self.tone_voice),
            ("conversionTracking", &self.conversion_tracking),
            ("aiReadiness", &self.ai_readiness),
        ]
        .into_iter()
    }

    /// Mutable access to a category map by its JSON key.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut FieldMap> {
        match name {
            "businessContext" => Some(&mut self.business_context),
            "revenueServices" => Some(&mut self.revenue_services),
            "localPresence" => Some(&mut self.local_presence),
            "websiteReadiness" => Some(&mut self.website_readiness),
            "toneVoice" => Some(&mut self.tone_voice),
            "conversionTracking" => Some(&mut self.conversion_tracking),
            "aiReadiness" => Some(&mut self.ai_readiness),
            _ => None,
        }
    }

    /// Total number of answered fields across all categories.
    pub fn field_count(&self) -> usize {
        self.iter().map(|(_, map)| map.len()).sum()
    }
}

/// Aggregate confidence and coverage metrics.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisMetrics {
    /// Arithmetic mean confidence across every field
    pub overall_confidence: f64,

    /// Number of fields carrying an answer (defaults included)
    pub fields_analyzed: usize,

    /// Fields at or above the high-confidence threshold
    pub fields_with_high_confidence: usize,

    /// Fields at or below the low-confidence threshold
    pub fields_with_low_confidence: usize,

    /// 0-100 score reflecting how much evidence backed the analysis
    pub data_quality_score: u8,
}

/// Token accounting for the generation call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenUsage {
    /// Tokens in the prompt
    pub input_tokens: u32,

    /// Tokens generated
    pub output_tokens: u32,
}

/// A complete analysis for one intake session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// When the analysis finished
    pub timestamp: DateTime<Utc>,

    /// Model that produced it, or "fallback" when no generation ran
    pub model: String,

    /// Session the analysis belongs to
    pub session_id: Uuid,

    /// Answered questionnaire fields
    pub categories: AnalysisCategories,

    /// Strategy recommendations
    pub insights: StrategicInsights,

    /// Aggregate metrics
    pub metrics: AnalysisMetrics,

    /// Measured token usage (zero when no generation ran)
    pub token_usage: TokenUsage,

    /// Wall-clock analysis time
    pub processing_time_ms: u64,

    /// Degradations the caller should surface to operators
    #[serde(default)]
    pub warnings: Vec<String>,

    /// Failures that were absorbed on the way to this result
    #[serde(default)]
    pub errors: Vec<String>,
}

/// The analyzer's reply envelope.
///
/// `success` is always `true`: a degraded analysis surfaces through
/// `data.warnings`, `data.errors`, and low confidence, never as a failed
/// outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisOutcome {
    /// Always `true`
    pub success: bool,

    /// The analysis itself
    pub data: AnalysisResult,

    /// Estimated spend in dollars for the generation call
    pub estimated_cost: f64,
}
