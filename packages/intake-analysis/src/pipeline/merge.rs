//! Confidence aggregation and result assembly.
//!
//! Parsed fragments are merged over synthesized defaults: categories field
//! by field, insights one level deep. The merged tree always contains
//! exactly the taxonomy's categories and field names, whatever the model
//! returned.

use chrono::Utc;
use serde_json::Value;
use tracing::debug;

use crate::pipeline::defaults::{default_insights, synthesize_defaults};
use crate::taxonomy::{self, FieldSpec};
use crate::types::config::AnalysisConfig;
use crate::types::field::{FieldSource, FieldValue, InferredField, CONFIDENCE_FLOOR};
use crate::types::input::AnalysisInput;
use crate::types::result::{AnalysisCategories, AnalysisMetrics, AnalysisResult, TokenUsage};

/// Assemble a complete result from whatever fragments parsing recovered.
///
/// Token usage and processing time are zeroed here; the analyzer overwrites
/// them with measured values once the run finishes.
pub fn build_result(
    parsed_categories: Option<&Value>,
    parsed_insights: Option<&Value>,
    input: &AnalysisInput,
    config: &AnalysisConfig,
    data_quality_score: u8,
    model: &str,
    warnings: Vec<String>,
) -> AnalysisResult {
    let mut categories = synthesize_defaults(input);
    if let Some(parsed) = parsed_categories.and_then(Value::as_object) {
        merge_categories(&mut categories, parsed);
    }

    let mut insights = default_insights(input);
    if let Some(parsed) = parsed_insights {
        insights.apply_overrides(parsed);
    }

    let metrics = compute_metrics(&categories, config, data_quality_score);

    AnalysisResult {
        timestamp: Utc::now(),
        model: model.to_string(),
        session_id: input.session_id,
        categories,
        insights,
        metrics,
        token_usage: TokenUsage::default(),
        processing_time_ms: 0,
        warnings,
        errors: Vec::new(),
    }
}

/// Shallow per-field override. A parsed field replaces its default only when
/// it decodes cleanly against the declared kind; field names outside the
/// taxonomy are dropped.
fn merge_categories(
    categories: &mut AnalysisCategories,
    parsed: &serde_json::Map<String, Value>,
) {
    for category in taxonomy::CATEGORIES {
        let Some(parsed_fields) = parsed.get(category.name).and_then(Value::as_object) else {
            continue;
        };
        let Some(target) = categories.get_mut(category.name) else {
            continue;
        };
        for field in category.fields {
            let Some(raw) = parsed_fields.get(field.name) else {
                continue;
            };
            match decode_field(field, raw) {
                Some(answer) => {
                    target.insert(field.name.to_string(), answer);
                }
                None => {
                    debug!(
                        category = category.name,
                        field = field.name,
                        "keeping default for malformed parsed field"
                    );
                }
            }
        }
    }
}

/// Decode one parsed field leniently.
///
/// Returns `None` when the payload is not an object or its value does not
/// fit the declared kind. Missing confidence falls to the floor tier and is
/// clamped into [0, 1]; missing or unrecognized source becomes
/// model-inference; missing reasoning becomes empty.
fn decode_field(field: &FieldSpec, raw: &Value) -> Option<InferredField> {
    let object = raw.as_object()?;

    let value = FieldValue::from_json(&field.kind, object.get("value").unwrap_or(&Value::Null))?;
    let source = object
        .get("source")
        .and_then(|v| serde_json::from_value(v.clone()).ok())
        .unwrap_or(FieldSource::ModelInference);
    let confidence = object
        .get("confidence")
        .and_then(Value::as_f64)
        .unwrap_or(CONFIDENCE_FLOOR)
        .clamp(0.0, 1.0);
    let reasoning = object
        .get("reasoning")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    let alternative_values = object
        .get("alternativeValues")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|item| FieldValue::from_json(&field.kind, item))
                .filter(|alternative| !alternative.is_unknown())
                .collect()
        })
        .unwrap_or_default();

    Some(InferredField {
        value,
        source,
        confidence,
        reasoning,
        alternative_values,
    })
}

/// Walk every leaf field and aggregate its confidence.
fn compute_metrics(
    categories: &AnalysisCategories,
    config: &AnalysisConfig,
    data_quality_score: u8,
) -> AnalysisMetrics {
    let confidences: Vec<f64> = categories
        .iter()
        .flat_map(|(_, fields)| fields.values().map(|field| field.confidence))
        .collect();

    let overall_confidence = if confidences.is_empty() {
        CONFIDENCE_FLOOR
    } else {
        confidences.iter().sum::<f64>() / confidences.len() as f64
    };

    AnalysisMetrics {
        overall_confidence,
        fields_analyzed: confidences.len(),
        fields_with_high_confidence: confidences
            .iter()
            .filter(|c| **c >= config.high_confidence_threshold)
            .count(),
        fields_with_low_confidence: confidences
            .iter()
            .filter(|c| **c <= config.low_confidence_threshold)
            .count(),
        data_quality_score,
    }
}
