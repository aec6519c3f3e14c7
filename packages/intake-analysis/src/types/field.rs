//! Per-field answer types.
//!
//! Every questionnaire field is answered with an [`InferredField`]: a value,
//! the evidence source it came from, a confidence score, and the model's
//! reasoning. Fields the analysis cannot determine carry
//! [`FieldValue::Unknown`], which serializes as JSON `null`.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::taxonomy::FieldKind;

/// Confidence assigned to defaults with no supporting signal.
pub const CONFIDENCE_FLOOR: f64 = 0.1;

/// Confidence assigned to defaults derived deterministically from supplied
/// input or evidence presence.
pub const CONFIDENCE_DERIVED: f64 = 0.4;

/// The value of an answered field.
///
/// Serialization is untagged: the JSON shape alone identifies the variant.
/// `Unknown` is the explicit cannot-be-determined placeholder and serializes
/// as `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Boolean answer
    Flag(bool),

    /// Numeric answer
    Number(f64),

    /// Free-text or choice answer
    Text(String),

    /// List answer
    TextList(Vec<String>),

    /// Could not be determined
    Unknown,
}

impl FieldValue {
    /// Whether this is the cannot-be-determined placeholder.
    pub fn is_unknown(&self) -> bool {
        matches!(self, FieldValue::Unknown)
    }

    /// Validate a raw JSON value against a declared field kind.
    ///
    /// Returns `None` when the value does not fit the kind; callers keep
    /// their existing default in that case. `null` is accepted for every
    /// kind as `Unknown`. Minor model sloppiness is normalized: flags accept
    /// "true"/"false" strings, choice answers match options
    /// case-insensitively and are canonicalized.
    pub fn from_json(kind: &FieldKind, raw: &Value) -> Option<FieldValue> {
        if raw.is_null() {
            return Some(FieldValue::Unknown);
        }
        match kind {
            FieldKind::Text => raw.as_str().map(|s| FieldValue::Text(s.to_string())),
            FieldKind::TextList => {
                let items = raw.as_array()?;
                let mut list = Vec::with_capacity(items.len());
                for item in items {
                    list.push(item.as_str()?.to_string());
                }
                Some(FieldValue::TextList(list))
            }
            FieldKind::Flag => match raw {
                Value::Bool(b) => Some(FieldValue::Flag(*b)),
                Value::String(s) if s.eq_ignore_ascii_case("true") => Some(FieldValue::Flag(true)),
                Value::String(s) if s.eq_ignore_ascii_case("false") => {
                    Some(FieldValue::Flag(false))
                }
                _ => None,
            },
            FieldKind::Number { min, max } => {
                let n = raw.as_f64()?;
                (*min..=*max).contains(&n).then_some(FieldValue::Number(n))
            }
            FieldKind::Choice { options } => {
                let s = raw.as_str()?;
                options
                    .iter()
                    .find(|option| option.eq_ignore_ascii_case(s))
                    .map(|option| FieldValue::Text(option.to_string()))
            }
        }
    }
}

/// Where an answer came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FieldSource {
    /// Scraped business profile listing
    ProfileData,

    /// Sitemap fetch
    Sitemap,

    /// Site crawl
    Crawl,

    /// Competitor snapshots
    CompetitorData,

    /// Technical site audit
    AuditData,

    /// Directory citation scan
    CitationData,

    /// Model judgment without direct evidence
    ModelInference,

    /// Supplied directly by the business owner
    UserInput,
}

/// A single answered questionnaire field.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InferredField {
    /// The answer, or `Unknown`
    pub value: FieldValue,

    /// Evidence source backing the answer
    pub source: FieldSource,

    /// Confidence in the answer (0.0 to 1.0)
    pub confidence: f64,

    /// Short explanation of how the answer was reached
    #[serde(default)]
    pub reasoning: String,

    /// Plausible alternatives the model also considered
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alternative_values: Vec<FieldValue>,
}

impl InferredField {
    /// Create a field answer.
    pub fn new(
        value: FieldValue,
        source: FieldSource,
        confidence: f64,
        reasoning: impl Into<String>,
    ) -> Self {
        Self {
            value,
            source,
            confidence,
            reasoning: reasoning.into(),
            alternative_values: Vec::new(),
        }
    }

    /// The unknown-value default at floor confidence.
    pub fn unknown(reasoning: impl Into<String>) -> Self {
        Self::new(
            FieldValue::Unknown,
            FieldSource::ModelInference,
            CONFIDENCE_FLOOR,
            reasoning,
        )
    }

    /// Attach alternative values.
    pub fn with_alternatives(mut self, alternatives: Vec<FieldValue>) -> Self {
        self.alternative_values = alternatives;
        self
    }
}

/// Ordered map of field name to answer within one category.
pub type FieldMap = IndexMap<String, InferredField>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_field_value_untagged_round_trip() {
        assert_eq!(
            serde_json::to_value(FieldValue::Flag(true)).unwrap(),
            json!(true)
        );
        assert_eq!(
            serde_json::to_value(FieldValue::Unknown).unwrap(),
            Value::Null
        );
        assert_eq!(
            serde_json::from_value::<FieldValue>(json!(["a", "b"])).unwrap(),
            FieldValue::TextList(vec!["a".into(), "b".into()])
        );
        assert_eq!(
            serde_json::from_value::<FieldValue>(Value::Null).unwrap(),
            FieldValue::Unknown
        );
    }

    #[test]
    fn test_source_serializes_kebab_case() {
        assert_eq!(
            serde_json::to_value(FieldSource::ProfileData).unwrap(),
            json!("profile-data")
        );
        assert_eq!(
            serde_json::to_value(FieldSource::ModelInference).unwrap(),
            json!("model-inference")
        );
        assert_eq!(
            serde_json::to_value(FieldSource::Sitemap).unwrap(),
            json!("sitemap")
        );
    }

    #[test]
    fn test_from_json_respects_kind() {
        assert_eq!(
            FieldValue::from_json(&FieldKind::Flag, &json!(true)),
            Some(FieldValue::Flag(true))
        );
        assert_eq!(
            FieldValue::from_json(&FieldKind::Flag, &json!("True")),
            Some(FieldValue::Flag(true))
        );
        assert_eq!(FieldValue::from_json(&FieldKind::Flag, &json!(7)), None);

        let rating = FieldKind::Number { min: 0.0, max: 5.0 };
        assert_eq!(
            FieldValue::from_json(&rating, &json!(4.5)),
            Some(FieldValue::Number(4.5))
        );
        assert_eq!(FieldValue::from_json(&rating, &json!(9.0)), None);

        let tone = FieldKind::Choice {
            options: &["professional", "casual"],
        };
        assert_eq!(
            FieldValue::from_json(&tone, &json!("Professional")),
            Some(FieldValue::Text("professional".into()))
        );
        assert_eq!(FieldValue::from_json(&tone, &json!("sardonic")), None);

        assert_eq!(
            FieldValue::from_json(&FieldKind::TextList, &json!(["a", 1])),
            None
        );
        assert_eq!(
            FieldValue::from_json(&FieldKind::Text, &Value::Null),
            Some(FieldValue::Unknown)
        );
    }

    #[test]
    fn test_inferred_field_serialization() {
        let field = InferredField::new(
            FieldValue::Flag(true),
            FieldSource::Crawl,
            0.9,
            "seen on homepage",
        );
        let json = serde_json::to_value(&field).unwrap();
        assert_eq!(json["value"], json!(true));
        assert_eq!(json["source"], json!("crawl"));
        assert_eq!(json["confidence"], json!(0.9));
        // empty alternatives are omitted entirely
        assert!(json.get("alternativeValues").is_none());

        let with_alts = field.with_alternatives(vec![FieldValue::Flag(false)]);
        let json = serde_json::to_value(&with_alts).unwrap();
        assert_eq!(json["alternativeValues"], json!([false]));
    }
}
