//! Resilient response parsing.
//!
//! Generated analyses arrive as clean JSON, fenced JSON, truncated JSON, or
//! JSON buried in prose. Parsing proceeds through staged fallbacks and the
//! first stage that yields a usable fragment wins:
//!
//! 1. strip any code fence
//! 2. parse the whole text directly
//! 3. repair the text, then parse
//! 4. extract the `categories` and `insights` objects independently by
//!    balanced-span scanning
//!
//! Total failure returns `None` rather than an error; the caller falls back
//! to synthesized defaults.

use serde_json::Value;
use tracing::debug;

use crate::pipeline::repair::repair_json_fragment;
use crate::taxonomy;

/// Structured fragments recovered from generated text.
#[derive(Debug, Clone, Default)]
pub struct ParsedFragments {
    /// The categories object, when recovered
    pub categories: Option<Value>,

    /// The insights object, when recovered
    pub insights: Option<Value>,
}

/// Result of scanning for a balanced object span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanEnd {
    /// Byte offset one past the matching closing brace
    Complete(usize),

    /// The object never closes within the text
    Unterminated,
}

/// Parse generated analysis text into structured fragments.
///
/// Returns `None` only when no stage recovers anything usable: neither a
/// categories object naming at least one known category, nor an insights
/// object.
pub fn parse_analysis_response(text: &str) -> Option<ParsedFragments> {
    let stripped = strip_code_fence(text);

    if let Some(fragments) = parse_whole(stripped) {
        return Some(fragments);
    }

    let repaired = repair_json_fragment(stripped);
    if let Some(fragments) = parse_whole(&repaired) {
        debug!("analysis response parsed after repair");
        return Some(fragments);
    }

    partial_extract(stripped)
}

/// Strip a leading and/or trailing code fence.
///
/// The two sides are handled independently: output truncated by the token
/// budget carries an opening fence with no closing one.
fn strip_code_fence(text: &str) -> &str {
    let mut out = text.trim();
    for prefix in ["```json", "```"] {
        if let Some(rest) = out.strip_prefix(prefix) {
            out = rest.trim_start();
            break;
        }
    }
    if let Some(rest) = out.strip_suffix("```") {
        out = rest.trim_end();
    }
    out
}

/// Strict whole-text parse. Accepts only a JSON object carrying a
/// `categories` object; a present but non-object `insights` is dropped.
fn parse_whole(text: &str) -> Option<ParsedFragments> {
    let value: Value = serde_json::from_str(text).ok()?;
    let object = value.as_object()?;
    let categories = object.get("categories")?;
    if !categories.is_object() {
        return None;
    }
    let insights = object.get("insights").filter(|v| v.is_object()).cloned();
    Some(ParsedFragments {
        categories: Some(categories.clone()),
        insights,
    })
}

/// Stage 4: pull the two top-level objects out independently, so a response
/// whose tail is mangled can still contribute its intact head.
fn partial_extract(text: &str) -> Option<ParsedFragments> {
    let categories = extract_keyed_object(text, "categories").filter(has_known_category);
    let insights = extract_keyed_object(text, "insights");

    if categories.is_none() && insights.is_none() {
        return None;
    }
    debug!(
        categories = categories.is_some(),
        insights = insights.is_some(),
        "recovered partial fragments from analysis response"
    );
    Some(ParsedFragments { categories, insights })
}

/// Find `"key": { ... }` by text search and parse the balanced object,
/// repairing it when the text ends before it closes.
fn extract_keyed_object(text: &str, key: &str) -> Option<Value> {
    let needle = format!("\"{}\"", key);
    let key_pos = text.find(&needle)?;
    let after = &text[key_pos + needle.len()..];

    let colon = after.find(':')?;
    let brace_rel = after[colon + 1..].find('{')?;
    if !after[colon + 1..colon + 1 + brace_rel].trim().is_empty() {
        return None;
    }

    let candidate = &after[colon + 1 + brace_rel..];
    match find_balanced_span(candidate, 0) {
        SpanEnd::Complete(end) => serde_json::from_str(&candidate[..end]).ok(),
        SpanEnd::Unterminated => serde_json::from_str(&repair_json_fragment(candidate)).ok(),
    }
}

fn has_known_category(value: &Value) -> bool {
    value
        .as_object()
        .map(|map| map.keys().any(|key| taxonomy::is_known_category(key)))
        .unwrap_or(false)
}

/// Scan for the end of the balanced object that begins at or after `start`.
///
/// A single left-to-right pass with three states: plain, in-string, and
/// escape-pending. Depth counts braces outside strings only, so braces
/// inside string values never unbalance the scan. Returns the byte offset
/// one past the matching close brace, or `Unterminated` when the text ends
/// first.
pub fn find_balanced_span(text: &str, start: usize) -> SpanEnd {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escape_next = false;

    for (i, &b) in text.as_bytes().iter().enumerate().skip(start) {
        if in_string {
            if escape_next {
                escape_next = false;
            } else if b == b'\\' {
                escape_next = true;
            } else if b == b'"' {
                in_string = false;
            }
            continue;
        }
        match b {
            b'"' => in_string = true,
            b'{' => depth += 1,
            b'}' => {
                if depth > 0 {
                    depth -= 1;
                    if depth == 0 {
                        return SpanEnd::Complete(i + 1);
                    }
                }
            }
            _ => {}
        }
    }
    SpanEnd::Unterminated
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn clean_response() -> String {
        json!({
            "categories": {
                "businessContext": {
                    "businessName": {
                        "value": "Acme Plumbing",
                        "source": "user-input",
                        "confidence": 0.95,
                        "reasoning": "Provided at intake"
                    }
                }
            },
            "insights": {
                "quickWins": ["add a booking link"]
            }
        })
        .to_string()
    }

    #[test]
    fn test_parses_clean_json() {
        let fragments = parse_analysis_response(&clean_response()).unwrap();
        assert!(fragments.categories.is_some());
        assert_eq!(
            fragments.insights.unwrap()["quickWins"],
            json!(["add a booking link"])
        );
    }

    #[test]
    fn test_parses_fenced_json() {
        let fenced = format!("```json\n{}\n```", clean_response());
        assert!(parse_analysis_response(&fenced).is_some());

        let bare_fence = format!("```\n{}\n```", clean_response());
        assert!(parse_analysis_response(&bare_fence).is_some());
    }

    #[test]
    fn test_parses_fence_with_missing_closing_fence() {
        let open_only = format!("```json\n{}", clean_response());
        assert!(parse_analysis_response(&open_only).is_some());
    }

    #[test]
    fn test_repairs_truncated_response() {
        let full = clean_response();
        let truncated = &full[..full.len() - 40];
        let fragments = parse_analysis_response(truncated).unwrap();
        let categories = fragments.categories.unwrap();
        assert!(categories.get("businessContext").is_some());
    }

    #[test]
    fn test_extracts_from_surrounding_prose() {
        let wrapped = format!(
            "Here is the completed analysis:\n\n{}\n\nLet me know if you need more.",
            clean_response()
        );
        let fragments = parse_analysis_response(&wrapped).unwrap();
        assert!(fragments.categories.is_some());
        assert!(fragments.insights.is_some());
    }

    #[test]
    fn test_null_categories_recovers_insights_alone() {
        let text = r#"{"categories": null, "insights": {"quickWins": []}}"#;
        let fragments = parse_analysis_response(text).unwrap();
        assert!(fragments.categories.is_none());
        assert!(fragments.insights.is_some());
    }

    #[test]
    fn test_unknown_category_names_are_rejected() {
        let text = r#"{"categories": {"mysteryBucket": {}}}"#;
        // stage 2 accepts any categories object; the known-name check
        // applies to the riskier text-search path only
        let fragments = parse_analysis_response(text);
        assert!(fragments.is_some());

        let prose = r#"I considered "categories": {"mysteryBucket": {}} but found nothing."#;
        assert!(parse_analysis_response(prose).is_none());
    }

    #[test]
    fn test_garbage_returns_none() {
        assert!(parse_analysis_response("").is_none());
        assert!(parse_analysis_response("no structure here at all").is_none());
        assert!(parse_analysis_response("[1, 2, 3]").is_none());
    }

    #[test]
    fn test_find_balanced_span() {
        assert_eq!(find_balanced_span("{}", 0), SpanEnd::Complete(2));
        assert_eq!(
            find_balanced_span(r#"{"a": {"b": 1}} trailing"#, 0),
            SpanEnd::Complete(15)
        );
        assert_eq!(
            find_balanced_span(r#"{"tricky": "a } in a string"}"#, 0),
            SpanEnd::Complete(29)
        );
        assert_eq!(
            find_balanced_span(r#"{"esc": "\" }"}"#, 0),
            SpanEnd::Complete(15)
        );
        assert_eq!(find_balanced_span(r#"{"open": "#, 0), SpanEnd::Unterminated);
        // scanning can begin before the brace
        assert_eq!(find_balanced_span("xx {}", 0), SpanEnd::Complete(5));
    }

    #[test]
    fn test_truncated_tail_still_yields_categories() {
        // cut mid-way through the insights list; categories survives intact
        let text = r#"{"categories": {"toneVoice": {"brandTone": {"value": "friendly", "source": "crawl", "confidence": 0.8, "reasoning": "copy"}}}, "insights": {"quickWins": ["respond to rev"#;
        let fragments = parse_analysis_response(text).unwrap();
        let categories = fragments.categories.unwrap();
        assert_eq!(
            categories["toneVoice"]["brandTone"]["value"],
            json!("friendly")
        );
    }

    proptest! {
        #[test]
        fn prop_parser_is_total(text in any::<String>()) {
            // never panics, whatever bytes arrive
            let _ = parse_analysis_response(&text);
        }

        #[test]
        fn prop_span_scan_is_total(text in any::<String>(), start in 0usize..64) {
            let _ = find_balanced_span(&text, start);
        }
    }
}
