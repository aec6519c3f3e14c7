//! Baseline answer synthesis.
//!
//! Every analysis starts from a complete default answer set so the merge
//! step always has all 68 fields to override and callers never see a hole
//! in the questionnaire. Where a deterministic derivation from the supplied
//! input exists (URL scheme, evidence presence, intake basics) the default
//! carries the derived confidence tier; everything else is an explicit
//! unknown at floor confidence.

use serde_json::{json, Value};
use url::Url;

use crate::taxonomy::{self, CategorySpec, FieldKind};
use crate::types::field::{
    FieldMap, FieldSource, FieldValue, InferredField, CONFIDENCE_DERIVED, CONFIDENCE_FLOOR,
};
use crate::types::input::AnalysisInput;
use crate::types::insights::StrategicInsights;
use crate::types::result::AnalysisCategories;

/// Build the complete default answer set for an input.
///
/// Pure and total: every taxonomy field appears exactly once.
pub fn synthesize_defaults(input: &AnalysisInput) -> AnalysisCategories {
    let mut categories = AnalysisCategories::default();
    for category in taxonomy::CATEGORIES {
        let map = default_category(category, input);
        if let Some(slot) = categories.get_mut(category.name) {
            *slot = map;
        }
    }
    categories
}

fn default_category(category: &CategorySpec, input: &AnalysisInput) -> FieldMap {
    let mut map = FieldMap::with_capacity(category.fields.len());
    for field in category.fields {
        let answer = derived_default(category.name, field.name, input)
            .unwrap_or_else(|| unknown_default(&field.kind));
        map.insert(field.name.to_string(), answer);
    }
    map
}

/// The floor-tier default for a field with no usable signal.
///
/// List fields default to an empty list rather than `Unknown` so consumers
/// can iterate them unconditionally.
fn unknown_default(kind: &FieldKind) -> InferredField {
    match kind {
        FieldKind::TextList => InferredField::new(
            FieldValue::TextList(Vec::new()),
            FieldSource::ModelInference,
            CONFIDENCE_FLOOR,
            "No supporting evidence collected",
        ),
        _ => InferredField::unknown("No supporting evidence collected"),
    }
}

/// Deterministic derivations from directly-supplied input.
///
/// These never touch the network and never interpret evidence internals
/// beyond presence and list length.
fn derived_default(category: &str, field: &str, input: &AnalysisInput) -> Option<InferredField> {
    match (category, field) {
        ("businessContext", "businessName") => Some(InferredField::new(
            FieldValue::Text(input.business_name.clone()),
            FieldSource::UserInput,
            CONFIDENCE_DERIVED,
            "Provided at intake",
        )),
        ("businessContext", "industry") => input.industry.clone().map(|industry| {
            InferredField::new(
                FieldValue::Text(industry),
                FieldSource::UserInput,
                CONFIDENCE_DERIVED,
                "Provided at intake",
            )
        }),
        ("businessContext", "primaryLocation") => location_from_input(input),
        ("businessContext", "businessDescription") => input.industry.as_deref().map(|industry| {
            InferredField::new(
                FieldValue::Text(format!(
                    "{} is a {} business.",
                    input.business_name, industry
                )),
                FieldSource::ModelInference,
                CONFIDENCE_DERIVED,
                "Templated from intake basics",
            )
        }),
        ("localPresence", "profileClaimed") => input.profile_data.as_ref().map(|_| {
            InferredField::new(
                FieldValue::Flag(true),
                FieldSource::ProfileData,
                CONFIDENCE_DERIVED,
                "A business profile was found, which implies a claimed listing",
            )
        }),
        ("localPresence", "citationCount") => input.citation_data.as_ref().map(|citations| {
            InferredField::new(
                FieldValue::Number(citations.len() as f64),
                FieldSource::CitationData,
                CONFIDENCE_DERIVED,
                "Count of citation records collected",
            )
        }),
        ("websiteReadiness", "hasSsl") => ssl_from_website(&input.website),
        ("websiteReadiness", "hasSitemap") => input.sitemap_data.as_ref().map(|_| {
            InferredField::new(
                FieldValue::Flag(true),
                FieldSource::Sitemap,
                CONFIDENCE_DERIVED,
                "A sitemap was fetched during collection",
            )
        }),
        _ => None,
    }
}

fn ssl_from_website(website: &str) -> Option<InferredField> {
    let parsed = Url::parse(website).ok()?;
    let https = match parsed.scheme() {
        "https" => true,
        "http" => false,
        _ => return None,
    };
    Some(InferredField::new(
        FieldValue::Flag(https),
        FieldSource::UserInput,
        CONFIDENCE_DERIVED,
        if https {
            "Website URL uses https"
        } else {
            "Website URL uses plain http"
        },
    ))
}

fn location_from_input(input: &AnalysisInput) -> Option<InferredField> {
    let location = match (input.city.as_deref(), input.state.as_deref()) {
        (Some(city), Some(state)) => format!("{}, {}", city, state),
        (Some(city), None) => city.to_string(),
        (None, Some(state)) => state.to_string(),
        (None, None) => return None,
    };
    Some(InferredField::new(
        FieldValue::Text(location),
        FieldSource::UserInput,
        CONFIDENCE_DERIVED,
        "Provided at intake",
    ))
}

/// Build the default insight tree for an input.
///
/// Sections are populated with honest placeholders and collection guidance
/// rather than left null, so a fallback result is still actionable.
pub fn default_insights(input: &AnalysisInput) -> StrategicInsights {
    let mut quick_wins: Vec<Value> = Vec::new();
    if input.profile_data.is_none() {
        quick_wins.push(json!("Claim and complete the business profile listing"));
    }
    if website_is_plain_http(&input.website) {
        quick_wins.push(json!("Install an SSL certificate and redirect to https"));
    }
    if input.sitemap_data.is_none() {
        quick_wins.push(json!("Publish an XML sitemap and submit it for indexing"));
    }
    quick_wins.push(json!(
        "Respond to recent reviews to signal an actively managed business"
    ));

    let competitor_comparison = match input.competitor_data.as_ref() {
        Some(competitors) => json!({
            "summary": format!(
                "{} competitor snapshots collected but not yet analyzed",
                competitors.len()
            ),
            "advantages": [],
            "disadvantages": [],
        }),
        None => json!({
            "summary": "No competitor data collected",
            "advantages": [],
            "disadvantages": [],
        }),
    };

    let risk_factors = if input.has_any_evidence() {
        json!(["Partial evidence only; verify low-confidence fields before acting on them"])
    } else {
        json!(["No collected evidence was available; every finding is provisional"])
    };

    StrategicInsights {
        content_gaps: json!([]),
        competitor_comparison,
        target_customer_analysis: json!({
            "primarySegments": [],
            "summary": "Insufficient evidence to profile target customers",
        }),
        ranking_opportunities: json!([]),
        quick_wins: Value::Array(quick_wins),
        recommendations: json!([
            {
                "priority": 1,
                "action": "Run the full evidence collection (profile, crawl, audit) and re-run the analysis",
                "impact": "Unlocks grounded answers for most fields",
            },
            {
                "priority": 2,
                "action": "Verify the prefilled basics and correct anything wrong",
                "impact": "Corrections feed the next analysis pass at full confidence",
            },
        ]),
        risk_factors,
    }
}

fn website_is_plain_http(website: &str) -> bool {
    Url::parse(website)
        .map(|url| url.scheme() == "http")
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn bare_input() -> AnalysisInput {
        AnalysisInput::new(Uuid::new_v4(), "Acme", "https://acme.com")
    }

    #[test]
    fn test_defaults_cover_every_field() {
        let categories = synthesize_defaults(&bare_input());
        assert_eq!(categories.field_count(), taxonomy::field_count());

        for (name, map) in categories.iter() {
            let spec = taxonomy::lookup(name).unwrap();
            for field in spec.fields {
                assert!(map.contains_key(field.name), "{}.{} missing", name, field.name);
            }
        }
    }

    #[test]
    fn test_defaults_never_exceed_derived_tier() {
        let categories = synthesize_defaults(&bare_input());
        for (_, map) in categories.iter() {
            for (name, field) in map {
                assert!(
                    field.confidence <= CONFIDENCE_DERIVED,
                    "{} confidence {} above derived tier",
                    name,
                    field.confidence
                );
            }
        }
    }

    #[test]
    fn test_https_site_derives_ssl_flag() {
        let categories = synthesize_defaults(&bare_input());
        let has_ssl = &categories.website_readiness["hasSsl"];
        assert_eq!(has_ssl.value, FieldValue::Flag(true));
        assert_eq!(has_ssl.confidence, CONFIDENCE_DERIVED);
        assert_eq!(has_ssl.source, FieldSource::UserInput);
    }

    #[test]
    fn test_http_site_derives_negative_ssl_flag() {
        let input = AnalysisInput::new(Uuid::new_v4(), "Acme", "http://acme.com");
        let categories = synthesize_defaults(&input);
        assert_eq!(
            categories.website_readiness["hasSsl"].value,
            FieldValue::Flag(false)
        );
    }

    #[test]
    fn test_unparseable_website_leaves_ssl_unknown() {
        let input = AnalysisInput::new(Uuid::new_v4(), "Acme", "not a url");
        let categories = synthesize_defaults(&input);
        let has_ssl = &categories.website_readiness["hasSsl"];
        assert!(has_ssl.value.is_unknown());
        assert_eq!(has_ssl.confidence, CONFIDENCE_FLOOR);
    }

    #[test]
    fn test_bare_input_has_exactly_two_derived_fields() {
        // businessName and hasSsl are the only derivations available when
        // nothing but name and https URL were supplied
        let categories = synthesize_defaults(&bare_input());
        let derived = categories
            .iter()
            .flat_map(|(_, map)| map.values())
            .filter(|field| field.confidence == CONFIDENCE_DERIVED)
            .count();
        assert_eq!(derived, 2);
    }

    #[test]
    fn test_evidence_presence_derivations() {
        let input = bare_input()
            .with_profile_data(json!({"found": true}))
            .with_sitemap_data(json!({"urls": 25}))
            .with_citation_data(vec![json!({"d": "yelp"}), json!({"d": "bbb"})]);
        let categories = synthesize_defaults(&input);

        assert_eq!(
            categories.local_presence["profileClaimed"].value,
            FieldValue::Flag(true)
        );
        assert_eq!(
            categories.local_presence["citationCount"].value,
            FieldValue::Number(2.0)
        );
        assert_eq!(
            categories.website_readiness["hasSitemap"].value,
            FieldValue::Flag(true)
        );
        assert_eq!(
            categories.website_readiness["hasSitemap"].source,
            FieldSource::Sitemap
        );
    }

    #[test]
    fn test_list_fields_default_to_empty_lists() {
        let categories = synthesize_defaults(&bare_input());
        assert_eq!(
            categories.business_context["serviceArea"].value,
            FieldValue::TextList(Vec::new())
        );
        assert_eq!(
            categories.conversion_tracking["trackingGaps"].value,
            FieldValue::TextList(Vec::new())
        );
    }

    #[test]
    fn test_location_derivation_variants() {
        let both = bare_input().with_city("Duluth").with_state("MN");
        let categories = synthesize_defaults(&both);
        assert_eq!(
            categories.business_context["primaryLocation"].value,
            FieldValue::Text("Duluth, MN".into())
        );

        let city_only = bare_input().with_city("Duluth");
        let categories = synthesize_defaults(&city_only);
        assert_eq!(
            categories.business_context["primaryLocation"].value,
            FieldValue::Text("Duluth".into())
        );
    }

    #[test]
    fn test_default_insights_reflect_missing_evidence() {
        let insights = default_insights(&bare_input());
        let wins = insights.quick_wins.as_array().unwrap();
        assert!(wins
            .iter()
            .any(|w| w.as_str().unwrap_or_default().contains("profile")));
        assert!(insights.risk_factors[0]
            .as_str()
            .unwrap()
            .contains("No collected evidence"));

        // claimed profile removes the claim-profile win
        let with_profile = bare_input().with_profile_data(json!({}));
        let insights = default_insights(&with_profile);
        let wins = insights.quick_wins.as_array().unwrap();
        assert!(!wins
            .iter()
            .any(|w| w.as_str().unwrap_or_default().contains("Claim")));
    }

    #[test]
    fn test_default_insights_count_competitors() {
        let input = bare_input().with_competitor_data(vec![json!({}), json!({}), json!({})]);
        let insights = default_insights(&input);
        assert!(insights.competitor_comparison["summary"]
            .as_str()
            .unwrap()
            .starts_with("3 competitor"));
    }
}
