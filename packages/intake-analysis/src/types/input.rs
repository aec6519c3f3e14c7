//! Analysis input: the intake session envelope plus collected evidence.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Everything the analyzer knows about one intake session.
///
/// The basics (name, website, optional industry and location) come from the
/// intake form. Evidence payloads are whatever the collection jobs scraped.
/// The analyzer treats evidence internals as opaque JSON: it reasons about
/// presence or absence and renders present payloads into the model's data
/// context, but never imposes a schema on them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisInput {
    /// Intake session this analysis belongs to
    pub session_id: Uuid,

    /// Business name from the intake form
    pub business_name: String,

    /// Website URL from the intake form
    pub website: String,

    /// Industry from the intake form, when supplied
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,

    /// City from the intake form
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,

    /// State or region from the intake form
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,

    /// Scraped business profile listing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_data: Option<Value>,

    /// Sitemap fetch results
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sitemap_data: Option<Value>,

    /// Site crawl results
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crawl_data: Option<Value>,

    /// Technical audit results
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audit_data: Option<Value>,

    /// Competitor snapshots, one entry per competitor
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub competitor_data: Option<Vec<Value>>,

    /// Directory citation scan results, one entry per citation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub citation_data: Option<Vec<Value>>,

    /// Owner-verified corrections from a previous review pass.
    ///
    /// When present, these take precedence over anything the evidence
    /// suggests and are rendered into the prompt as authoritative.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_verified: Option<Value>,
}

impl AnalysisInput {
    /// Create an input with the required intake basics.
    pub fn new(
        session_id: Uuid,
        business_name: impl Into<String>,
        website: impl Into<String>,
    ) -> Self {
        Self {
            session_id,
            business_name: business_name.into(),
            website: website.into(),
            industry: None,
            city: None,
            state: None,
            profile_data: None,
            sitemap_data: None,
            crawl_data: None,
            audit_data: None,
            competitor_data: None,
            citation_data: None,
            user_verified: None,
        }
    }

    /// Set the industry.
    pub fn with_industry(mut self, industry: impl Into<String>) -> Self {
        self.industry = Some(industry.into());
        self
    }

    /// Set the city.
    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    /// Set the state.
    pub fn with_state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }

    /// Attach scraped profile evidence.
    pub fn with_profile_data(mut self, data: Value) -> Self {
        self.profile_data = Some(data);
        self
    }

    /// Attach sitemap evidence.
    pub fn with_sitemap_data(mut self, data: Value) -> Self {
        self.sitemap_data = Some(data);
        self
    }

    /// Attach crawl evidence.
    pub fn with_crawl_data(mut self, data: Value) -> Self {
        self.crawl_data = Some(data);
        self
    }

    /// Attach audit evidence.
    pub fn with_audit_data(mut self, data: Value) -> Self {
        self.audit_data = Some(data);
        self
    }

    /// Attach competitor snapshots.
    pub fn with_competitor_data(mut self, data: Vec<Value>) -> Self {
        self.competitor_data = Some(data);
        self
    }

    /// Attach citation scan results.
    pub fn with_citation_data(mut self, data: Vec<Value>) -> Self {
        self.citation_data = Some(data);
        self
    }

    /// Attach owner-verified corrections.
    pub fn with_user_verified(mut self, data: Value) -> Self {
        self.user_verified = Some(data);
        self
    }

    /// Whether any collected evidence is attached at all.
    pub fn has_any_evidence(&self) -> bool {
        self.profile_data.is_some()
            || self.sitemap_data.is_some()
            || self.crawl_data.is_some()
            || self.audit_data.is_some()
            || self.competitor_data.is_some()
            || self.citation_data.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_builder_and_evidence_presence() {
        let bare = AnalysisInput::new(Uuid::new_v4(), "Acme Plumbing", "https://acme.example");
        assert!(!bare.has_any_evidence());

        let with_profile = bare
            .clone()
            .with_industry("plumbing")
            .with_profile_data(json!({"rating": 4.8}));
        assert!(with_profile.has_any_evidence());
        assert_eq!(with_profile.industry.as_deref(), Some("plumbing"));
    }

    #[test]
    fn test_camel_case_serialization() {
        let input = AnalysisInput::new(Uuid::nil(), "Acme", "https://acme.example")
            .with_citation_data(vec![json!({"directory": "yelp"})]);

        let json = serde_json::to_value(&input).unwrap();
        assert_eq!(json["businessName"], "Acme");
        assert!(json.get("citationData").is_some());
        // absent evidence is omitted, not null
        assert!(json.get("profileData").is_none());
    }

    #[test]
    fn test_deserializes_sparse_payload() {
        let input: AnalysisInput = serde_json::from_value(json!({
            "sessionId": "00000000-0000-0000-0000-000000000000",
            "businessName": "Acme",
            "website": "https://acme.example"
        }))
        .unwrap();
        assert!(input.user_verified.is_none());
        assert!(!input.has_any_evidence());
    }
}
