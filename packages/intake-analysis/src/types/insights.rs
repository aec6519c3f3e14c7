//! Strategic insight types.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Strategy recommendations produced alongside the field answers.
///
/// Each section holds free-form JSON: its shape varies with how much
/// evidence the model had, so the library stores the trees verbatim rather
/// than forcing a schema. A parsed response overrides sections one level
/// deep: a present top-level key replaces the default for that key
/// wholesale, absent keys keep their defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategicInsights {
    /// Content the site is missing relative to what customers ask
    #[serde(default)]
    pub content_gaps: Value,

    /// How the business compares to the collected competitors
    #[serde(default)]
    pub competitor_comparison: Value,

    /// Who the likely customers are and what they search for
    #[serde(default)]
    pub target_customer_analysis: Value,

    /// Keyword and topic openings worth pursuing
    #[serde(default)]
    pub ranking_opportunities: Value,

    /// Low-effort, high-impact actions
    #[serde(default)]
    pub quick_wins: Value,

    /// Prioritized recommendations
    #[serde(default)]
    pub recommendations: Value,

    /// Risks that could undermine the plan
    #[serde(default)]
    pub risk_factors: Value,
}

impl StrategicInsights {
    /// Replace the sections present in a parsed insights object.
    ///
    /// Non-object input and unknown keys are ignored.
    pub fn apply_overrides(&mut self, parsed: &Value) {
        let Some(map) = parsed.as_object() else { return };
        for (key, value) in map {
            match key.as_str() {
                "contentGaps" => self.content_gaps = value.clone(),
                "competitorComparison" => self.competitor_comparison = value.clone(),
                "targetCustomerAnalysis" => self.target_customer_analysis = value.clone(),
                "rankingOpportunities" => self.ranking_opportunities = value.clone(),
                "quickWins" => self.quick_wins = value.clone(),
                "recommendations" => self.recommendations = value.clone(),
                "riskFactors" => self.risk_factors = value.clone(),
                _ => {}
            }
        }
    }
}
