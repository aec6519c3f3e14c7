//! End-to-end analysis run against the mock generator.
//!
//! Runs the full pipeline offline: defaults, prompts, parsing, merging,
//! and confidence aggregation, with a canned model response.

use serde_json::json;
use uuid::Uuid;

use intake_analysis::testing::MockGenerator;
use intake_analysis::{AnalysisInput, Analyzer};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let response = json!({
        "categories": {
            "businessContext": {
                "industry": {
                    "value": "plumbing",
                    "source": "crawl",
                    "confidence": 0.9,
                    "reasoning": "service pages describe plumbing work"
                }
            },
            "localPresence": {
                "reviewCount": {
                    "value": 47,
                    "source": "profile-data",
                    "confidence": 0.92,
                    "reasoning": "profile shows 47 reviews"
                }
            }
        },
        "insights": {
            "quickWins": ["respond to the 12 unanswered reviews"]
        }
    })
    .to_string();

    let generator = MockGenerator::new()
        .with_response(response)
        .with_usage(1800, 900);
    let analyzer = Analyzer::new(generator);

    let input = AnalysisInput::new(Uuid::new_v4(), "Acme Plumbing", "https://acme.example")
        .with_industry("plumbing")
        .with_city("Duluth")
        .with_state("MN")
        .with_profile_data(json!({"rating": 4.8, "reviews": 47}))
        .with_crawl_data(json!({"pages": 12, "hasContactForm": true}));

    let outcome = analyzer.analyze(&input).await;

    println!("=== Analysis Summary ===");
    println!("model:              {}", outcome.data.model);
    println!(
        "overall confidence: {:.3}",
        outcome.data.metrics.overall_confidence
    );
    println!(
        "data quality:       {}",
        outcome.data.metrics.data_quality_score
    );
    println!(
        "high / low fields:  {} / {}",
        outcome.data.metrics.fields_with_high_confidence,
        outcome.data.metrics.fields_with_low_confidence
    );
    println!("estimated cost:     ${:.4}", outcome.estimated_cost);

    println!("\n=== Sample Answers ===");
    let industry = &outcome.data.categories.business_context["industry"];
    println!(
        "industry:    {:?} (confidence {:.2})",
        industry.value, industry.confidence
    );
    let reviews = &outcome.data.categories.local_presence["reviewCount"];
    println!(
        "reviewCount: {:?} (confidence {:.2})",
        reviews.value, reviews.confidence
    );

    println!("\n=== Quick Wins ===");
    println!(
        "{}",
        serde_json::to_string_pretty(&outcome.data.insights.quick_wins)?
    );

    Ok(())
}
