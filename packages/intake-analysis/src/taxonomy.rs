//! The intake field taxonomy.
//!
//! A declarative registry of every questionnaire field the analysis answers:
//! seven categories, 68 fields. The registry is the single source of truth
//! consumed by default synthesis, prompt construction, response merging, and
//! metrics, so category and field names never drift between those stages.

/// The shape a field's value must take.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldKind {
    /// Free text
    Text,

    /// List of short strings
    TextList,

    /// Boolean
    Flag,

    /// Numeric value within an inclusive range
    Number { min: f64, max: f64 },

    /// One of a fixed set of options
    Choice { options: &'static [&'static str] },
}

impl FieldKind {
    /// Short value-shape description rendered into the system prompt.
    pub fn describe(&self) -> String {
        match self {
            FieldKind::Text => "string".to_string(),
            FieldKind::TextList => "array of strings".to_string(),
            FieldKind::Flag => "boolean".to_string(),
            FieldKind::Number { min, max } => format!("number between {} and {}", min, max),
            FieldKind::Choice { options } => format!("one of: {}", options.join(" | ")),
        }
    }
}

/// A single questionnaire field.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    /// JSON key within the category object
    pub name: &'static str,

    /// Expected value shape
    pub kind: FieldKind,

    /// One-line instruction rendered into the system prompt
    pub guidance: &'static str,
}

/// A category of related questionnaire fields.
#[derive(Debug, Clone, Copy)]
pub struct CategorySpec {
    /// JSON key within the categories object
    pub name: &'static str,

    /// Human-readable heading used in prompts
    pub title: &'static str,

    /// Fields in canonical order
    pub fields: &'static [FieldSpec],
}

const fn text(name: &'static str, guidance: &'static str) -> FieldSpec {
    FieldSpec {
        name,
        kind: FieldKind::Text,
        guidance,
    }
}

const fn text_list(name: &'static str, guidance: &'static str) -> FieldSpec {
    FieldSpec {
        name,
        kind: FieldKind::TextList,
        guidance,
    }
}

const fn flag(name: &'static str, guidance: &'static str) -> FieldSpec {
    FieldSpec {
        name,
        kind: FieldKind::Flag,
        guidance,
    }
}

const fn number(name: &'static str, min: f64, max: f64, guidance: &'static str) -> FieldSpec {
    FieldSpec {
        name,
        kind: FieldKind::Number { min, max },
        guidance,
    }
}

const fn choice(
    name: &'static str,
    options: &'static [&'static str],
    guidance: &'static str,
) -> FieldSpec {
    FieldSpec {
        name,
        kind: FieldKind::Choice { options },
        guidance,
    }
}

const BUSINESS_CONTEXT: &[FieldSpec] = &[
    text("businessName", "Legal or operating name of the business."),
    text(
        "industry",
        "Primary industry or vertical, e.g. plumbing, dental, landscaping.",
    ),
    choice(
        "businessType",
        &[
            "local-service",
            "retail",
            "restaurant",
            "professional-services",
            "e-commerce",
            "other",
        ],
        "Broad business model bucket.",
    ),
    number(
        "yearsInBusiness",
        0.0,
        150.0,
        "Years the business has been operating.",
    ),
    text(
        "primaryLocation",
        "Primary city and state served, e.g. \"Duluth, MN\".",
    ),
    text_list(
        "serviceArea",
        "Cities, neighborhoods, or regions the business serves.",
    ),
    text("targetAudience", "Who the business primarily sells to."),
    text_list(
        "uniqueSellingPoints",
        "Differentiators the business leads with.",
    ),
    text(
        "businessDescription",
        "One-paragraph description of what the business does.",
    ),
    text_list(
        "competitiveAdvantages",
        "Concrete advantages over named or likely competitors.",
    ),
];

const REVENUE_SERVICES: &[FieldSpec] = &[
    text_list("primaryServices", "Main services or product lines offered."),
    text_list(
        "topRevenueServices",
        "Services that likely drive the most revenue.",
    ),
    number(
        "averageTicketSize",
        0.0,
        1_000_000.0,
        "Typical transaction value in dollars.",
    ),
    flag(
        "pricingVisibility",
        "Whether prices are published on the website.",
    ),
    text(
        "seasonalPatterns",
        "How demand shifts across the year, if at all.",
    ),
    text_list(
        "bookingChannels",
        "Ways customers can book or buy: phone, form, online scheduler.",
    ),
    text_list(
        "paymentMethods",
        "Payment options mentioned: cards, financing, insurance.",
    ),
    choice(
        "serviceFrequency",
        &["one-time", "recurring", "subscription", "mixed"],
        "Dominant purchase cadence.",
    ),
    text_list(
        "upsellOpportunities",
        "Adjacent services that could be attached to existing jobs.",
    ),
    choice(
        "revenueModel",
        &["service", "product", "hybrid"],
        "Primary revenue model.",
    ),
];

const LOCAL_PRESENCE: &[FieldSpec] = &[
    flag(
        "profileClaimed",
        "Whether the business profile listing appears claimed by the owner.",
    ),
    number(
        "profileCompleteness",
        0.0,
        100.0,
        "How complete the business profile is.",
    ),
    number(
        "reviewCount",
        0.0,
        1_000_000.0,
        "Total review count on the primary profile.",
    ),
    number(
        "averageRating",
        0.0,
        5.0,
        "Average star rating on the primary profile.",
    ),
    number(
        "reviewResponseRate",
        0.0,
        100.0,
        "Percentage of reviews that received an owner response.",
    ),
    number(
        "photoCount",
        0.0,
        100_000.0,
        "Photos published on the profile.",
    ),
    text_list(
        "categoriesListed",
        "Business categories selected on the profile.",
    ),
    flag(
        "napConsistency",
        "Whether name, address, and phone match across citations.",
    ),
    number(
        "citationCount",
        0.0,
        10_000.0,
        "Directory citations found for the business.",
    ),
    choice(
        "localRankingStrength",
        &["strong", "moderate", "weak"],
        "Estimated strength in local map results.",
    ),
];

const WEBSITE_READINESS: &[FieldSpec] = &[
    flag("hasSsl", "Whether the site is served over HTTPS."),
    flag("mobileFriendly", "Whether pages render usably on mobile."),
    number(
        "pageSpeedScore",
        0.0,
        100.0,
        "Approximate page speed score.",
    ),
    flag("hasContactForm", "Whether a contact form is present."),
    flag(
        "hasOnlineBooking",
        "Whether visitors can book or schedule online.",
    ),
    flag(
        "hasClearCta",
        "Whether pages carry a clear primary call to action.",
    ),
    choice(
        "contentFreshness",
        &["current", "stale", "outdated"],
        "How recently content appears updated.",
    ),
    flag("hasBlog", "Whether a blog or articles section exists."),
    flag(
        "metaTagsOptimized",
        "Whether titles and descriptions look deliberately written.",
    ),
    flag("hasSitemap", "Whether an XML sitemap is available."),
    number(
        "brokenLinkCount",
        0.0,
        100_000.0,
        "Broken internal or outbound links found.",
    ),
    number(
        "pageCount",
        0.0,
        1_000_000.0,
        "Approximate number of indexable pages.",
    ),
];

const TONE_VOICE: &[FieldSpec] = &[
    choice(
        "brandTone",
        &[
            "professional",
            "friendly",
            "authoritative",
            "casual",
            "technical",
        ],
        "Overall tone of the site copy.",
    ),
    choice(
        "formalityLevel",
        &["formal", "neutral", "informal"],
        "Formality of the written voice.",
    ),
    text_list(
        "brandPersonality",
        "Personality traits the copy projects.",
    ),
    choice(
        "readingLevel",
        &["simple", "moderate", "advanced"],
        "Approximate reading level of the copy.",
    ),
    text_list(
        "emotionalAppeals",
        "Emotional angles used: trust, urgency, pride, relief.",
    ),
    text_list("keyMessages", "Messages repeated across pages."),
    text(
        "vocabularyStyle",
        "Characteristic vocabulary, e.g. trade jargon vs plain language.",
    ),
    number(
        "consistencyScore",
        0.0,
        100.0,
        "How consistent the voice is across pages.",
    ),
];

const CONVERSION_TRACKING: &[FieldSpec] = &[
    flag(
        "hasGoogleAnalytics",
        "Whether a Google Analytics tag is present.",
    ),
    flag(
        "hasTagManager",
        "Whether a tag manager container is present.",
    ),
    flag("hasMetaPixel", "Whether a Meta pixel is present."),
    flag(
        "conversionGoalsDefined",
        "Whether explicit conversion goals appear configured.",
    ),
    flag(
        "hasCallTracking",
        "Whether call tracking numbers are in use.",
    ),
    flag(
        "formSubmissionTracking",
        "Whether form submissions appear tracked.",
    ),
    flag(
        "hasCrmIntegration",
        "Whether forms feed a CRM or marketing platform.",
    ),
    text(
        "primaryConversionAction",
        "The action the site most wants visitors to take.",
    ),
    text_list("trackingGaps", "Measurement gaps worth closing."),
];

const AI_READINESS: &[FieldSpec] = &[
    flag(
        "hasStructuredData",
        "Whether schema.org structured data is present.",
    ),
    flag("hasFaqContent", "Whether FAQ-style content exists."),
    flag(
        "questionStyleHeadings",
        "Whether headings are phrased as questions.",
    ),
    choice(
        "entityClarity",
        &["clear", "partial", "unclear"],
        "How unambiguously the business entity is described.",
    ),
    number(
        "contentDepthScore",
        0.0,
        100.0,
        "Depth of topical coverage.",
    ),
    flag(
        "hasLocalBusinessSchema",
        "Whether LocalBusiness schema markup is present.",
    ),
    flag(
        "conversationalTone",
        "Whether copy reads naturally when quoted by an assistant.",
    ),
    choice(
        "citableFactDensity",
        &["high", "medium", "low"],
        "Density of concrete, citable facts.",
    ),
    choice(
        "answerEngineVisibility",
        &["visible", "limited", "absent"],
        "Presence in AI answer surfaces.",
    ),
];

/// All categories in canonical order.
pub const CATEGORIES: &[CategorySpec] = &[
    CategorySpec {
        name: "businessContext",
        title: "Business Context",
        fields: BUSINESS_CONTEXT,
    },
    CategorySpec {
        name: "revenueServices",
        title: "Revenue & Services",
        fields: REVENUE_SERVICES,
    },
    CategorySpec {
        name: "localPresence",
        title: "Local Presence",
        fields: LOCAL_PRESENCE,
    },
    CategorySpec {
        name: "websiteReadiness",
        title: "Website Readiness",
        fields: WEBSITE_READINESS,
    },
    CategorySpec {
        name: "toneVoice",
        title: "Tone & Voice",
        fields: TONE_VOICE,
    },
    CategorySpec {
        name: "conversionTracking",
        title: "Conversion Tracking",
        fields: CONVERSION_TRACKING,
    },
    CategorySpec {
        name: "aiReadiness",
        title: "AI & Answer Engine Readiness",
        fields: AI_READINESS,
    },
];

/// Look up a category by its JSON key.
pub fn lookup(name: &str) -> Option<&'static CategorySpec> {
    CATEGORIES.iter().find(|c| c.name == name)
}

/// Whether a string names a known category.
pub fn is_known_category(name: &str) -> bool {
    lookup(name).is_some()
}

/// Total number of fields across all categories.
pub fn field_count() -> usize {
    CATEGORIES.iter().map(|c| c.fields.len()).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_field_count() {
        assert_eq!(field_count(), 68);
    }

    #[test]
    fn test_category_count() {
        assert_eq!(CATEGORIES.len(), 7);
    }

    #[test]
    fn test_names_are_unique() {
        let mut categories = HashSet::new();
        for category in CATEGORIES {
            assert!(categories.insert(category.name), "duplicate category {}", category.name);

            let mut fields = HashSet::new();
            for field in category.fields {
                assert!(
                    fields.insert(field.name),
                    "duplicate field {} in {}",
                    field.name,
                    category.name
                );
            }
        }
    }

    #[test]
    fn test_lookup() {
        let category = lookup("websiteReadiness").unwrap();
        assert_eq!(category.title, "Website Readiness");
        assert!(category.fields.iter().any(|f| f.name == "hasSsl"));

        assert!(lookup("notACategory").is_none());
        assert!(is_known_category("toneVoice"));
    }

    #[test]
    fn test_choice_options_are_nonempty() {
        for category in CATEGORIES {
            for field in category.fields {
                if let FieldKind::Choice { options } = field.kind {
                    assert!(!options.is_empty(), "{} has no options", field.name);
                }
            }
        }
    }

    #[test]
    fn test_kind_descriptions() {
        assert_eq!(FieldKind::Flag.describe(), "boolean");
        assert_eq!(
            FieldKind::Number { min: 0.0, max: 5.0 }.describe(),
            "number between 0 and 5"
        );
        assert!(FieldKind::Choice {
            options: &["a", "b"]
        }
        .describe()
        .contains("a | b"));
    }
}
