//! Analysis configuration.

/// Default model requested for generation.
pub const DEFAULT_MODEL: &str = "claude-3-5-sonnet-20241022";

/// Tunable settings for the analyzer.
///
/// The defaults are production values; tests and callers override the
/// pieces they care about through the `with_*` builders.
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    /// Model requested for generation
    pub model: String,

    /// Output token budget for the generation call
    pub max_tokens: u32,

    /// Sampling temperature; kept low so field answers stay consistent
    pub temperature: f32,

    /// Confidence at or above which a field counts as high confidence
    pub high_confidence_threshold: f64,

    /// Confidence at or below which a field counts as low confidence
    pub low_confidence_threshold: f64,

    /// Character budget per evidence section in the data context
    pub max_section_chars: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            max_tokens: 8192,
            temperature: 0.2,
            high_confidence_threshold: 0.7,
            low_confidence_threshold: 0.4,
            max_section_chars: 12_000,
        }
    }
}

impl AnalysisConfig {
    /// Set the model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the output token budget.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Set the sampling temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Set the high-confidence threshold.
    pub fn with_high_confidence_threshold(mut self, threshold: f64) -> Self {
        self.high_confidence_threshold = threshold;
        self
    }

    /// Set the low-confidence threshold.
    pub fn with_low_confidence_threshold(mut self, threshold: f64) -> Self {
        self.low_confidence_threshold = threshold;
        self
    }

    /// Set the per-section character budget.
    pub fn with_max_section_chars(mut self, max_section_chars: usize) -> Self {
        self.max_section_chars = max_section_chars;
        self
    }
}
