//! Quiz generation: prompt construction, the model call and output cleanup.

use crate::error::QuizError;
use crate::models::QuizResponse;
use crate::services::metrics;
use crate::services::providers::{GenerationParams, ProviderError, TextProvider};
use std::sync::Arc;
use std::time::Instant;

/// Fence markers models wrap JSON in. Longest first so the language tag goes too.
const FENCE_MARKERS: [&str; 2] = ["```json", "```"];

/// Build the instruction sent to the model for `topic`.
pub fn build_prompt(topic: &str) -> String {
    format!(
        "Generate a multiple-choice quiz about \"{topic}\".\n\
         Respond with a single JSON object and nothing else. The object must have exactly \
         one key, \"questions\", whose value is an array of exactly 3 objects. Each object \
         must have these keys:\n\
         - \"question_text\": the question as a string\n\
         - \"options\": an array of exactly 4 answer strings\n\
         - \"correct_answer\": a string identical to one of the 4 options\n\
         Example format:\n\
         {{\"questions\": [{{\"question_text\": \"...\", \"options\": [\"...\", \"...\", \"...\", \"...\"], \"correct_answer\": \"...\"}}]}}"
    )
}

/// Remove code fence markers and surrounding whitespace from model output.
pub fn strip_fences(raw: &str) -> String {
    FENCE_MARKERS
        .iter()
        .fold(raw.to_string(), |text, marker| text.replace(marker, ""))
        .trim()
        .to_string()
}

/// Turns a topic into quiz JSON using the injected model client.
#[derive(Clone)]
pub struct QuizGenerator {
    provider: Arc<dyn TextProvider>,
    params: GenerationParams,
    validate_output: bool,
}

impl QuizGenerator {
    pub fn new(provider: Arc<dyn TextProvider>) -> Self {
        Self {
            provider,
            params: GenerationParams::default(),
            validate_output: false,
        }
    }

    pub fn with_params(mut self, params: GenerationParams) -> Self {
        self.params = params;
        self
    }

    /// Reject output that does not parse as a three-question quiz.
    pub fn with_output_validation(mut self, enabled: bool) -> Self {
        self.validate_output = enabled;
        self
    }

    /// Whether the model client came up with a credential.
    pub fn is_configured(&self) -> bool {
        self.provider.is_configured()
    }

    /// Ask the model for a quiz on `topic` and return the cleaned JSON text.
    ///
    /// Unless output validation is on, the text is returned as-is even when
    /// it is not valid JSON.
    pub async fn generate(&self, topic: &str) -> Result<String, QuizError> {
        if !self.is_configured() {
            return Err(QuizError::NotConfigured);
        }

        let prompt = build_prompt(topic);
        let provider = self.provider.name();
        let model = self.provider.model();

        let started = Instant::now();
        let result = self.provider.generate(&prompt, &self.params).await;
        metrics::record_provider_latency(provider, model, started.elapsed().as_secs_f64());

        let response = result.map_err(|e| {
            metrics::record_provider_error(provider, e.error_type());
            tracing::error!(provider, model, error = %e, "Quiz generation failed");
            e
        })?;

        tracing::info!(
            provider,
            model,
            input_tokens = response.input_tokens,
            output_tokens = response.output_tokens,
            finish_reason = ?response.finish_reason,
            "Model responded"
        );

        let raw = response.text.ok_or_else(|| {
            metrics::record_provider_error(provider, ProviderError::EmptyResponse.error_type());
            ProviderError::EmptyResponse
        })?;
        let quiz = strip_fences(&raw);

        if self.validate_output {
            let parsed: QuizResponse = serde_json::from_str(&quiz)
                .map_err(|e| QuizError::InvalidOutput(e.to_string()))?;
            parsed.check().map_err(QuizError::InvalidOutput)?;
        }

        Ok(quiz)
    }
}
