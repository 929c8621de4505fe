//! Generative model abstractions and implementations.
//!
//! Handlers depend on the [`TextProvider`] trait only, so the Gemini client
//! can be swapped for the mock in tests.

pub mod gemini;
pub mod mock;

use async_trait::async_trait;
use thiserror::Error;

/// Error type for provider operations.
///
/// Display renders the upstream message as-is; callers relay it to clients.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProviderError {
    #[error("{0}")]
    NotConfigured(String),

    #[error("{0}")]
    ApiError(String),

    #[error("{0}")]
    RateLimited(String),

    #[error("Response blocked by safety filters")]
    ContentFiltered,

    #[error("Model returned no text")]
    EmptyResponse,

    #[error("{0}")]
    NetworkError(String),
}

impl ProviderError {
    /// Short label used for metrics.
    pub fn error_type(&self) -> &'static str {
        match self {
            ProviderError::NotConfigured(_) => "not_configured",
            ProviderError::ApiError(_) => "api_error",
            ProviderError::RateLimited(_) => "rate_limited",
            ProviderError::ContentFiltered => "content_filtered",
            ProviderError::EmptyResponse => "empty_response",
            ProviderError::NetworkError(_) => "network_error",
        }
    }
}

/// Result of a provider call.
#[derive(Debug, Clone)]
pub struct ProviderResponse {
    /// Generated text, if the model produced any.
    pub text: Option<String>,

    pub input_tokens: i32,
    pub output_tokens: i32,

    pub finish_reason: FinishReason,
}

/// Reason why generation stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinishReason {
    Complete,
    Length,
    ContentFilter,
}

/// Optional sampling knobs forwarded to the model.
#[derive(Debug, Clone, Default)]
pub struct GenerationParams {
    /// Temperature (0.0 - 2.0).
    pub temperature: Option<f32>,

    /// Maximum output tokens.
    pub max_tokens: Option<i32>,
}

/// Trait for text generation providers (e.g., Gemini).
#[async_trait]
pub trait TextProvider: Send + Sync {
    /// Provider name, used as a metrics label.
    fn name(&self) -> &str;

    /// Model identifier, used as a metrics label.
    fn model(&self) -> &str;

    /// Whether the client initialized with usable credentials.
    ///
    /// Computed once at construction.
    fn is_configured(&self) -> bool;

    /// Submit a prompt and wait for the full response.
    async fn generate(
        &self,
        prompt: &str,
        params: &GenerationParams,
    ) -> Result<ProviderResponse, ProviderError>;
}
