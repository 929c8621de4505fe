use crate::services::providers::ProviderError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use service_core::error::ErrorResponse;
use thiserror::Error;

/// Failures of a quiz request. None of them are retried.
#[derive(Debug, Error)]
pub enum QuizError {
    #[error("Topic not provided")]
    TopicMissing,

    #[error("Gemini API not configured")]
    NotConfigured,

    #[error("{0}")]
    Upstream(#[from] ProviderError),

    #[error("Model returned an invalid quiz: {0}")]
    InvalidOutput(String),
}

impl QuizError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            QuizError::TopicMissing => StatusCode::BAD_REQUEST,
            QuizError::NotConfigured | QuizError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
            QuizError::InvalidOutput(_) => StatusCode::BAD_GATEWAY,
        }
    }

    /// Label for the `quiz_requests_total` counter.
    pub fn outcome(&self) -> &'static str {
        match self {
            QuizError::TopicMissing => "topic_missing",
            QuizError::NotConfigured => "not_configured",
            QuizError::Upstream(_) => "upstream_error",
            QuizError::InvalidOutput(_) => "invalid_output",
        }
    }
}

impl IntoResponse for QuizError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(ErrorResponse::new(self.to_string()))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_match_error_kind() {
        assert_eq!(QuizError::TopicMissing.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            QuizError::NotConfigured.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            QuizError::Upstream(ProviderError::NetworkError("connection reset".into()))
                .status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            QuizError::InvalidOutput("expected 3 questions, got 2".into()).status_code(),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn upstream_message_is_relayed_verbatim() {
        let err = QuizError::from(ProviderError::RateLimited("quota exceeded".into()));
        assert_eq!(err.to_string(), "quota exceeded");
    }
}
