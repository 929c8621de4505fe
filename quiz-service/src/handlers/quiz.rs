use crate::error::QuizError;
use crate::models::QuizRequest;
use crate::services::metrics;
use crate::startup::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use validator::Validate;

/// `POST /api/generate-quiz`
///
/// Any body that is not JSON with a non-empty string `topic` is treated as a
/// missing topic.
pub async fn generate_quiz(
    State(state): State<AppState>,
    payload: Result<Json<QuizRequest>, JsonRejection>,
) -> Response {
    let result = handle(&state, payload).await;

    match result {
        Ok(quiz) => {
            metrics::record_quiz_request("success");
            ([(header::CONTENT_TYPE, "application/json")], quiz).into_response()
        }
        Err(e) => {
            metrics::record_quiz_request(e.outcome());
            e.into_response()
        }
    }
}

async fn handle(
    state: &AppState,
    payload: Result<Json<QuizRequest>, JsonRejection>,
) -> Result<String, QuizError> {
    let Json(request) = payload.map_err(|rejection| {
        tracing::debug!(error = %rejection, "Rejected quiz request body");
        QuizError::TopicMissing
    })?;
    request.validate().map_err(|_| QuizError::TopicMissing)?;

    tracing::info!(topic = %request.topic, "Generating quiz");

    state.generator.generate(&request.topic).await
}
