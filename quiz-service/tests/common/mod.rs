#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Method, Request},
    response::Response,
    Router,
};
use http_body_util::BodyExt;
use quiz_service::services::providers::mock::MockTextProvider;
use quiz_service::services::QuizGenerator;
use quiz_service::{build_router, AppState};
use std::sync::Arc;

pub const ROMAN_EMPIRE_QUIZ: &str = r#"{"questions":[{"question_text":"Who was the first Roman emperor?","options":["Augustus","Julius Caesar","Nero","Trajan"],"correct_answer":"Augustus"},{"question_text":"In which year did the Western Roman Empire fall?","options":["476 AD","410 AD","1453 AD","27 BC"],"correct_answer":"476 AD"},{"question_text":"What was the Roman name for the Mediterranean Sea?","options":["Mare Nostrum","Mare Magnum","Oceanus","Pontus Euxinus"],"correct_answer":"Mare Nostrum"}]}"#;

/// Router backed by `mock`, keeping the handle for call assertions.
pub fn test_app(mock: Arc<MockTextProvider>) -> Router {
    build_router(AppState::new(QuizGenerator::new(mock)))
}

pub fn quiz_request(body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/api/generate-quiz")
        .header("content-type", "application/json")
        .body(body.into())
        .unwrap()
}

pub fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub async fn body_bytes(response: Response) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}
