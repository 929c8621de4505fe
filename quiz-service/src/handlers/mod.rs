//! HTTP handlers for the quiz service.

pub mod health;
pub mod metrics;
pub mod quiz;

use axum::http::Uri;
use service_core::error::AppError;

/// JSON 404 for unknown routes.
pub async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(anyhow::anyhow!("No route for {}", uri.path()))
}
