use crate::models::HealthStatus;
use axum::Json;

/// Liveness check. Does not depend on the model client.
pub async fn health_check() -> Json<HealthStatus> {
    Json(HealthStatus::ok())
}
