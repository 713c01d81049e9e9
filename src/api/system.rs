use axum::Json;

use super::{ApiError, HealthResponse};

/// `GET /healthcheck`
pub async fn healthcheck() -> Json<HealthResponse> {
    Json(HealthResponse { state: "OK" })
}

pub async fn not_found() -> ApiError {
    ApiError::NotFound
}

pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}
