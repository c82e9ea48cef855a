use crate::dtos::common::HealthResponse;
use axum::{Json, http::StatusCode};

/// Simple endpoint that reports the service is running
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    ),
    tag = "Health"
)]
pub async fn health() -> (StatusCode, Json<HealthResponse>) {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "Server is running".to_string(),
        }),
    )
}
