use crate::error::AppError;

/// Handler for requests that match no route, or match a path but not its method
pub async fn not_found() -> AppError {
    AppError::NotFound("Endpoint not found".to_string())
}
