pub mod course;
pub mod enrollment;
pub mod fallback;
pub mod health;
pub mod review;
pub mod user;

use crate::error::AppError;
use uuid::Uuid;

/// Parses a course id path segment; ids that are not UUIDs cannot exist
pub(crate) fn parse_course_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| AppError::NotFound("Course not found".to_string()))
}
