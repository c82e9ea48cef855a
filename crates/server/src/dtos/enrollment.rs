use crate::dtos::course::CourseResponse;
use chrono::{DateTime, Utc};
use database::entities::{courses, enrollments};
use models::{progress::Progress, validation::FieldErrors};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Serialize, ToSchema)]
pub struct EnrollmentResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub course_id: Uuid,
    pub enrolled_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    /// Percentage in `0..=100`
    pub progress: i16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub course: Option<CourseResponse>,
}

impl From<enrollments::Model> for EnrollmentResponse {
    fn from(enrollment: enrollments::Model) -> Self {
        EnrollmentResponse {
            id: enrollment.id,
            user_id: enrollment.user_id,
            course_id: enrollment.course_id,
            enrolled_at: enrollment.enrolled_at,
            completed_at: enrollment.completed_at,
            progress: enrollment.progress,
            course: None,
        }
    }
}

impl From<(enrollments::Model, Option<courses::Model>)> for EnrollmentResponse {
    fn from((enrollment, course): (enrollments::Model, Option<courses::Model>)) -> Self {
        EnrollmentResponse {
            course: course.map(CourseResponse::from),
            ..EnrollmentResponse::from(enrollment)
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct EnrollmentEnvelope {
    pub message: String,
    pub enrollment: EnrollmentResponse,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct EnrollmentListResponse {
    pub message: String,
    pub enrollments: Vec<EnrollmentResponse>,
}

/// New progress value; anything outside `0..=100` is clamped
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct ProgressRequest {
    #[schema(value_type = i64, example = 50)]
    pub progress: Option<Progress>,
}

impl ProgressRequest {
    pub fn validate(&self) -> Result<Progress, FieldErrors> {
        self.progress.ok_or_else(|| {
            let mut errors = FieldErrors::new();
            errors.add("progress", "is required");
            errors
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_request() {
        let request: ProgressRequest = serde_json::from_str(r#"{"progress": 250}"#).unwrap();
        assert_eq!(*request.validate().unwrap(), 100);

        let missing: ProgressRequest = serde_json::from_str("{}").unwrap();
        let errors = missing.validate().unwrap_err();
        assert_eq!(errors.get("progress"), Some("is required"));
    }
}
