use chrono::{DateTime, Utc};
use database::entities::reviews;
use models::{
    progress::Rating,
    validation::{FieldErrors, validate_required},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

pub const MAX_COMMENT_LEN: usize = 2000;

#[derive(Debug, Serialize, ToSchema)]
pub struct ReviewResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub course_id: Uuid,
    pub rating: i16,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

impl From<reviews::Model> for ReviewResponse {
    fn from(review: reviews::Model) -> Self {
        ReviewResponse {
            id: review.id,
            user_id: review.user_id,
            course_id: review.course_id,
            rating: review.rating,
            comment: review.comment,
            created_at: review.created_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ReviewEnvelope {
    pub message: String,
    pub review: ReviewResponse,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ReviewListResponse {
    pub message: String,
    pub reviews: Vec<ReviewResponse>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct CreateReviewRequest {
    /// One to five stars
    pub rating: Option<i64>,
    pub comment: String,
}

impl CreateReviewRequest {
    pub fn validate(&self) -> Result<Rating, FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.check("comment", validate_required(&self.comment, Some(MAX_COMMENT_LEN)));

        let rating = match self.rating {
            Some(value) => Rating::new(value)
                .map_err(|e| errors.add("rating", e.to_string()))
                .ok(),
            None => {
                errors.add("rating", "is required");
                None
            }
        };

        match rating {
            Some(rating) if errors.is_empty() => Ok(rating),
            _ => Err(errors),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_review_request_validation() {
        let ok = CreateReviewRequest {
            rating: Some(4),
            comment: "Clear and well paced".to_string(),
        };
        assert_eq!(*ok.validate().unwrap(), 4);

        let errors = CreateReviewRequest {
            rating: Some(6),
            comment: " ".to_string(),
        }
        .validate()
        .unwrap_err();
        assert_eq!(errors.get("rating"), Some("rating must be between 1 and 5, got 6"));
        assert!(errors.get("comment").is_some());

        let errors = CreateReviewRequest::default().validate().unwrap_err();
        assert_eq!(errors.get("rating"), Some("is required"));
    }
}
