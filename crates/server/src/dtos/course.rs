use crate::dtos::common::PaginationMeta;
use chrono::{DateTime, Utc};
use database::{
    entities::courses,
    services::course::{CourseChanges, CourseFilter, NewCourse},
};
use models::{
    catalog::{Category, Level},
    validation::{
        FieldErrors, MAX_TITLE_LEN, validate_non_negative, validate_positive, validate_required,
        validate_url,
    },
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

pub const MAX_PAGE_SIZE: u64 = 100;

#[derive(Debug, Serialize, ToSchema)]
pub struct CourseResponse {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    #[schema(value_type = String, example = "student")]
    pub category: Category,
    pub duration_weeks: i32,
    #[schema(value_type = String, example = "beginner")]
    pub level: Level,
    pub instructor: String,
    pub rating: f64,
    pub review_count: i32,
    pub price_cents: i64,
    pub thumbnail_url: Option<String>,
    pub video_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<courses::Model> for CourseResponse {
    fn from(course: courses::Model) -> Self {
        CourseResponse {
            id: course.id,
            title: course.title,
            description: course.description,
            category: course.category,
            duration_weeks: course.duration_weeks,
            level: course.level,
            instructor: course.instructor,
            rating: course.rating,
            review_count: course.review_count,
            price_cents: course.price_cents,
            thumbnail_url: course.thumbnail_url,
            video_url: course.video_url,
            created_at: course.created_at,
            updated_at: course.updated_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CourseListResponse {
    pub message: String,
    pub courses: Vec<CourseResponse>,
    pub pagination: PaginationMeta,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CourseEnvelope {
    pub message: String,
    pub course: CourseResponse,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CourseQueryParams {
    #[param(value_type = Option<String>, example = "kids")]
    pub category: Option<Category>,

    #[param(value_type = Option<String>, example = "beginner")]
    pub level: Option<Level>,

    /// Matched against course titles and descriptions
    pub search: Option<String>,

    #[serde(default = "default_page")]
    pub page: u64,

    #[serde(default = "default_limit")]
    pub limit: u64,
}

fn default_page() -> u64 {
    1
}

fn default_limit() -> u64 {
    10
}

impl CourseQueryParams {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        if self.page < 1 {
            errors.add("page", "must be at least 1");
        }
        if !(1..=MAX_PAGE_SIZE).contains(&self.limit) {
            errors.add("limit", format!("must be between 1 and {MAX_PAGE_SIZE}"));
        }
        errors.into_result()
    }

    pub fn filter(&self) -> CourseFilter {
        CourseFilter {
            category: self.category,
            level: self.level,
            search: self.search.clone(),
        }
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct CreateCourseRequest {
    pub title: String,
    pub description: String,
    #[schema(value_type = String, example = "student")]
    pub category: Option<Category>,
    pub duration_weeks: Option<i64>,
    #[schema(value_type = String, example = "beginner")]
    pub level: Option<Level>,
    pub instructor: String,
    pub price_cents: Option<i64>,
    pub thumbnail_url: Option<String>,
    pub video_url: Option<String>,
}

impl CreateCourseRequest {
    /// Validates every field and produces the course to store
    pub fn into_new_course(self) -> Result<NewCourse, FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.check("title", validate_required(&self.title, Some(MAX_TITLE_LEN)));
        errors.check("description", validate_required(&self.description, None));
        errors.check("instructor", validate_required(&self.instructor, Some(MAX_TITLE_LEN)));

        if self.category.is_none() {
            errors.add("category", "is required");
        }
        if self.level.is_none() {
            errors.add("level", "is required");
        }
        match self.duration_weeks {
            Some(weeks) => errors.check("duration_weeks", validate_duration(weeks)),
            None => errors.add("duration_weeks", "is required"),
        }
        match self.price_cents {
            Some(price) => errors.check("price_cents", validate_non_negative(price)),
            None => errors.add("price_cents", "is required"),
        }
        check_optional_url(&mut errors, "thumbnail_url", self.thumbnail_url.as_deref());
        check_optional_url(&mut errors, "video_url", self.video_url.as_deref());

        match (self.category, self.level, self.duration_weeks, self.price_cents) {
            (Some(category), Some(level), Some(duration_weeks), Some(price_cents))
                if errors.is_empty() =>
            {
                Ok(NewCourse {
                    title: self.title.trim().to_string(),
                    description: self.description.trim().to_string(),
                    category,
                    duration_weeks: duration_weeks as i32,
                    level,
                    instructor: self.instructor.trim().to_string(),
                    price_cents,
                    thumbnail_url: self.thumbnail_url.filter(|url| !url.is_empty()),
                    video_url: self.video_url.filter(|url| !url.is_empty()),
                })
            }
            _ => Err(errors),
        }
    }
}

/// Partial course update; only the fields present are changed
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct UpdateCourseRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    #[schema(value_type = Option<String>)]
    pub category: Option<Category>,
    pub duration_weeks: Option<i64>,
    #[schema(value_type = Option<String>)]
    pub level: Option<Level>,
    pub instructor: Option<String>,
    pub price_cents: Option<i64>,
    pub thumbnail_url: Option<String>,
    pub video_url: Option<String>,
}

impl UpdateCourseRequest {
    pub fn into_changes(self) -> Result<CourseChanges, FieldErrors> {
        let mut errors = FieldErrors::new();
        if let Some(title) = self.title.as_deref() {
            errors.check("title", validate_required(title, Some(MAX_TITLE_LEN)));
        }
        if let Some(description) = self.description.as_deref() {
            errors.check("description", validate_required(description, None));
        }
        if let Some(instructor) = self.instructor.as_deref() {
            errors.check("instructor", validate_required(instructor, Some(MAX_TITLE_LEN)));
        }
        if let Some(weeks) = self.duration_weeks {
            errors.check("duration_weeks", validate_duration(weeks));
        }
        if let Some(price) = self.price_cents {
            errors.check("price_cents", validate_non_negative(price));
        }
        check_optional_url(&mut errors, "thumbnail_url", self.thumbnail_url.as_deref());
        check_optional_url(&mut errors, "video_url", self.video_url.as_deref());
        errors.into_result()?;

        Ok(CourseChanges {
            title: self.title.map(|t| t.trim().to_string()),
            description: self.description.map(|d| d.trim().to_string()),
            category: self.category,
            duration_weeks: self.duration_weeks.map(|w| w as i32),
            level: self.level,
            instructor: self.instructor.map(|i| i.trim().to_string()),
            price_cents: self.price_cents,
            thumbnail_url: self.thumbnail_url,
            video_url: self.video_url,
        })
    }
}

fn validate_duration(weeks: i64) -> Result<(), String> {
    validate_positive(weeks)?;
    if weeks > i32::MAX as i64 {
        return Err("is too large".to_string());
    }
    Ok(())
}

// Empty strings are allowed and mean "no URL"
fn check_optional_url(errors: &mut FieldErrors, field: &str, url: Option<&str>) {
    if let Some(url) = url
        && !url.is_empty()
    {
        errors.check(field, validate_url(url));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_create() -> CreateCourseRequest {
        CreateCourseRequest {
            title: "  Intro to Rust ".to_string(),
            description: "Ownership and borrowing".to_string(),
            category: Some(Category::Student),
            duration_weeks: Some(8),
            level: Some(Level::Beginner),
            instructor: "Ferris".to_string(),
            price_cents: Some(0),
            thumbnail_url: Some(String::new()),
            video_url: None,
        }
    }

    #[test]
    fn test_create_request_produces_trimmed_course() {
        let course = valid_create().into_new_course().unwrap();
        assert_eq!(course.title, "Intro to Rust");
        assert_eq!(course.duration_weeks, 8);
        assert_eq!(course.thumbnail_url, None);
    }

    #[test]
    fn test_create_request_reports_every_problem() {
        let errors = CreateCourseRequest::default().into_new_course().unwrap_err();
        for field in [
            "title",
            "description",
            "instructor",
            "category",
            "level",
            "duration_weeks",
            "price_cents",
        ] {
            assert!(errors.get(field).is_some(), "missing error for {field}");
        }

        let mut request = valid_create();
        request.duration_weeks = Some(0);
        request.price_cents = Some(-1);
        request.video_url = Some("javascript:alert(1)".to_string());
        let errors = request.into_new_course().unwrap_err();
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn test_update_request_validates_present_fields_only() {
        let changes = UpdateCourseRequest {
            level: Some(Level::Advanced),
            ..Default::default()
        }
        .into_changes()
        .unwrap();
        assert_eq!(changes.level, Some(Level::Advanced));
        assert!(changes.title.is_none());

        let errors = UpdateCourseRequest {
            title: Some("   ".to_string()),
            ..Default::default()
        }
        .into_changes()
        .unwrap_err();
        assert!(errors.get("title").is_some());
    }

    #[test]
    fn test_query_params_bounds() {
        let params = CourseQueryParams {
            category: None,
            level: None,
            search: None,
            page: 0,
            limit: 500,
        };
        let errors = params.validate().unwrap_err();
        assert!(errors.get("page").is_some());
        assert!(errors.get("limit").is_some());
    }
}
