use crate::{
    auth::AuthUser,
    dtos::review::{CreateReviewRequest, ReviewEnvelope, ReviewListResponse},
    error::AppResult,
    extract::JsonBody,
    routes::parse_course_id,
    state::AppState,
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use database::services::review::ReviewService;

/// List the reviews of a course
#[utoipa::path(
    get,
    path = "/api/courses/{courseId}/reviews",
    params(
        ("courseId" = String, Path, description = "Course UUID")
    ),
    responses(
        (status = 200, description = "Reviews retrieved", body = ReviewListResponse),
        (status = 404, description = "Course not found", body = crate::error::ErrorResponse)
    ),
    tag = "Reviews"
)]
pub async fn list_reviews(
    State(state): State<AppState>,
    Path(course_id): Path<String>,
) -> AppResult<Json<ReviewListResponse>> {
    let course_id = parse_course_id(&course_id)?;
    let reviews = ReviewService::list_for_course(&state.db, course_id).await?;

    Ok(Json(ReviewListResponse {
        message: "Reviews retrieved successfully".to_string(),
        reviews: reviews.into_iter().map(Into::into).collect(),
    }))
}

/// Review a course the authenticated user is enrolled in
#[utoipa::path(
    post,
    path = "/api/courses/{courseId}/reviews",
    params(
        ("courseId" = String, Path, description = "Course UUID")
    ),
    request_body = CreateReviewRequest,
    responses(
        (status = 201, description = "Review created", body = ReviewEnvelope),
        (status = 400, description = "Invalid input", body = crate::error::ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = crate::error::ErrorResponse),
        (status = 403, description = "Not enrolled in this course", body = crate::error::ErrorResponse),
        (status = 404, description = "Course not found", body = crate::error::ErrorResponse),
        (status = 409, description = "Course already reviewed", body = crate::error::ErrorResponse)
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Reviews"
)]
pub async fn create_review(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(course_id): Path<String>,
    JsonBody(payload): JsonBody<CreateReviewRequest>,
) -> AppResult<(StatusCode, Json<ReviewEnvelope>)> {
    let course_id = parse_course_id(&course_id)?;
    let rating = payload.validate()?;

    let review =
        ReviewService::create_review(&state.db, auth.user_id, course_id, rating, payload.comment)
            .await?;

    Ok((
        StatusCode::CREATED,
        Json(ReviewEnvelope {
            message: "Review created successfully".to_string(),
            review: review.into(),
        }),
    ))
}
