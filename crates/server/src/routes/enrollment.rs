use crate::{
    auth::AuthUser,
    dtos::enrollment::{EnrollmentEnvelope, EnrollmentListResponse, ProgressRequest},
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
use database::services::enrollment::EnrollmentService;

/// Enroll the authenticated user in a course
#[utoipa::path(
    post,
    path = "/api/courses/{courseId}/enroll",
    params(
        ("courseId" = String, Path, description = "Course UUID")
    ),
    responses(
        (status = 201, description = "Enrolled", body = EnrollmentEnvelope),
        (status = 401, description = "Missing or invalid token", body = crate::error::ErrorResponse),
        (status = 404, description = "Course not found", body = crate::error::ErrorResponse),
        (status = 409, description = "Already enrolled", body = crate::error::ErrorResponse)
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Enrollments"
)]
pub async fn enroll(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(course_id): Path<String>,
) -> AppResult<(StatusCode, Json<EnrollmentEnvelope>)> {
    let course_id = parse_course_id(&course_id)?;
    let enrollment = EnrollmentService::enroll(&state.db, auth.user_id, course_id).await?;

    Ok((
        StatusCode::CREATED,
        Json(EnrollmentEnvelope {
            message: "Enrolled successfully".to_string(),
            enrollment: enrollment.into(),
        }),
    ))
}

/// Record progress through a course the user is enrolled in
#[utoipa::path(
    put,
    path = "/api/courses/{courseId}/progress",
    params(
        ("courseId" = String, Path, description = "Course UUID")
    ),
    request_body = ProgressRequest,
    responses(
        (status = 200, description = "Progress updated", body = EnrollmentEnvelope),
        (status = 400, description = "Invalid input", body = crate::error::ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = crate::error::ErrorResponse),
        (status = 404, description = "Not enrolled in this course", body = crate::error::ErrorResponse)
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Enrollments"
)]
pub async fn update_progress(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(course_id): Path<String>,
    JsonBody(payload): JsonBody<ProgressRequest>,
) -> AppResult<Json<EnrollmentEnvelope>> {
    let course_id = parse_course_id(&course_id)?;
    let progress = payload.validate()?;
    let enrollment =
        EnrollmentService::update_progress(&state.db, auth.user_id, course_id, progress).await?;

    Ok(Json(EnrollmentEnvelope {
        message: "Progress updated successfully".to_string(),
        enrollment: enrollment.into(),
    }))
}

/// List the authenticated user's enrollments
#[utoipa::path(
    get,
    path = "/api/users/profile/enrollments",
    responses(
        (status = 200, description = "Enrollments retrieved", body = EnrollmentListResponse),
        (status = 401, description = "Missing or invalid token", body = crate::error::ErrorResponse)
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Enrollments"
)]
pub async fn list_enrollments(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<EnrollmentListResponse>> {
    let enrollments = EnrollmentService::list_for_user(&state.db, auth.user_id).await?;

    Ok(Json(EnrollmentListResponse {
        message: "Enrollments retrieved successfully".to_string(),
        enrollments: enrollments.into_iter().map(Into::into).collect(),
    }))
}
