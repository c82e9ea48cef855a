use crate::{
    auth::AdminUser,
    dtos::{
        common::{MessageResponse, PaginationMeta},
        course::{
            CourseEnvelope, CourseListResponse, CourseQueryParams, CreateCourseRequest,
            UpdateCourseRequest,
        },
    },
    error::{AppError, AppResult},
    extract::{JsonBody, QueryParams},
    routes::parse_course_id,
    state::AppState,
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use database::services::course::CourseService;

/// Get paginated list of courses
#[utoipa::path(
    get,
    path = "/api/courses",
    params(CourseQueryParams),
    responses(
        (status = 200, description = "List of courses retrieved successfully", body = CourseListResponse),
        (status = 400, description = "Invalid query parameters", body = crate::error::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::error::ErrorResponse)
    ),
    tag = "Courses"
)]
pub async fn get_all_courses(
    State(state): State<AppState>,
    QueryParams(params): QueryParams<CourseQueryParams>,
) -> AppResult<Json<CourseListResponse>> {
    params.validate()?;

    let (courses, total_items) =
        CourseService::list_courses(&state.db, params.filter(), params.page, params.limit).await?;

    Ok(Json(CourseListResponse {
        message: "Courses retrieved successfully".to_string(),
        courses: courses.into_iter().map(Into::into).collect(),
        pagination: PaginationMeta::new(params.page, params.limit, total_items),
    }))
}

/// Get a specific course by ID
#[utoipa::path(
    get,
    path = "/api/courses/{courseId}",
    params(
        ("courseId" = String, Path, description = "Course UUID")
    ),
    responses(
        (status = 200, description = "Course found", body = CourseEnvelope),
        (status = 404, description = "Course not found", body = crate::error::ErrorResponse)
    ),
    tag = "Courses"
)]
pub async fn get_course_by_id(
    State(state): State<AppState>,
    Path(course_id): Path<String>,
) -> AppResult<Json<CourseEnvelope>> {
    let course_id = parse_course_id(&course_id)?;

    let course = CourseService::get_course_by_id(&state.db, course_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Course not found".to_string()))?;

    Ok(Json(CourseEnvelope {
        message: "Course retrieved".to_string(),
        course: course.into(),
    }))
}

/// Create a new course (admin only)
#[utoipa::path(
    post,
    path = "/api/courses",
    request_body = CreateCourseRequest,
    responses(
        (status = 201, description = "Course created", body = CourseEnvelope),
        (status = 400, description = "Invalid input", body = crate::error::ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = crate::error::ErrorResponse),
        (status = 403, description = "Caller is not an admin", body = crate::error::ErrorResponse)
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Courses"
)]
pub async fn create_course(
    State(state): State<AppState>,
    _admin: AdminUser,
    JsonBody(payload): JsonBody<CreateCourseRequest>,
) -> AppResult<(StatusCode, Json<CourseEnvelope>)> {
    let new_course = payload.into_new_course()?;
    let course = CourseService::create_course(&state.db, new_course).await?;

    Ok((
        StatusCode::CREATED,
        Json(CourseEnvelope {
            message: "Course created successfully".to_string(),
            course: course.into(),
        }),
    ))
}

/// Update a course (admin only)
#[utoipa::path(
    put,
    path = "/api/courses/{courseId}",
    params(
        ("courseId" = String, Path, description = "Course UUID")
    ),
    request_body = UpdateCourseRequest,
    responses(
        (status = 200, description = "Course updated", body = CourseEnvelope),
        (status = 400, description = "Invalid input", body = crate::error::ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = crate::error::ErrorResponse),
        (status = 403, description = "Caller is not an admin", body = crate::error::ErrorResponse),
        (status = 404, description = "Course not found", body = crate::error::ErrorResponse)
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Courses"
)]
pub async fn update_course(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(course_id): Path<String>,
    JsonBody(payload): JsonBody<UpdateCourseRequest>,
) -> AppResult<Json<CourseEnvelope>> {
    let course_id = parse_course_id(&course_id)?;
    let changes = payload.into_changes()?;
    let course = CourseService::update_course(&state.db, course_id, changes).await?;

    Ok(Json(CourseEnvelope {
        message: "Course updated successfully".to_string(),
        course: course.into(),
    }))
}

/// Delete a course with its enrollments and reviews (admin only)
#[utoipa::path(
    delete,
    path = "/api/courses/{courseId}",
    params(
        ("courseId" = String, Path, description = "Course UUID")
    ),
    responses(
        (status = 200, description = "Course deleted", body = MessageResponse),
        (status = 401, description = "Missing or invalid token", body = crate::error::ErrorResponse),
        (status = 403, description = "Caller is not an admin", body = crate::error::ErrorResponse),
        (status = 404, description = "Course not found", body = crate::error::ErrorResponse)
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Courses"
)]
pub async fn delete_course(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(course_id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    let course_id = parse_course_id(&course_id)?;
    CourseService::delete_course(&state.db, course_id).await?;

    Ok(Json(MessageResponse {
        message: "Course deleted successfully".to_string(),
    }))
}
