//! Route table and middleware stack.

use crate::{
    doc::ApiDoc,
    error::{AppError, INTERNAL_ERROR_MESSAGE},
    routes::{course, enrollment, fallback, health, review, user},
    state::AppState,
    utils::request_log::log_requests,
};
use axum::{
    Router, middleware,
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use std::any::Any;
use tower::ServiceBuilder;
use tower_http::{catch_panic::CatchPanicLayer, compression::CompressionLayer, cors::CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Method and path of every API route, logged at startup
pub const ROUTE_TABLE: &[(&str, &str)] = &[
    ("GET", "/health"),
    ("POST", "/api/users/register"),
    ("POST", "/api/users/login"),
    ("GET", "/api/users/profile"),
    ("PUT", "/api/users/profile"),
    ("GET", "/api/users/profile/enrollments"),
    ("GET", "/api/courses"),
    ("POST", "/api/courses"),
    ("GET", "/api/courses/{courseId}"),
    ("PUT", "/api/courses/{courseId}"),
    ("DELETE", "/api/courses/{courseId}"),
    ("POST", "/api/courses/{courseId}/enroll"),
    ("PUT", "/api/courses/{courseId}/progress"),
    ("GET", "/api/courses/{courseId}/reviews"),
    ("POST", "/api/courses/{courseId}/reviews"),
    ("GET", "/docs"),
];

fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(user::register))
        .route("/login", post(user::login))
        .route("/profile", get(user::get_profile).put(user::update_profile))
        .route("/profile/enrollments", get(enrollment::list_enrollments))
}

fn course_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(course::get_all_courses).post(course::create_course))
        .route(
            "/{course_id}",
            get(course::get_course_by_id)
                .put(course::update_course)
                .delete(course::delete_course),
        )
        .route("/{course_id}/enroll", post(enrollment::enroll))
        .route("/{course_id}/progress", put(enrollment::update_progress))
        .route(
            "/{course_id}/reviews",
            get(review::list_reviews).post(review::create_review),
        )
}

/// Application routes without state or middleware
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .nest("/api/users", user_routes())
        .nest("/api/courses", course_routes())
}

fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(msg) = panic.downcast_ref::<String>() {
        msg.clone()
    } else if let Some(msg) = panic.downcast_ref::<&str>() {
        (*msg).to_string()
    } else {
        INTERNAL_ERROR_MESSAGE.to_string()
    };

    AppError::Internal(format!("handler panicked: {detail}")).into_response()
}

/// Adds docs, the 404 fallbacks and the middleware stack, then binds the state
pub fn with_middleware(routes: Router<AppState>, state: AppState) -> Router {
    routes
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .method_not_allowed_fallback(fallback::not_found)
        .fallback(fallback::not_found)
        .layer(
            ServiceBuilder::new()
                .layer(CorsLayer::permissive())
                .layer(CompressionLayer::new())
                .layer(middleware::from_fn(log_requests))
                .layer(CatchPanicLayer::custom(handle_panic)),
        )
        .with_state(state)
}

pub fn create_router(state: AppState) -> Router {
    with_middleware(routes(), state)
}
