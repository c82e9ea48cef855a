use crate::routes::{course, enrollment, health, review, user};
use utoipa::{
    Modify, OpenApi,
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "jwt",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

/// API Documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        health::health,
        user::register,
        user::login,
        user::get_profile,
        user::update_profile,
        enrollment::list_enrollments,
        course::get_all_courses,
        course::get_course_by_id,
        course::create_course,
        course::update_course,
        course::delete_course,
        enrollment::enroll,
        enrollment::update_progress,
        review::list_reviews,
        review::create_review
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Service status"),
        (name = "Users", description = "Registration, login and profile endpoints"),
        (name = "Courses", description = "Course catalog endpoints"),
        (name = "Enrollments", description = "Enrollment and progress endpoints"),
        (name = "Reviews", description = "Course review endpoints"),
    ),
    info(
        title = "Learning Platform API",
        version = "1.0.0",
        description = "Courses, enrollments and reviews for the learning platform",
        license(
            name = "MIT OR Apache-2.0",
        )
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registers_bearer_scheme_and_routes() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("jwt"));
        assert!(doc.paths.paths.contains_key("/api/courses/{courseId}/reviews"));
        assert!(doc.paths.paths.contains_key("/api/users/profile/enrollments"));
    }
}
