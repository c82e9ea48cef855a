pub mod courses;
pub mod enrollments;
pub mod reviews;
pub mod users;
