pub mod common;
pub mod course;
pub mod enrollment;
pub mod review;
pub mod user;
