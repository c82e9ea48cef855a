pub mod catalog;
pub mod progress;
pub mod role;
pub mod validation;
