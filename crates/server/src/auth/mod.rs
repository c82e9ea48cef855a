//! Password hashing, bearer tokens and the extractors that enforce them.

mod extract;
mod password;
mod token;

pub use extract::{AdminUser, AuthUser};
pub use password::PasswordHasher;
pub use token::{Claims, TokenKeys};
