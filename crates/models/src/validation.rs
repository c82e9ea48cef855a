//! Field-level validation shared by request payloads.
//!
//! Each validator returns `Err(message)` describing the problem in a form
//! suitable for returning to API clients. [`FieldErrors`] collects those
//! messages keyed by field name.

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;
use url::Url;

lazy_static! {
    static ref EMAIL: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    static ref USERNAME: Regex = Regex::new(r"^[A-Za-z0-9_-]{3,32}$").unwrap();
}

pub const MIN_PASSWORD_LEN: usize = 8;
pub const MAX_PASSWORD_LEN: usize = 128;
pub const MAX_EMAIL_LEN: usize = 254;
pub const MAX_TITLE_LEN: usize = 200;

/// Validation messages keyed by field name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        // Keep the first problem reported for a field
        self.0.entry(field.into()).or_insert_with(|| message.into());
    }

    /// Records the outcome of a validator under `field`
    pub fn check(&mut self, field: &str, result: Result<(), String>) {
        if let Err(message) = result {
            self.add(field, message);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

/// Lower-cases and trims an email address for storage and lookup
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

pub fn validate_email(email: &str) -> Result<(), String> {
    let email = email.trim();
    if email.is_empty() {
        return Err("email is required".to_string());
    }
    if email.len() > MAX_EMAIL_LEN {
        return Err(format!("email must be at most {MAX_EMAIL_LEN} characters"));
    }
    if !EMAIL.is_match(email) {
        return Err("email is not a valid address".to_string());
    }
    Ok(())
}

pub fn validate_username(username: &str) -> Result<(), String> {
    if USERNAME.is_match(username) {
        Ok(())
    } else {
        Err("username must be 3-32 characters of letters, digits, '_' or '-'".to_string())
    }
}

pub fn validate_password(password: &str) -> Result<(), String> {
    let len = password.chars().count();
    if len < MIN_PASSWORD_LEN {
        return Err(format!(
            "password must be at least {MIN_PASSWORD_LEN} characters"
        ));
    }
    if len > MAX_PASSWORD_LEN {
        return Err(format!(
            "password must be at most {MAX_PASSWORD_LEN} characters"
        ));
    }
    Ok(())
}

pub fn validate_required(value: &str, max_len: Option<usize>) -> Result<(), String> {
    let value = value.trim();
    if value.is_empty() {
        return Err("must not be empty".to_string());
    }
    if let Some(max_len) = max_len
        && value.chars().count() > max_len
    {
        return Err(format!("must be at most {max_len} characters"));
    }
    Ok(())
}

/// Accepts absolute `http`/`https` URLs that name a host
pub fn validate_url(raw: &str) -> Result<(), String> {
    let raw = raw.trim();
    let valid = !raw.contains(char::is_whitespace)
        && Url::parse(raw).is_ok_and(|url| {
            matches!(url.scheme(), "http" | "https")
                && url.host_str().is_some_and(|host| !host.is_empty())
        });

    if valid {
        Ok(())
    } else {
        Err("must be an http(s) URL".to_string())
    }
}

pub fn validate_positive(value: i64) -> Result<(), String> {
    if value > 0 {
        Ok(())
    } else {
        Err("must be greater than zero".to_string())
    }
}

pub fn validate_non_negative(value: i64) -> Result<(), String> {
    if value >= 0 {
        Ok(())
    } else {
        Err("must not be negative".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_email() {
        assert!(validate_email("ada@example.com").is_ok());
        assert!(validate_email("  ada@example.co.uk ").is_ok());
        assert!(validate_email("").is_err());
        assert!(validate_email("ada").is_err());
        assert!(validate_email("ada@example").is_err());
        assert!(validate_email("a da@example.com").is_err());
    }

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  Ada@Example.COM "), "ada@example.com");
    }

    #[test]
    fn test_validate_username() {
        assert!(validate_username("ada_l").is_ok());
        assert!(validate_username("a-1").is_ok());
        assert!(validate_username("ab").is_err());
        assert!(validate_username("has space").is_err());
        assert!(validate_username(&"x".repeat(33)).is_err());
    }

    #[test]
    fn test_validate_password_length() {
        assert!(validate_password("short").is_err());
        assert!(validate_password("longenough").is_ok());
        assert!(validate_password(&"p".repeat(129)).is_err());
    }

    #[test]
    fn test_validate_required_and_numbers() {
        assert!(validate_required("   ", None).is_err());
        assert!(validate_required("Rust 101", Some(200)).is_ok());
        assert!(validate_required("abcdef", Some(3)).is_err());
        assert!(validate_positive(0).is_err());
        assert!(validate_positive(6).is_ok());
        assert!(validate_non_negative(0).is_ok());
        assert!(validate_non_negative(-1).is_err());
    }

    #[test]
    fn test_validate_url() {
        assert!(validate_url("https://cdn.example.com/a.png").is_ok());
        assert!(validate_url("ftp://example.com").is_err());
        assert!(validate_url("https://bad url").is_err());
        assert!(validate_url("https://").is_err());
        assert!(validate_url("http://").is_err());
        assert!(validate_url("mailto:ada@example.com").is_err());
    }

    #[test]
    fn test_field_errors_keep_first_message() {
        let mut errors = FieldErrors::new();
        errors.check("email", validate_email("nope"));
        errors.add("email", "second");
        errors.check("username", validate_username("ok_name"));

        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get("email"), Some("email is not a valid address"));
        assert!(errors.clone().into_result().is_err());
        assert!(FieldErrors::new().into_result().is_ok());
    }
}
