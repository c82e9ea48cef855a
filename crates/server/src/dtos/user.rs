use chrono::{DateTime, Utc};
use database::{entities::users, services::user::ProfileChanges};
use models::{
    role::Role,
    validation::{
        FieldErrors, MAX_TITLE_LEN, validate_email, validate_password, validate_required,
        validate_url, validate_username,
    },
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// A user as returned by the API; the password hash is never included
#[derive(Debug, Serialize, ToSchema)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    #[schema(value_type = String, example = "student")]
    pub role: Role,
    pub display_name: Option<String>,
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<users::Model> for UserResponse {
    fn from(user: users::Model) -> Self {
        UserResponse {
            id: user.id,
            email: user.email,
            username: user.username,
            role: user.role,
            display_name: user.display_name,
            avatar_url: user.avatar_url,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct RegisterRequest {
    pub email: String,
    pub username: String,
    pub password: String,
    /// Defaults to `student`; `admin` cannot be self-registered
    #[schema(value_type = Option<String>, example = "parent")]
    pub role: Option<Role>,
    pub display_name: Option<String>,
}

impl RegisterRequest {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.check("email", validate_email(&self.email));
        errors.check("username", validate_username(&self.username));
        errors.check("password", validate_password(&self.password));
        if let Some(display_name) = self.display_name.as_deref() {
            errors.check("display_name", validate_display_name(display_name));
        }
        errors.into_result()
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.check("email", validate_required(&self.email, None));
        errors.check("password", validate_required(&self.password, None));
        errors.into_result()
    }
}

/// Fields to change; omitted fields are left as they are and an empty
/// `display_name` or `avatar_url` clears the value
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct UpdateProfileRequest {
    pub username: Option<String>,
    pub display_name: Option<String>,
    pub avatar_url: Option<String>,
    pub password: Option<String>,
}

impl UpdateProfileRequest {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        if let Some(username) = self.username.as_deref() {
            errors.check("username", validate_username(username));
        }
        if let Some(display_name) = self.display_name.as_deref()
            && !display_name.trim().is_empty()
        {
            errors.check("display_name", validate_display_name(display_name));
        }
        if let Some(avatar_url) = self.avatar_url.as_deref()
            && !avatar_url.trim().is_empty()
        {
            errors.check("avatar_url", validate_url(avatar_url));
        }
        if let Some(password) = self.password.as_deref() {
            errors.check("password", validate_password(password));
        }
        errors.into_result()
    }

    /// Converts into service changes, taking an already hashed password
    pub fn into_changes(self, password_hash: Option<String>) -> ProfileChanges {
        ProfileChanges {
            username: self.username,
            display_name: self.display_name,
            avatar_url: self.avatar_url,
            password_hash,
        }
    }
}

fn validate_display_name(display_name: &str) -> Result<(), String> {
    validate_required(display_name, Some(MAX_TITLE_LEN))
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponse {
    pub message: String,
    /// Bearer token for the `Authorization` header
    pub token: String,
    pub user: UserResponse,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProfileResponse {
    pub message: String,
    pub user: UserResponse,
}
