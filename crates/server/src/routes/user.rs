use crate::{
    auth::AuthUser,
    dtos::user::{
        AuthResponse, LoginRequest, ProfileResponse, RegisterRequest, UpdateProfileRequest,
    },
    error::{AppError, AppResult},
    extract::JsonBody,
    state::AppState,
};
use axum::{Json, extract::State, http::StatusCode};
use database::services::user::{NewUser, UserService};
use log::info;

/// Register a new account and receive a bearer token
#[utoipa::path(
    post,
    path = "/api/users/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered", body = AuthResponse),
        (status = 400, description = "Invalid input", body = crate::error::ErrorResponse),
        (status = 403, description = "Role cannot be self-assigned", body = crate::error::ErrorResponse),
        (status = 409, description = "Email or username already in use", body = crate::error::ErrorResponse)
    ),
    tag = "Users"
)]
pub async fn register(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<RegisterRequest>,
) -> AppResult<(StatusCode, Json<AuthResponse>)> {
    payload.validate()?;

    let role = payload.role.unwrap_or_default();
    if !role.is_self_assignable() {
        return Err(AppError::Forbidden(
            "Admin accounts cannot be self-registered".to_string(),
        ));
    }

    let password_hash = state.passwords.hash(payload.password).await?;
    let user = UserService::create_user(
        &state.db,
        NewUser {
            email: payload.email,
            username: payload.username,
            password_hash,
            role,
            display_name: payload.display_name,
        },
    )
    .await?;

    let token = state.tokens.issue(user.id, user.role)?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            message: "User registered successfully".to_string(),
            token,
            user: user.into(),
        }),
    ))
}

/// Exchange email and password for a bearer token
#[utoipa::path(
    post,
    path = "/api/users/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = AuthResponse),
        (status = 400, description = "Missing credentials", body = crate::error::ErrorResponse),
        (status = 401, description = "Invalid credentials", body = crate::error::ErrorResponse)
    ),
    tag = "Users"
)]
pub async fn login(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    payload.validate()?;

    let user = UserService::find_by_email(&state.db, &payload.email)
        .await?
        .ok_or_else(AppError::invalid_credentials)?;

    let verified = state
        .passwords
        .verify(payload.password, user.password_hash.clone())
        .await?;
    if !verified {
        info!("Failed login attempt for user {}", user.id);
        return Err(AppError::invalid_credentials());
    }

    let token = state.tokens.issue(user.id, user.role)?;

    Ok(Json(AuthResponse {
        message: "Login successful".to_string(),
        token,
        user: user.into(),
    }))
}

/// Get the profile of the authenticated user
#[utoipa::path(
    get,
    path = "/api/users/profile",
    responses(
        (status = 200, description = "Profile retrieved", body = ProfileResponse),
        (status = 401, description = "Missing or invalid token", body = crate::error::ErrorResponse),
        (status = 404, description = "User no longer exists", body = crate::error::ErrorResponse)
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Users"
)]
pub async fn get_profile(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<ProfileResponse>> {
    let user = UserService::find_by_id(&state.db, auth.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(Json(ProfileResponse {
        message: "Profile retrieved".to_string(),
        user: user.into(),
    }))
}

/// Update the profile of the authenticated user
#[utoipa::path(
    put,
    path = "/api/users/profile",
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Profile updated", body = ProfileResponse),
        (status = 400, description = "Invalid input", body = crate::error::ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = crate::error::ErrorResponse),
        (status = 409, description = "Username already taken", body = crate::error::ErrorResponse)
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Users"
)]
pub async fn update_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    JsonBody(payload): JsonBody<UpdateProfileRequest>,
) -> AppResult<Json<ProfileResponse>> {
    payload.validate()?;

    let password_hash = match payload.password.clone() {
        Some(password) => Some(state.passwords.hash(password).await?),
        None => None,
    };

    let user =
        UserService::update_profile(&state.db, auth.user_id, payload.into_changes(password_hash))
            .await?;

    Ok(Json(ProfileResponse {
        message: "Profile updated successfully".to_string(),
        user: user.into(),
    }))
}
