use crate::{config::AdminBootstrap, error::AppResult, state::AppState};
use database::services::user::{NewUser, UserService};
use log::{info, warn};
use models::role::Role;

/// Creates the configured admin account unless its email is already registered
pub async fn ensure_admin(state: &AppState, admin: &AdminBootstrap) -> AppResult<()> {
    if let Some(existing) = UserService::find_by_email(&state.db, &admin.email).await? {
        if existing.role.is_admin() {
            info!("Admin account {} already present", existing.id);
        } else {
            warn!(
                "ADMIN_EMAIL belongs to existing {} account {}; not promoting it",
                existing.role.as_str(),
                existing.id
            );
        }
        return Ok(());
    }

    let password_hash = state.passwords.hash(admin.password.clone()).await?;
    UserService::create_user(
        &state.db,
        NewUser {
            email: admin.email.clone(),
            username: admin.username.clone(),
            password_hash,
            role: Role::Admin,
            display_name: None,
        },
    )
    .await?;

    Ok(())
}
