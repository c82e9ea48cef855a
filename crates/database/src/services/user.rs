use crate::{
    entities::users,
    error::{ServiceError, ServiceResult},
};
use chrono::Utc;
use log::info;
use models::{role::Role, validation::normalize_email};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, TransactionTrait,
};
use uuid::Uuid;

/// A user account ready to be stored; the password is already hashed
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub username: String,
    pub password_hash: String,
    pub role: Role,
    pub display_name: Option<String>,
}

/// Changes to apply to an existing profile. `None` leaves a field untouched;
/// an empty `display_name` or `avatar_url` clears it.
#[derive(Debug, Clone, Default)]
pub struct ProfileChanges {
    pub username: Option<String>,
    pub display_name: Option<String>,
    pub avatar_url: Option<String>,
    pub password_hash: Option<String>,
}

pub struct UserService;

impl UserService {
    /// Creates a user, rejecting duplicate emails and usernames
    pub async fn create_user(
        db: &DatabaseConnection,
        new_user: NewUser,
    ) -> ServiceResult<users::Model> {
        let email = normalize_email(&new_user.email);
        let txn = db.begin().await?;

        let email_taken = users::Entity::find()
            .filter(users::Column::Email.eq(email.as_str()))
            .count(&txn)
            .await?
            > 0;
        if email_taken {
            return Err(ServiceError::Conflict(
                "email is already registered".to_string(),
            ));
        }

        let username_taken = users::Entity::find()
            .filter(users::Column::Username.eq(new_user.username.as_str()))
            .count(&txn)
            .await?
            > 0;
        if username_taken {
            return Err(ServiceError::Conflict("username is already taken".to_string()));
        }

        let now = Utc::now();
        let user = users::ActiveModel {
            id: Set(Uuid::new_v4()),
            email: Set(email),
            username: Set(new_user.username),
            password_hash: Set(new_user.password_hash),
            role: Set(new_user.role),
            display_name: Set(new_user.display_name.filter(|name| !name.trim().is_empty())),
            avatar_url: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;
        info!("Created {} account {}", user.role.as_str(), user.id);

        Ok(user)
    }

    pub async fn find_by_id(
        db: &DatabaseConnection,
        user_id: Uuid,
    ) -> Result<Option<users::Model>, DbErr> {
        users::Entity::find_by_id(user_id).one(db).await
    }

    /// Looks up a user by email, ignoring case and surrounding whitespace
    pub async fn find_by_email(
        db: &DatabaseConnection,
        email: &str,
    ) -> Result<Option<users::Model>, DbErr> {
        users::Entity::find()
            .filter(users::Column::Email.eq(normalize_email(email)))
            .one(db)
            .await
    }

    pub async fn update_profile(
        db: &DatabaseConnection,
        user_id: Uuid,
        changes: ProfileChanges,
    ) -> ServiceResult<users::Model> {
        let txn = db.begin().await?;

        let user = users::Entity::find_by_id(user_id)
            .one(&txn)
            .await?
            .ok_or(ServiceError::NotFound("user"))?;

        if let Some(username) = changes.username.as_ref()
            && *username != user.username
        {
            let username_taken = users::Entity::find()
                .filter(users::Column::Username.eq(username.as_str()))
                .filter(users::Column::Id.ne(user_id))
                .count(&txn)
                .await?
                > 0;
            if username_taken {
                return Err(ServiceError::Conflict("username is already taken".to_string()));
            }
        }

        let mut active: users::ActiveModel = user.into();

        if let Some(username) = changes.username {
            active.username = Set(username);
        }
        if let Some(display_name) = changes.display_name {
            active.display_name = Set(non_empty(display_name));
        }
        if let Some(avatar_url) = changes.avatar_url {
            active.avatar_url = Set(non_empty(avatar_url));
        }
        if let Some(password_hash) = changes.password_hash {
            active.password_hash = Set(password_hash);
        }
        active.updated_at = Set(Utc::now());

        let updated = active.update(&txn).await?;
        txn.commit().await?;

        Ok(updated)
    }
}

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
