//! Application state shared by all handlers.

use crate::{
    auth::{PasswordHasher, TokenKeys},
    config::Config,
};
use sea_orm::DatabaseConnection;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub tokens: Arc<TokenKeys>,
    pub passwords: PasswordHasher,
}

impl AppState {
    pub fn new(db: DatabaseConnection, tokens: TokenKeys, passwords: PasswordHasher) -> Self {
        Self {
            db,
            tokens: Arc::new(tokens),
            passwords,
        }
    }

    pub fn from_config(db: DatabaseConnection, config: &Config) -> Self {
        Self::new(
            db,
            TokenKeys::new(config.jwt_secret.as_bytes(), config.jwt_ttl_seconds),
            PasswordHasher::production(),
        )
    }
}
