pub mod auth;
pub mod bootstrap;
pub mod config;
pub mod doc;
pub mod dtos;
pub mod error;
pub mod extract;
pub mod router;
pub mod routes;
pub mod state;
pub mod utils;

use crate::{
    config::Config, error::AppError, router::create_router, state::AppState,
    utils::shutdown::shutdown_signal,
};
use database::db::create_connection;
use log::info;
use migration::{Migrator, MigratorTrait};
use sea_orm::DbErr;
use std::net::SocketAddr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("database error: {0}")]
    Database(#[from] DbErr),
    #[error("failed to bootstrap admin account: {0}")]
    Bootstrap(#[from] AppError),
    #[error("failed to bind or serve: {0}")]
    Io(#[from] std::io::Error),
}

/// Connects, migrates, bootstraps and serves until a shutdown signal arrives
pub async fn serve(config: Config) -> Result<(), StartupError> {
    let db = create_connection(&config.database_url).await?;
    Migrator::up(&db, None).await?;
    info!("Database migrations applied");

    let state = AppState::from_config(db, &config);
    if let Some(admin) = &config.admin {
        bootstrap::ensure_admin(&state, admin).await?;
    }

    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Server listening on http://{addr}");
    for (method, path) in router::ROUTE_TABLE {
        info!("  {method:<6} {path}");
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}
