use log::LevelFilter;
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use std::time::Duration;

/// Creates a pooled database connection for the given URL
///
/// In-memory SQLite databases live inside a single connection, so the pool is
/// pinned to exactly one connection for those URLs.
pub async fn create_connection(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(database_url.to_owned());
    options
        .connect_timeout(Duration::from_secs(10))
        .sqlx_logging(true)
        .sqlx_logging_level(LevelFilter::Debug);

    if is_in_memory(database_url) {
        options.max_connections(1).min_connections(1);
    } else {
        options.max_connections(20).min_connections(1);
    }

    Database::connect(options).await
}

fn is_in_memory(database_url: &str) -> bool {
    database_url.starts_with("sqlite") && database_url.contains(":memory:")
}
