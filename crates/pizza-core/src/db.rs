use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};

/// Connect to the database at `url` with a bounded pool.
pub async fn connect(
    url: &str,
    max_connections: u32,
    sqlx_logging: bool,
) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(url.to_owned());
    options
        .max_connections(max_connections)
        .connect_timeout(Duration::from_secs(8))
        .sqlx_logging(sqlx_logging);
    ::tracing::info!(max_connections, "connecting to database");
    Database::connect(options).await
}
