use crate::db::{DatabaseConnection, DatabaseKind, Db as _};
use std::env;

/// Connects to a database and applies migrations.
/// The configured URL is used unless the `DATABASE_URL` environment variable is set.
///
/// # Errors
/// Errors if connection to database fails.
/// Connections can fail if the database file cannot be opened, or if the database URL is invalid.
pub async fn connect(configured_url: &str) -> anyhow::Result<DatabaseConnection> {
    let db_url = env::var("DATABASE_URL").unwrap_or_else(|_| configured_url.to_owned());
    let connection = DatabaseConnection::connect(&db_url).await?;
    tracing::info!("Connected to database");
    migrate(&connection).await?;
    Ok(connection)
}

/// Apply all pending migrations.
///
/// # Errors
/// Errors if a migration fails to apply.
pub async fn migrate(connection: &DatabaseConnection) -> anyhow::Result<()> {
    match connection.kind {
        DatabaseKind::Sqlite => {
            sqlx::migrate!("./migrations/sqlite")
                .run(&connection.pool)
                .await?;
        }
    }
    tracing::debug!("Migrations applied");
    Ok(())
}
