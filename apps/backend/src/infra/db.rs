//! Database bootstrap: connect, apply session pragmas, run migrations.

use std::time::Duration;

use migration::MigrationCommand;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use tracing::info;

use crate::config::db::{db_url, DbProfile};
use crate::error::AppError;

/// Connect to the database for the given profile.
///
/// The pool is capped at a single connection: with `sqlite::memory:` every
/// connection would otherwise see its own empty database, and with a file
/// database a single writer avoids SQLITE_BUSY churn.
pub async fn connect_db(profile: DbProfile) -> Result<DatabaseConnection, AppError> {
    let url = db_url(profile)?;

    let mut opts = ConnectOptions::new(url);
    opts.max_connections(1)
        .min_connections(1)
        .connect_timeout(Duration::from_secs(5))
        .acquire_timeout(Duration::from_secs(5))
        .sqlx_logging(false);

    let conn = Database::connect(opts)
        .await
        .map_err(|e| AppError::db_unavailable(format!("failed to connect: {e}")))?;

    conn.execute(Statement::from_string(
        conn.get_database_backend(),
        "PRAGMA foreign_keys = ON;",
    ))
    .await?;

    Ok(conn)
}

/// Single entrypoint used by `StateBuilder`: connect and bring the schema
/// up to date before the connection is handed to the application.
pub async fn bootstrap_db(profile: DbProfile) -> Result<DatabaseConnection, AppError> {
    let conn = connect_db(profile).await?;

    migration::migrate(&conn, MigrationCommand::Up)
        .await
        .map_err(|e| AppError::db(format!("migration failed: {e}")))?;

    info!(profile = ?profile, "database ready");
    Ok(conn)
}
