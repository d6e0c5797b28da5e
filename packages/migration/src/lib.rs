pub use sea_orm_migration::prelude::*;
pub use sea_orm_migration::sea_orm::{ConnectionTrait, DatabaseConnection, DbErr, Statement};

mod m20260825_000001_init; // keep filename + module name in sync

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20260825_000001_init::Migration)]
    }
}

#[derive(Debug)]
pub enum MigrationCommand {
    Up,
    Down,
    Fresh,
    Status,
}

/// Run a migration command against an already-connected database.
///
/// Used by both the server bootstrap and tests, so neither has to parse
/// environment variables or own a second connection path.
pub async fn migrate(db: &DatabaseConnection, command: MigrationCommand) -> Result<(), DbErr> {
    tracing::info!("migration command {command:?} starting");

    let result = match command {
        MigrationCommand::Up => Migrator::up(db, None).await,
        MigrationCommand::Down => Migrator::down(db, None).await,
        MigrationCommand::Fresh => Migrator::fresh(db).await,
        MigrationCommand::Status => Migrator::status(db).await,
    };

    match result {
        Ok(()) => {
            tracing::info!("migration command {command:?} completed");
            Ok(())
        }
        Err(e) => {
            tracing::error!("migration command {command:?} failed: {e}");
            Err(e)
        }
    }
}

/// Latest applied migration version, if any.
///
/// Reads the `seaql_migrations` bookkeeping table directly; returns `None`
/// on a fresh database where no migration has been applied yet.
pub async fn get_latest_migration_version(
    db: &DatabaseConnection,
) -> Result<Option<String>, DbErr> {
    let row = db
        .query_one(Statement::from_string(
            db.get_database_backend(),
            "SELECT version FROM seaql_migrations ORDER BY version DESC LIMIT 1".to_string(),
        ))
        .await?;

    match row {
        Some(row) => Ok(Some(row.try_get::<String>("", "version")?)),
        None => Ok(None),
    }
}
