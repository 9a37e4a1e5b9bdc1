//! Schema migrations for the social graph store.
//!
//! `migrate` is the single entry point shared by the migration CLI, the
//! engine's state builder and the tests.

pub use sea_orm::{ConnectionTrait, DatabaseConnection};
pub use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::DatabaseBackend;

mod m20261016_000001_social_graph;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20261016_000001_social_graph::Migration)]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrationCommand {
    Up,
    Down,
    Fresh,
    Reset,
    Refresh,
    Status,
}

impl MigrationCommand {
    /// `Status` only reports; every other command may change the schema.
    pub fn changes_schema(self) -> bool {
        !matches!(self, Self::Status)
    }
}

/// Where a database stands relative to the migrations compiled in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaStatus {
    pub backend: DatabaseBackend,
    pub applied: usize,
    pub defined: usize,
    /// Name of the most recently applied migration.
    pub latest: Option<String>,
}

impl SchemaStatus {
    /// Every defined migration is applied, ending with the newest one.
    pub fn is_current(&self) -> bool {
        let newest = Migrator::migrations()
            .last()
            .map(|m| m.name().to_string());
        self.applied == self.defined && newest.is_some() && self.latest == newest
    }
}

/// Read the applied-migration table. A database that has never been
/// migrated reports zero applied migrations rather than an error.
pub async fn schema_status(db: &DatabaseConnection) -> Result<SchemaStatus, DbErr> {
    let (applied, latest) = match Migrator::get_applied_migrations(db).await {
        Ok(migrations) => (
            migrations.len(),
            migrations.last().map(|m| m.name().to_string()),
        ),
        Err(DbErr::Exec(_)) => (0, None),
        Err(e) => return Err(e),
    };

    Ok(SchemaStatus {
        backend: db.get_database_backend(),
        applied,
        defined: Migrator::migrations().len(),
        latest,
    })
}

/// Run `command` against `db`, logging the schema position around it.
pub async fn migrate(db: &DatabaseConnection, command: MigrationCommand) -> Result<(), DbErr> {
    let before = schema_status(db).await?;
    tracing::info!(
        cmd = ?command,
        backend = ?before.backend,
        applied = before.applied,
        defined = before.defined,
        "migration starting"
    );

    let result = match command {
        MigrationCommand::Up => Migrator::up(db, None).await,
        MigrationCommand::Down => Migrator::down(db, None).await,
        MigrationCommand::Fresh => Migrator::fresh(db).await,
        MigrationCommand::Reset => Migrator::reset(db).await,
        MigrationCommand::Refresh => Migrator::refresh(db).await,
        MigrationCommand::Status => Migrator::status(db).await,
    };

    if let Err(e) = result {
        tracing::error!(cmd = ?command, error = %e, "migration failed");
        return Err(e);
    }

    if command.changes_schema() {
        let after = schema_status(db).await?;
        tracing::info!(
            cmd = ?command,
            applied = after.applied,
            latest = after.latest.as_deref().unwrap_or("<none>"),
            "migration finished"
        );
    }
    Ok(())
}
