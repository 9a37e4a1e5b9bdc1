use db_infra::config::db::{validate_db_config, DbKind, DbOwner, RuntimeEnv};
use db_infra::{connect_pool, orchestrate_migration, orchestrate_migration_internal};
use migration::MigrationCommand;
use tracing::info;

use crate::config::engine::EngineConfig;
use crate::errors::domain::{DomainError, ValidationKind};
use crate::state::engine_state::EngineState;

/// Builder for `EngineState` (used by hosts and tests alike)
pub struct StateBuilder {
    env: RuntimeEnv,
    db_kind: Option<DbKind>,
    config: Option<EngineConfig>,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self {
            env: RuntimeEnv::Prod,
            db_kind: None,
            config: None,
        }
    }
    pub fn with_env(mut self, env: RuntimeEnv) -> Self {
        self.env = env;
        self
    }
    pub fn with_db(mut self, db_kind: DbKind) -> Self {
        self.db_kind = Some(db_kind);
        self
    }
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Connect, bring the schema up to date, and assemble the state.
    pub async fn build(self) -> Result<EngineState, DomainError> {
        let config = match self.config {
            Some(config) => {
                config.validate()?;
                config
            }
            None => EngineConfig::from_env()?,
        };

        let db_kind = self.db_kind.ok_or_else(|| {
            DomainError::validation(
                ValidationKind::InvalidConfig,
                "no database configured; call with_db() before build()",
            )
        })?;
        validate_db_config(self.env, db_kind)?;

        let conn = match db_kind {
            // Every connection to `sqlite::memory:` is its own database, so the
            // schema has to be created through the runtime pool itself.
            DbKind::SqliteMemory => {
                let pool = connect_pool(self.env, db_kind, DbOwner::App).await?;
                orchestrate_migration_internal(&pool, self.env, db_kind, MigrationCommand::Up)
                    .await?;
                pool
            }
            DbKind::Postgres | DbKind::SqliteFile => {
                orchestrate_migration(self.env, db_kind, MigrationCommand::Up).await?;
                connect_pool(self.env, db_kind, DbOwner::App).await?
            }
        };

        info!(env = ?self.env, db_kind = ?db_kind, "engine state ready");
        Ok(EngineState::new(conn, config))
    }
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn build_without_db_is_rejected() {
        let err = build_state()
            .with_config(EngineConfig::default())
            .build()
            .await
            .expect_err("no db kind");
        assert!(err.is_validation());
    }

    #[tokio::test]
    async fn prod_memory_is_rejected() {
        let err = build_state()
            .with_env(RuntimeEnv::Prod)
            .with_db(DbKind::SqliteMemory)
            .with_config(EngineConfig::default())
            .build()
            .await
            .expect_err("prod + memory");
        assert!(err.is_validation());
    }

    #[tokio::test]
    async fn memory_state_is_migrated() {
        let state = build_state()
            .with_env(RuntimeEnv::Test)
            .with_db(DbKind::SqliteMemory)
            .with_config(EngineConfig::default())
            .build()
            .await
            .expect("memory state");
        let status = migration::schema_status(state.db())
            .await
            .expect("schema status");
        assert!(status.is_current(), "unexpected schema position: {status:?}");
    }
}
