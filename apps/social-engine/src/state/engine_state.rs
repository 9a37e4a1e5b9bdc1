use sea_orm::DatabaseConnection;

use crate::config::engine::EngineConfig;

/// Shared handles every engine operation needs.
#[derive(Clone, Debug)]
pub struct EngineState {
    pub db: DatabaseConnection,
    pub config: EngineConfig,
}

impl EngineState {
    pub fn new(db: DatabaseConnection, config: EngineConfig) -> Self {
        Self { db, config }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}
