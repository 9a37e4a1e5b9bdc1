use db_infra::config::db::{DbKind, RuntimeEnv};
use social_engine::{build_state, EngineConfig, EngineState};

/// Environment variable selecting the store the integration tests run on.
pub const TEST_DB_KIND_ENV: &str = "SOCIAL_TEST_DB_KIND";

/// Fresh, migrated engine state. In-memory SQLite unless
/// `SOCIAL_TEST_DB_KIND` names another store.
pub async fn test_state() -> EngineState {
    let db_kind = match std::env::var(TEST_DB_KIND_ENV) {
        Ok(raw) => raw
            .parse::<DbKind>()
            .unwrap_or_else(|e| panic!("invalid {TEST_DB_KIND_ENV}: {e}")),
        Err(_) => DbKind::SqliteMemory,
    };

    build_state()
        .with_env(RuntimeEnv::Test)
        .with_db(db_kind)
        .with_config(EngineConfig::default())
        .build()
        .await
        .expect("build test state")
}
