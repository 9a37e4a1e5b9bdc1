//! Environment-driven database configuration.
//!
//! Connection strings are assembled from environment variables so that the
//! engine, the migration CLI and the tests all agree on where the store lives.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};

use crate::error::DbInfraError;

/// Runtime environment the connection is being built for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeEnv {
    Prod,
    Test,
}

/// Backing store flavour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbKind {
    Postgres,
    SqliteFile,
    SqliteMemory,
}

impl FromStr for DbKind {
    type Err = DbInfraError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "pg" | "postgresql" => Ok(Self::Postgres),
            "sqlite-file" | "sqlite_file" | "sqlite" => Ok(Self::SqliteFile),
            "sqlite-memory" | "sqlite_memory" | "memory" => Ok(Self::SqliteMemory),
            other => Err(DbInfraError::config(format!(
                "unknown database kind '{other}' (expected postgres | sqlite-file | sqlite-memory)"
            ))),
        }
    }
}

impl From<DbKind> for sea_orm::DatabaseBackend {
    fn from(kind: DbKind) -> Self {
        match kind {
            DbKind::Postgres => sea_orm::DatabaseBackend::Postgres,
            DbKind::SqliteFile | DbKind::SqliteMemory => sea_orm::DatabaseBackend::Sqlite,
        }
    }
}

/// Database owner enum for different access levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbOwner {
    /// Application-level access (limited permissions)
    App,
    /// Owner-level access (full permissions for migrations)
    Owner,
}

/// What a pool is going to be used for; migration pools stay small.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolPurpose {
    Runtime,
    Migration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolSettings {
    pub min_connections: u32,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
}

/// Reject combinations that can never work before touching the network.
pub fn validate_db_config(env: RuntimeEnv, db_kind: DbKind) -> Result<(), DbInfraError> {
    if env == RuntimeEnv::Prod && db_kind == DbKind::SqliteMemory {
        return Err(DbInfraError::config(
            "in-memory SQLite cannot be used with the Prod runtime environment",
        ));
    }
    Ok(())
}

/// Build the connection spec (URL) for the given environment, kind and owner.
pub fn make_conn_spec(
    env: RuntimeEnv,
    db_kind: DbKind,
    owner: DbOwner,
) -> Result<String, DbInfraError> {
    validate_db_config(env, db_kind)?;
    match db_kind {
        DbKind::Postgres => {
            let host = var_or("POSTGRES_HOST", "localhost");
            let port = var_or("POSTGRES_PORT", "5432");
            let db_name = db_name(env)?;
            let (username, password) = credentials(owner)?;
            let username = utf8_percent_encode(&username, NON_ALPHANUMERIC);
            let password = utf8_percent_encode(&password, NON_ALPHANUMERIC);
            Ok(format!(
                "postgresql://{username}:{password}@{host}:{port}/{db_name}"
            ))
        }
        DbKind::SqliteFile => {
            let dir = var_or("SQLITE_DB_DIR", "./data");
            let file = match env {
                RuntimeEnv::Prod => "social.sqlite",
                RuntimeEnv::Test => "social_test.sqlite",
            };
            Ok(format!("sqlite:{dir}/{file}?mode=rwc"))
        }
        DbKind::SqliteMemory => Ok("sqlite::memory:".to_string()),
    }
}

/// Pool sizing per store kind. In-memory SQLite must stay on one connection:
/// every extra connection would open its own empty database.
pub fn pool_settings(db_kind: DbKind, purpose: PoolPurpose) -> PoolSettings {
    match (db_kind, purpose) {
        (DbKind::SqliteMemory, _) => PoolSettings {
            min_connections: 1,
            max_connections: 1,
            acquire_timeout: Duration::from_secs(5),
        },
        (_, PoolPurpose::Migration) => PoolSettings {
            min_connections: 1,
            max_connections: 1,
            acquire_timeout: Duration::from_secs(2),
        },
        (DbKind::SqliteFile, PoolPurpose::Runtime) => PoolSettings {
            min_connections: 1,
            max_connections: 4,
            acquire_timeout: Duration::from_secs(5),
        },
        (DbKind::Postgres, PoolPurpose::Runtime) => PoolSettings {
            min_connections: 2,
            max_connections: var_or("SOCIAL_DB_MAX_CONNECTIONS", "16")
                .parse()
                .unwrap_or(16),
            acquire_timeout: Duration::from_secs(5),
        },
    }
}

/// Get database name based on environment
fn db_name(env: RuntimeEnv) -> Result<String, DbInfraError> {
    match env {
        RuntimeEnv::Prod => must_var("PROD_DB"),
        RuntimeEnv::Test => {
            let db_name = must_var("TEST_DB")?;
            // Test databases must be recognisable as such
            if !db_name.ends_with("_test") {
                return Err(DbInfraError::config(format!(
                    "Test environment requires database name to end with '_test', but got: '{db_name}'"
                )));
            }
            Ok(db_name)
        }
    }
}

/// Get database credentials based on owner
fn credentials(owner: DbOwner) -> Result<(String, String), DbInfraError> {
    match owner {
        DbOwner::App => Ok((must_var("APP_DB_USER")?, must_var("APP_DB_PASSWORD")?)),
        DbOwner::Owner => Ok((
            must_var("SOCIAL_OWNER_USER")?,
            must_var("SOCIAL_OWNER_PASSWORD")?,
        )),
    }
}

fn var_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

fn must_var(name: &str) -> Result<String, DbInfraError> {
    env::var(name).map_err(|_| DbInfraError::config(format!("missing required env var {name}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn db_kind_parses_aliases() {
        assert_eq!(DbKind::from_str("Postgres").ok(), Some(DbKind::Postgres));
        assert_eq!(DbKind::from_str("sqlite-file").ok(), Some(DbKind::SqliteFile));
        assert_eq!(DbKind::from_str(" memory ").ok(), Some(DbKind::SqliteMemory));
        assert!(DbKind::from_str("oracle").is_err());
    }

    #[test]
    fn memory_spec_needs_no_env() {
        let spec = make_conn_spec(RuntimeEnv::Test, DbKind::SqliteMemory, DbOwner::App)
            .expect("memory spec");
        assert_eq!(spec, "sqlite::memory:");
    }

    #[test]
    fn prod_memory_is_rejected() {
        assert!(validate_db_config(RuntimeEnv::Prod, DbKind::SqliteMemory).is_err());
    }

    #[test]
    fn memory_pool_is_single_connection() {
        let settings = pool_settings(DbKind::SqliteMemory, PoolPurpose::Runtime);
        assert_eq!(settings.max_connections, 1);
        assert_eq!(settings.min_connections, 1);
    }
}
