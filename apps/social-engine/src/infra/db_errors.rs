//! SeaORM -> DomainError translation helpers.
//!
//! Adapters return `sea_orm::DbErr`; repos lift it into `DomainError`
//! through `From<DbErr>`, which delegates here.

use tracing::{error, warn};

use crate::errors::domain::{
    ConflictKind, DomainError, InfraErrorKind, NotFoundKind, ValidationKind,
};

fn mentions_sqlstate(msg: &str, code: &str) -> bool {
    msg.contains(code) || msg.contains(&format!("SQLSTATE({code})"))
}

/// Extract table.column from SQLite "UNIQUE constraint failed: table.column" messages.
fn extract_sqlite_table_column(error_msg: &str) -> Option<&str> {
    let marker = "UNIQUE constraint failed: ";
    let start = error_msg.find(marker)? + marker.len();
    error_msg[start..]
        .split(|c: char| c.is_whitespace() || c == '"' || c == ',')
        .next()
        .filter(|s| !s.is_empty())
}

fn map_sqlite_table_column_to_conflict(table_column: &str) -> Option<(ConflictKind, &'static str)> {
    match table_column {
        "romance_relationships.active_pair_key" => Some((
            ConflictKind::ActiveRomanceExists,
            "An active romance already exists between these players",
        )),
        "relationships.player_id" | "relationships.target_id" => Some((
            ConflictKind::Other("Relationship".into()),
            "Relationship already exists for this pair",
        )),
        _ => None,
    }
}

fn map_postgres_constraint_to_conflict(error_msg: &str) -> Option<(ConflictKind, &'static str)> {
    if error_msg.contains("ux_romance_relationships_active_pair") {
        return Some((
            ConflictKind::ActiveRomanceExists,
            "An active romance already exists between these players",
        ));
    }
    if error_msg.contains("ux_relationships_player_target") {
        return Some((
            ConflictKind::Other("Relationship".into()),
            "Relationship already exists for this pair",
        ));
    }
    None
}

/// Translate a `DbErr` into a `DomainError`.
pub fn map_db_err(e: sea_orm::DbErr) -> DomainError {
    let error_msg = e.to_string();

    match &e {
        sea_orm::DbErr::RecordNotFound(detail) => {
            return DomainError::not_found(NotFoundKind::Other("Record".into()), detail.clone());
        }
        sea_orm::DbErr::ConnectionAcquire(_) | sea_orm::DbErr::Conn(_) => {
            warn!(raw_error = %error_msg, "database unavailable");
            return DomainError::infra(InfraErrorKind::DbUnavailable, "Database unavailable");
        }
        sea_orm::DbErr::Json(detail) => {
            warn!(raw_error = %detail, "stored JSON failed to decode");
            return DomainError::corrupt_state(detail.clone());
        }
        _ => {}
    }

    if mentions_sqlstate(&error_msg, "23505")
        || error_msg.contains("duplicate key value violates unique constraint")
        || error_msg.contains("UNIQUE constraint failed")
    {
        warn!(raw_error = %error_msg, "unique constraint violation");

        if let Some(table_column) = extract_sqlite_table_column(&error_msg) {
            if let Some((kind, detail)) = map_sqlite_table_column_to_conflict(table_column) {
                return DomainError::conflict(kind, detail);
            }
        }

        if let Some((kind, detail)) = map_postgres_constraint_to_conflict(&error_msg) {
            return DomainError::conflict(kind, detail);
        }

        return DomainError::conflict(
            ConflictKind::Other("Unique".into()),
            "Unique constraint violation",
        );
    }

    if mentions_sqlstate(&error_msg, "23503") || error_msg.contains("FOREIGN KEY constraint failed")
    {
        warn!(raw_error = %error_msg, "foreign key constraint violation");
        return DomainError::validation(
            ValidationKind::Other("ForeignKey".into()),
            "Foreign key constraint violation",
        );
    }

    if error_msg.contains("timeout") || error_msg.contains("timed out") {
        warn!(raw_error = %error_msg, "database timeout");
        return DomainError::infra(InfraErrorKind::Timeout, "Database timeout");
    }

    error!(raw_error = %error_msg, "unhandled database error");
    DomainError::infra(InfraErrorKind::Other("DbErr".into()), "Database operation failed")
}

#[cfg(test)]
mod tests {
    use sea_orm::{DbErr, RuntimeErr};

    use super::*;

    fn exec_err(msg: &str) -> DbErr {
        DbErr::Exec(RuntimeErr::Internal(msg.to_string()))
    }

    #[test]
    fn sqlite_active_pair_violation_is_romance_conflict() {
        let err = map_db_err(exec_err(
            "error returned from database: (code: 2067) UNIQUE constraint failed: romance_relationships.active_pair_key",
        ));
        assert!(matches!(
            err,
            DomainError::Conflict(ConflictKind::ActiveRomanceExists, _)
        ));
    }

    #[test]
    fn postgres_active_pair_violation_is_romance_conflict() {
        let err = map_db_err(exec_err(
            "duplicate key value violates unique constraint \"ux_romance_relationships_active_pair\"",
        ));
        assert!(matches!(
            err,
            DomainError::Conflict(ConflictKind::ActiveRomanceExists, _)
        ));
    }

    #[test]
    fn unknown_unique_violation_is_generic_conflict() {
        let err = map_db_err(exec_err("UNIQUE constraint failed: something.else"));
        assert!(matches!(err, DomainError::Conflict(ConflictKind::Other(_), _)));
    }

    #[test]
    fn record_not_found_maps_to_not_found() {
        let err = map_db_err(DbErr::RecordNotFound("alliance".into()));
        assert!(err.is_not_found());
    }

    #[test]
    fn json_error_is_corrupt_state() {
        let err = map_db_err(DbErr::Json("expected value at line 1".into()));
        assert!(err.is_corrupt_state());
    }

    #[test]
    fn extracts_table_column() {
        assert_eq!(
            extract_sqlite_table_column("UNIQUE constraint failed: a.b (code 2067)"),
            Some("a.b")
        );
        assert_eq!(extract_sqlite_table_column("no marker"), None);
    }
}
