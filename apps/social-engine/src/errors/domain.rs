//! Domain-level error type used across services, repos and adapters.
//!
//! Storage-agnostic: adapters return `sea_orm::DbErr`, which is translated
//! into `DomainError` by `crate::infra::db_errors::map_db_err`.

use thiserror::Error;

/// Validation failures caught before any store access
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationKind {
    SelfRelationship,
    SelfRomance,
    TrustDeltaOutOfRange,
    RatingOutOfRange,
    EmptyAllianceName,
    EmptyArbitrationIssue,
    InvalidConfig,
    Other(String),
}

/// Domain-level not found entities
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum NotFoundKind {
    Contract,
    Alliance,
    Membership,
    Romance,
    Other(String),
}

/// Domain-level conflict kinds
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConflictKind {
    ActiveRomanceExists,
    Other(String),
}

/// Infra error kinds to distinguish operational failures
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum InfraErrorKind {
    Timeout,
    DbUnavailable,
    /// A stored payload failed to decode.
    DataCorruption,
    Other(String),
}

/// Central domain error type
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    /// Malformed input or business rule violation
    #[error("validation error {0:?}: {1}")]
    Validation(ValidationKind, String),
    /// Uniqueness or state invariant would be violated
    #[error("conflict {0:?}: {1}")]
    Conflict(ConflictKind, String),
    /// Absent or wrong-state record
    #[error("not found {0:?}: {1}")]
    NotFound(NotFoundKind, String),
    /// Infrastructure/operational failures
    #[error("infra {0:?}: {1}")]
    Infra(InfraErrorKind, String),
}

impl DomainError {
    pub fn validation(kind: ValidationKind, detail: impl Into<String>) -> Self {
        Self::Validation(kind, detail.into())
    }
    pub fn conflict(kind: ConflictKind, detail: impl Into<String>) -> Self {
        Self::Conflict(kind, detail.into())
    }
    pub fn not_found(kind: NotFoundKind, detail: impl Into<String>) -> Self {
        Self::NotFound(kind, detail.into())
    }
    pub fn infra(kind: InfraErrorKind, detail: impl Into<String>) -> Self {
        Self::Infra(kind, detail.into())
    }

    /// Stored structured data could not be decoded.
    pub fn corrupt_state(detail: impl Into<String>) -> Self {
        Self::Infra(InfraErrorKind::DataCorruption, detail.into())
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(..))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(..))
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict(..))
    }

    pub fn is_corrupt_state(&self) -> bool {
        matches!(self, Self::Infra(InfraErrorKind::DataCorruption, _))
    }
}

impl From<sea_orm::DbErr> for DomainError {
    fn from(e: sea_orm::DbErr) -> Self {
        crate::infra::db_errors::map_db_err(e)
    }
}

impl From<db_infra::DbInfraError> for DomainError {
    fn from(e: db_infra::DbInfraError) -> Self {
        match e {
            db_infra::DbInfraError::Config { message } => {
                DomainError::validation(ValidationKind::InvalidConfig, message)
            }
            db_infra::DbInfraError::Connect { message } => {
                DomainError::infra(InfraErrorKind::DbUnavailable, message)
            }
            db_infra::DbInfraError::Migration { message } => {
                DomainError::infra(InfraErrorKind::Other("Migration".into()), message)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_kind_and_detail() {
        let err = DomainError::not_found(NotFoundKind::Contract, "contract 42 not active");
        assert_eq!(err.to_string(), "not found Contract: contract 42 not active");
    }

    #[test]
    fn corrupt_state_is_data_corruption() {
        let err = DomainError::corrupt_state("bad terms");
        assert!(err.is_corrupt_state());
        assert!(!err.is_not_found());
    }

    #[test]
    fn db_infra_config_maps_to_validation() {
        let err: DomainError = db_infra::DbInfraError::config("missing TEST_DB").into();
        assert!(matches!(
            err,
            DomainError::Validation(ValidationKind::InvalidConfig, _)
        ));
    }
}
