//! Process-wide choice of what `with_txn` does with a successful transaction.
//!
//! Production never sets it and always commits. Test binaries pick
//! `RollbackOnOk` so every test leaves the store untouched.

use std::str::FromStr;

use once_cell::sync::OnceCell;

use crate::errors::domain::{DomainError, ValidationKind};

/// Environment variable read by [`TxnPolicy::from_env`].
pub const TXN_POLICY_ENV: &str = "SOCIAL_TXN_POLICY";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxnPolicy {
    CommitOnOk,
    RollbackOnOk,
}

impl TxnPolicy {
    /// Policy named by `SOCIAL_TXN_POLICY`, or `fallback` when it is unset.
    pub fn from_env(fallback: TxnPolicy) -> Result<Self, DomainError> {
        match std::env::var(TXN_POLICY_ENV) {
            Ok(raw) => raw.parse(),
            Err(_) => Ok(fallback),
        }
    }
}

impl FromStr for TxnPolicy {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "commit" | "commit-on-ok" => Ok(Self::CommitOnOk),
            "rollback" | "rollback-on-ok" => Ok(Self::RollbackOnOk),
            other => Err(DomainError::validation(
                ValidationKind::InvalidConfig,
                format!("{TXN_POLICY_ENV} must be 'commit' or 'rollback', got '{other}'"),
            )),
        }
    }
}

static POLICY: OnceCell<TxnPolicy> = OnceCell::new();

/// `CommitOnOk` until something installs another policy.
pub fn current() -> TxnPolicy {
    POLICY.get().copied().unwrap_or(TxnPolicy::CommitOnOk)
}

/// First call wins; later calls are ignored.
pub fn set_txn_policy(policy: TxnPolicy) {
    let _ = POLICY.set(policy);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_policy_names() {
        assert_eq!("commit".parse::<TxnPolicy>().ok(), Some(TxnPolicy::CommitOnOk));
        assert_eq!(" Rollback ".parse::<TxnPolicy>().ok(), Some(TxnPolicy::RollbackOnOk));
        assert!("sometimes".parse::<TxnPolicy>().is_err());
    }
}
