//! Engine tunables read from the environment.

use std::env;
use std::str::FromStr;

use crate::errors::domain::{DomainError, ValidationKind};

pub const DEFAULT_PAGE_LIMIT: u64 = 20;
pub const MAX_PAGE_LIMIT: u64 = 100;
pub const DEFAULT_CONTRACT_DAYS: i64 = 30;
pub const MAX_CONTRACT_DAYS: i64 = 36_500;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Page size used when a caller passes a limit of zero.
    pub default_page_limit: u64,
    /// Hard upper bound on any page size.
    pub max_page_limit: u64,
    /// Lifetime of a trust contract when the caller gives no expiry.
    pub contract_days: i64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_page_limit: DEFAULT_PAGE_LIMIT,
            max_page_limit: MAX_PAGE_LIMIT,
            contract_days: DEFAULT_CONTRACT_DAYS,
        }
    }
}

impl EngineConfig {
    /// Read `SOCIAL_DEFAULT_PAGE_LIMIT`, `SOCIAL_MAX_PAGE_LIMIT` and
    /// `SOCIAL_CONTRACT_DAYS`, falling back to the defaults for unset vars.
    pub fn from_env() -> Result<Self, DomainError> {
        let defaults = Self::default();
        let config = Self {
            default_page_limit: parse_var(
                "SOCIAL_DEFAULT_PAGE_LIMIT",
                defaults.default_page_limit,
            )?,
            max_page_limit: parse_var("SOCIAL_MAX_PAGE_LIMIT", defaults.max_page_limit)?,
            contract_days: parse_var("SOCIAL_CONTRACT_DAYS", defaults.contract_days)?,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.max_page_limit == 0 {
            return Err(DomainError::validation(
                ValidationKind::InvalidConfig,
                "SOCIAL_MAX_PAGE_LIMIT must be positive",
            ));
        }
        if self.default_page_limit == 0 || self.default_page_limit > self.max_page_limit {
            return Err(DomainError::validation(
                ValidationKind::InvalidConfig,
                format!(
                    "SOCIAL_DEFAULT_PAGE_LIMIT must be in 1..={}, got {}",
                    self.max_page_limit, self.default_page_limit
                ),
            ));
        }
        if !(1..=MAX_CONTRACT_DAYS).contains(&self.contract_days) {
            return Err(DomainError::validation(
                ValidationKind::InvalidConfig,
                format!(
                    "SOCIAL_CONTRACT_DAYS must be in 1..={MAX_CONTRACT_DAYS}, got {}",
                    self.contract_days
                ),
            ));
        }
        Ok(())
    }
}

fn parse_var<T: FromStr>(name: &str, default: T) -> Result<T, DomainError> {
    match env::var(name) {
        Ok(raw) => raw.trim().parse::<T>().map_err(|_| {
            DomainError::validation(
                ValidationKind::InvalidConfig,
                format!("{name} has unparsable value '{raw}'"),
            )
        }),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        assert!(EngineConfig::default().validate().is_ok());
    }

    #[test]
    fn default_above_max_is_rejected() {
        let config = EngineConfig {
            default_page_limit: 50,
            max_page_limit: 10,
            ..EngineConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn non_positive_contract_days_is_rejected() {
        let config = EngineConfig {
            contract_days: 0,
            ..EngineConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn huge_contract_days_is_rejected() {
        let config = EngineConfig {
            contract_days: i64::MAX / 2,
            ..EngineConfig::default()
        };
        assert!(config.validate().is_err());
        let at_cap = EngineConfig {
            contract_days: MAX_CONTRACT_DAYS,
            ..EngineConfig::default()
        };
        assert!(at_cap.validate().is_ok());
    }

    #[test]
    fn parse_var_falls_back_when_unset() {
        let value: u64 = parse_var("SOCIAL_TEST_SURELY_UNSET_VAR", 7).expect("default");
        assert_eq!(value, 7);
    }
}
