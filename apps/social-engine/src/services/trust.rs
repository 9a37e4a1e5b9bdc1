use sea_orm::{ConnectionTrait, DatabaseTransaction};
use serde_json::Value;
use time::{Duration, OffsetDateTime};
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::engine::{EngineConfig, MAX_CONTRACT_DAYS};
use crate::domain::score_bounds::{apply_trust_delta, validate_trust_delta};
use crate::errors::domain::{DomainError, NotFoundKind, ValidationKind};
use crate::repos::trust::{self, TrustContract, TrustLevel};

/// Bounded trust per ordered pair, plus trust contracts.
pub struct TrustLedger {
    config: EngineConfig,
}

impl TrustLedger {
    pub fn new(config: &EngineConfig) -> Self {
        Self { config: *config }
    }

    /// No row is materialized on read.
    pub async fn get<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        player_id: Uuid,
        target_id: Uuid,
    ) -> Result<Option<TrustLevel>, DomainError> {
        trust::find_level(conn, player_id, target_id).await
    }

    /// Apply a signed delta in `[-100, 100]` against the live stored level.
    ///
    /// The pair is seeded at level 50 if absent, then read under a row lock
    /// and rewritten, so concurrent deltas on one pair serialize at the
    /// store and none is lost.
    pub async fn apply_delta(
        &self,
        txn: &DatabaseTransaction,
        player_id: Uuid,
        target_id: Uuid,
        delta: i32,
    ) -> Result<TrustLevel, DomainError> {
        validate_trust_delta(delta)?;

        let (current, seeded) = trust::seed_and_lock_level(txn, player_id, target_id).await?;
        if seeded {
            debug!(player_id = %player_id, target_id = %target_id, "trust level seeded");
        }

        let previous_level = current.level;
        let (level, experience) = apply_trust_delta(current.level, current.experience, delta);
        let updated = trust::write_level(txn, current, level, experience).await?;

        info!(
            player_id = %player_id,
            target_id = %target_id,
            delta,
            previous_level,
            level = updated.level,
            experience = updated.experience,
            "trust delta applied"
        );
        Ok(updated)
    }

    /// `expires_at` defaults to the configured contract duration from now.
    pub async fn create_contract(
        &self,
        txn: &DatabaseTransaction,
        player_id: Uuid,
        target_id: Uuid,
        terms: &Value,
        expires_at: Option<OffsetDateTime>,
    ) -> Result<TrustContract, DomainError> {
        let expires_at = match expires_at {
            Some(at) => at,
            None => self.default_expiry(OffsetDateTime::now_utc())?,
        };
        let contract =
            trust::create_contract(txn, player_id, target_id, terms, Some(expires_at)).await?;
        info!(
            contract_id = %contract.id,
            player_id = %player_id,
            target_id = %target_id,
            "trust contract created"
        );
        Ok(contract)
    }

    fn default_expiry(&self, now: OffsetDateTime) -> Result<OffsetDateTime, DomainError> {
        let days = self.config.contract_days;
        (1..=MAX_CONTRACT_DAYS)
            .contains(&days)
            .then(|| now.checked_add(Duration::days(days)))
            .flatten()
            .ok_or_else(|| {
                DomainError::validation(
                    ValidationKind::InvalidConfig,
                    format!("contract duration of {days} days is out of range"),
                )
            })
    }

    pub async fn get_contract<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        contract_id: Uuid,
    ) -> Result<Option<TrustContract>, DomainError> {
        trust::find_contract(conn, contract_id).await
    }

    /// Active -> terminated. Missing or already terminated contracts are
    /// `NotFound`.
    pub async fn terminate_contract(
        &self,
        txn: &DatabaseTransaction,
        contract_id: Uuid,
    ) -> Result<TrustContract, DomainError> {
        let contract = trust::terminate_contract(txn, contract_id)
            .await?
            .ok_or_else(|| {
                DomainError::not_found(
                    NotFoundKind::Contract,
                    format!("no active contract {contract_id}"),
                )
            })?;
        info!(contract_id = %contract_id, "trust contract terminated");
        Ok(contract)
    }

    /// Contracts where the player is either party, newest first.
    pub async fn contracts_for<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        player_id: Uuid,
    ) -> Result<Vec<TrustContract>, DomainError> {
        trust::contracts_for(conn, player_id).await
    }
}

impl Default for TrustLedger {
    fn default() -> Self {
        Self::new(&EngineConfig::default())
    }
}
