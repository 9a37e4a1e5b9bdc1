//! Trust repository: levels per ordered pair and trust contracts.

use sea_orm::{ConnectionTrait, DatabaseTransaction};
use serde_json::Value;
use time::OffsetDateTime;
use uuid::Uuid;

use super::payload;
use crate::adapters::trust_sea as trust_adapter;
use crate::entities::trust_contracts::{self, ContractStatus};
use crate::entities::trust_levels;
use crate::errors::domain::DomainError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrustLevel {
    pub player_id: Uuid,
    pub target_id: Uuid,
    pub level: i32,
    pub experience: i64,
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrustContract {
    pub id: Uuid,
    pub player_id: Uuid,
    pub target_id: Uuid,
    /// Opaque document, returned exactly as it was stored.
    pub terms: Value,
    pub status: ContractStatus,
    pub created_at: OffsetDateTime,
    pub expires_at: Option<OffsetDateTime>,
    pub terminated_at: Option<OffsetDateTime>,
}

pub async fn find_level<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: Uuid,
    target_id: Uuid,
) -> Result<Option<TrustLevel>, DomainError> {
    let row = trust_adapter::find_level(conn, player_id, target_id).await?;
    Ok(row.map(TrustLevel::from))
}

/// Seed the pair if absent and return the live row locked for update.
pub async fn seed_and_lock_level(
    txn: &DatabaseTransaction,
    player_id: Uuid,
    target_id: Uuid,
) -> Result<(trust_levels::Model, bool), DomainError> {
    let seeded = trust_adapter::seed_level(txn, player_id, target_id).await?;
    let row = trust_adapter::lock_level(txn, player_id, target_id).await?;
    Ok((row, seeded))
}

pub async fn write_level(
    txn: &DatabaseTransaction,
    current: trust_levels::Model,
    level: i32,
    experience: i64,
) -> Result<TrustLevel, DomainError> {
    let row = trust_adapter::write_level(txn, current, level, experience).await?;
    Ok(TrustLevel::from(row))
}

pub async fn create_contract(
    txn: &DatabaseTransaction,
    player_id: Uuid,
    target_id: Uuid,
    terms: &Value,
    expires_at: Option<OffsetDateTime>,
) -> Result<TrustContract, DomainError> {
    let dto = trust_adapter::ContractCreate {
        player_id,
        target_id,
        terms: payload::encode(terms, "contract terms")?,
        expires_at,
    };
    let row = trust_adapter::create_contract(txn, dto).await?;
    TrustContract::try_from(row)
}

pub async fn find_contract<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    contract_id: Uuid,
) -> Result<Option<TrustContract>, DomainError> {
    trust_adapter::find_contract(conn, contract_id)
        .await?
        .map(TrustContract::try_from)
        .transpose()
}

/// `None` when the contract is missing or not active.
pub async fn terminate_contract(
    txn: &DatabaseTransaction,
    contract_id: Uuid,
) -> Result<Option<TrustContract>, DomainError> {
    trust_adapter::terminate_contract(txn, contract_id)
        .await?
        .map(TrustContract::try_from)
        .transpose()
}

pub async fn contracts_for<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: Uuid,
) -> Result<Vec<TrustContract>, DomainError> {
    trust_adapter::list_contracts_for(conn, player_id)
        .await?
        .into_iter()
        .map(TrustContract::try_from)
        .collect()
}

impl From<trust_levels::Model> for TrustLevel {
    fn from(model: trust_levels::Model) -> Self {
        Self {
            player_id: model.player_id,
            target_id: model.target_id,
            level: model.level,
            experience: model.experience,
            updated_at: model.updated_at,
        }
    }
}

impl TryFrom<trust_contracts::Model> for TrustContract {
    type Error = DomainError;

    fn try_from(model: trust_contracts::Model) -> Result<Self, Self::Error> {
        let terms = payload::decode_required(&model.terms, "contract terms", model.id)?;
        Ok(Self {
            id: model.id,
            player_id: model.player_id,
            target_id: model.target_id,
            terms,
            status: model.status,
            created_at: model.created_at,
            expires_at: model.expires_at,
            terminated_at: model.terminated_at,
        })
    }
}
