//! Romance repository: relationships with decoded flags/metadata, and
//! per-type privacy settings.

use sea_orm::{ActiveEnum, ConnectionTrait, DatabaseTransaction};
use serde_json::Value;
use time::OffsetDateTime;
use uuid::Uuid;

use super::payload::{self, Metadata};
use crate::adapters::romance_sea as romance_adapter;
use crate::domain::pagination::{Page, PageRequest};
use crate::domain::pairs::CanonicalPair;
use crate::domain::romance::{RomanceStatus, INITIAL_HEALTH, INITIAL_SCORE};
use crate::entities::romance_relationships::{self, ConsentStatus, RomanceType};
use crate::entities::romance_privacy_settings;
use crate::errors::domain::DomainError;

pub const SHOW_RELATIONSHIP_STATUS: &str = "show_relationship_status";
pub const SHOW_ROMANCE_EVENTS: &str = "show_romance_events";
pub const ALLOW_ROMANCE_REQUESTS: &str = "allow_romance_requests";

#[derive(Debug, Clone, PartialEq)]
pub struct RomanceRelationship {
    pub id: Uuid,
    pub romance_type: RomanceType,
    pub player_id: Uuid,
    pub target_id: Uuid,
    pub relationship_score: i32,
    pub chemistry_score: i32,
    pub trust_score: i32,
    pub physical_intimacy: i32,
    pub emotional_intimacy: i32,
    pub relationship_stage: String,
    pub is_active: bool,
    pub is_romantic: bool,
    pub is_public: bool,
    pub consent_status: ConsentStatus,
    pub relationship_health: i32,
    pub flags: Vec<String>,
    pub metadata: Metadata,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl RomanceRelationship {
    pub fn status(&self) -> RomanceStatus {
        RomanceStatus {
            consent_status: self.consent_status,
            is_active: self.is_active,
            is_romantic: self.is_romantic,
            relationship_stage: self.relationship_stage.clone(),
        }
    }

    pub fn involves(&self, player_id: Uuid) -> bool {
        self.player_id == player_id || self.target_id == player_id
    }
}

/// The three visibility toggles that are persisted structurally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrivacyToggles {
    pub show_relationship_status: bool,
    pub show_romance_events: bool,
    pub allow_romance_requests: bool,
}

impl Default for PrivacyToggles {
    fn default() -> Self {
        Self {
            show_relationship_status: true,
            show_romance_events: true,
            allow_romance_requests: true,
        }
    }
}

impl PrivacyToggles {
    /// Read the known boolean keys from an open settings map. Missing or
    /// non-boolean values fall back to enabled; other keys are ignored.
    pub fn from_settings(settings: &Metadata) -> Self {
        let flag = |key: &str| settings.get(key).and_then(Value::as_bool).unwrap_or(true);
        Self {
            show_relationship_status: flag(SHOW_RELATIONSHIP_STATUS),
            show_romance_events: flag(SHOW_ROMANCE_EVENTS),
            allow_romance_requests: flag(ALLOW_ROMANCE_REQUESTS),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RomancePrivacySettings {
    pub player_id: Uuid,
    pub romance_type: RomanceType,
    pub toggles: PrivacyToggles,
    pub updated_at: OffsetDateTime,
}

/// Insert a fresh pending romance. Returns `Conflict` through the unique
/// index if an active one already exists for the pair.
pub async fn create_pending(
    txn: &DatabaseTransaction,
    romance_type: RomanceType,
    player_id: Uuid,
    target_id: Uuid,
    metadata: &Metadata,
) -> Result<RomanceRelationship, DomainError> {
    let dto = romance_adapter::RomanceCreate {
        romance_type,
        player_id,
        target_id,
        pair: CanonicalPair::new(player_id, target_id),
        initial_score: INITIAL_SCORE,
        initial_health: INITIAL_HEALTH,
        status: RomanceStatus::pending(),
        is_public: false,
        flags: payload::encode::<[String]>(&[], "romance flags")?,
        metadata: payload::encode(metadata, "romance metadata")?,
    };
    let row = romance_adapter::insert_romance(txn, dto).await?;
    Ok(RomanceRelationship::from(row))
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    romance_id: Uuid,
) -> Result<Option<RomanceRelationship>, DomainError> {
    let row = romance_adapter::find_by_id(conn, romance_id).await?;
    Ok(row.map(RomanceRelationship::from))
}

pub async fn find_active_between<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    romance_type: RomanceType,
    pair: &CanonicalPair,
) -> Result<Option<RomanceRelationship>, DomainError> {
    let row = romance_adapter::find_active_between(conn, romance_type, pair).await?;
    Ok(row.map(RomanceRelationship::from))
}

pub async fn find_latest_between<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    romance_type: RomanceType,
    pair: &CanonicalPair,
) -> Result<Option<RomanceRelationship>, DomainError> {
    let row = romance_adapter::find_latest_between(conn, romance_type, pair).await?;
    Ok(row.map(RomanceRelationship::from))
}

/// Lock the row, let `next` decide the new status from the current one,
/// and persist it. `Ok(None)` when the row is missing or `next` declines.
pub async fn transition<F>(
    txn: &DatabaseTransaction,
    romance_id: Uuid,
    next: F,
) -> Result<Option<RomanceRelationship>, DomainError>
where
    F: FnOnce(&RomanceRelationship) -> Option<RomanceStatus>,
{
    let Some(row) = romance_adapter::lock_by_id(txn, romance_id).await? else {
        return Ok(None);
    };
    let current = RomanceRelationship::from(row.clone());
    let Some(status) = next(&current) else {
        return Ok(None);
    };
    let updated = romance_adapter::write_status(txn, row, status).await?;
    Ok(Some(RomanceRelationship::from(updated)))
}

pub async fn list_for_player<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: Uuid,
    romance_type: Option<RomanceType>,
    page: PageRequest,
) -> Result<Page<RomanceRelationship>, DomainError> {
    let (rows, total) = romance_adapter::list_for_player(
        conn,
        player_id,
        romance_type,
        page.limit,
        page.offset,
    )
    .await?;
    Ok(Page::new(rows, total, page).map(RomanceRelationship::from))
}

pub async fn upsert_privacy(
    txn: &DatabaseTransaction,
    player_id: Uuid,
    romance_type: RomanceType,
    toggles: PrivacyToggles,
) -> Result<RomancePrivacySettings, DomainError> {
    let dto = romance_adapter::PrivacyUpsert {
        player_id,
        romance_type: romance_type.to_value(),
        show_relationship_status: toggles.show_relationship_status,
        show_romance_events: toggles.show_romance_events,
        allow_romance_requests: toggles.allow_romance_requests,
    };
    let row = romance_adapter::upsert_privacy(txn, dto).await?;
    RomancePrivacySettings::try_from(row)
}

pub async fn find_privacy<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: Uuid,
    romance_type: RomanceType,
) -> Result<Option<RomancePrivacySettings>, DomainError> {
    romance_adapter::find_privacy(conn, player_id, &romance_type.to_value())
        .await?
        .map(RomancePrivacySettings::try_from)
        .transpose()
}

impl From<romance_relationships::Model> for RomanceRelationship {
    fn from(model: romance_relationships::Model) -> Self {
        let flags = payload::decode_or_default(&model.flags, "flags", model.id);
        let metadata = payload::decode_or_default(&model.metadata, "metadata", model.id);
        Self {
            id: model.id,
            romance_type: model.romance_type,
            player_id: model.player_id,
            target_id: model.target_id,
            relationship_score: model.relationship_score,
            chemistry_score: model.chemistry_score,
            trust_score: model.trust_score,
            physical_intimacy: model.physical_intimacy,
            emotional_intimacy: model.emotional_intimacy,
            relationship_stage: model.relationship_stage,
            is_active: model.is_active,
            is_romantic: model.is_romantic,
            is_public: model.is_public,
            consent_status: model.consent_status,
            relationship_health: model.relationship_health,
            flags,
            metadata,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl TryFrom<romance_privacy_settings::Model> for RomancePrivacySettings {
    type Error = DomainError;

    fn try_from(model: romance_privacy_settings::Model) -> Result<Self, Self::Error> {
        let romance_type = RomanceType::try_from_value(&model.romance_type).map_err(|_| {
            DomainError::corrupt_state(format!(
                "invalid romance_type '{}' stored for player_id={}",
                model.romance_type, model.player_id
            ))
        })?;
        Ok(Self {
            player_id: model.player_id,
            romance_type,
            toggles: PrivacyToggles {
                show_relationship_status: model.show_relationship_status,
                show_romance_events: model.show_romance_events,
                allow_romance_requests: model.allow_romance_requests,
            },
            updated_at: model.updated_at,
        })
    }
}
