//! SeaORM adapter for romance relationships and privacy settings.

use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveEnum, ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DatabaseTransaction,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::domain::pairs::CanonicalPair;
use crate::domain::romance::RomanceStatus;
use crate::entities::romance_relationships::{self, RomanceType};
use crate::entities::romance_privacy_settings;

pub mod dto;

pub use dto::{PrivacyUpsert, RomanceCreate};

fn active_key_for(
    romance_type: RomanceType,
    pair: &CanonicalPair,
    is_active: bool,
) -> Option<String> {
    is_active.then(|| pair.active_key(&romance_type.to_value()))
}

/// Insert a romance row. A second active row for the same type and pair
/// trips the `active_pair_key` unique index.
pub async fn insert_romance(
    txn: &DatabaseTransaction,
    dto: RomanceCreate,
) -> Result<romance_relationships::Model, sea_orm::DbErr> {
    let now = OffsetDateTime::now_utc();
    let active_pair_key = active_key_for(dto.romance_type, &dto.pair, dto.status.is_active);
    let romance = romance_relationships::ActiveModel {
        id: Set(Uuid::new_v4()),
        romance_type: Set(dto.romance_type),
        player_id: Set(dto.player_id),
        target_id: Set(dto.target_id),
        pair_low: Set(dto.pair.low()),
        pair_high: Set(dto.pair.high()),
        active_pair_key: Set(active_pair_key),
        relationship_score: Set(dto.initial_score),
        chemistry_score: Set(dto.initial_score),
        trust_score: Set(dto.initial_score),
        physical_intimacy: Set(dto.initial_score),
        emotional_intimacy: Set(dto.initial_score),
        relationship_stage: Set(dto.status.relationship_stage),
        is_active: Set(dto.status.is_active),
        is_romantic: Set(dto.status.is_romantic),
        is_public: Set(dto.is_public),
        consent_status: Set(dto.status.consent_status),
        relationship_health: Set(dto.initial_health),
        flags: Set(dto.flags),
        metadata: Set(dto.metadata),
        created_at: Set(now),
        updated_at: Set(now),
    };
    romance.insert(txn).await
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    romance_id: Uuid,
) -> Result<Option<romance_relationships::Model>, sea_orm::DbErr> {
    romance_relationships::Entity::find_by_id(romance_id)
        .one(conn)
        .await
}

/// Row lookup under `FOR UPDATE` for transitions.
pub async fn lock_by_id(
    txn: &DatabaseTransaction,
    romance_id: Uuid,
) -> Result<Option<romance_relationships::Model>, sea_orm::DbErr> {
    romance_relationships::Entity::find_by_id(romance_id)
        .lock_exclusive()
        .one(txn)
        .await
}

pub async fn find_active_between<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    romance_type: RomanceType,
    pair: &CanonicalPair,
) -> Result<Option<romance_relationships::Model>, sea_orm::DbErr> {
    romance_relationships::Entity::find()
        .filter(
            romance_relationships::Column::ActivePairKey
                .eq(pair.active_key(&romance_type.to_value())),
        )
        .one(conn)
        .await
}

/// Most relevant row for an unordered pair: an active one if present,
/// otherwise the most recently updated.
pub async fn find_latest_between<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    romance_type: RomanceType,
    pair: &CanonicalPair,
) -> Result<Option<romance_relationships::Model>, sea_orm::DbErr> {
    romance_relationships::Entity::find()
        .filter(romance_relationships::Column::RomanceType.eq(romance_type))
        .filter(romance_relationships::Column::PairLow.eq(pair.low()))
        .filter(romance_relationships::Column::PairHigh.eq(pair.high()))
        .order_by_desc(romance_relationships::Column::IsActive)
        .order_by_desc(romance_relationships::Column::UpdatedAt)
        .one(conn)
        .await
}

/// Persist a lifecycle transition, keeping `active_pair_key` in step with
/// `is_active`.
pub async fn write_status(
    txn: &DatabaseTransaction,
    current: romance_relationships::Model,
    status: RomanceStatus,
) -> Result<romance_relationships::Model, sea_orm::DbErr> {
    let pair = CanonicalPair::new(current.pair_low, current.pair_high);
    let active_pair_key = active_key_for(current.romance_type, &pair, status.is_active);

    let mut active: romance_relationships::ActiveModel = current.into();
    active.consent_status = Set(status.consent_status);
    active.is_active = Set(status.is_active);
    active.is_romantic = Set(status.is_romantic);
    active.relationship_stage = Set(status.relationship_stage);
    active.active_pair_key = Set(active_pair_key);
    active.updated_at = Set(OffsetDateTime::now_utc());
    active.update(txn).await
}

/// Romances the player takes part in on either side, newest-updated first.
pub async fn list_for_player<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: Uuid,
    romance_type: Option<RomanceType>,
    limit: u64,
    offset: u64,
) -> Result<(Vec<romance_relationships::Model>, u64), sea_orm::DbErr> {
    let mut query = romance_relationships::Entity::find().filter(
        Condition::any()
            .add(romance_relationships::Column::PlayerId.eq(player_id))
            .add(romance_relationships::Column::TargetId.eq(player_id)),
    );
    if let Some(kind) = romance_type {
        query = query.filter(romance_relationships::Column::RomanceType.eq(kind));
    }

    let total = query.clone().count(conn).await?;
    let rows = query
        .order_by_desc(romance_relationships::Column::UpdatedAt)
        .order_by_desc(romance_relationships::Column::Id)
        .limit(limit)
        .offset(offset)
        .all(conn)
        .await?;

    Ok((rows, total))
}

pub async fn upsert_privacy(
    txn: &DatabaseTransaction,
    dto: PrivacyUpsert,
) -> Result<romance_privacy_settings::Model, sea_orm::DbErr> {
    let settings = romance_privacy_settings::ActiveModel {
        player_id: Set(dto.player_id),
        romance_type: Set(dto.romance_type.clone()),
        show_relationship_status: Set(dto.show_relationship_status),
        show_romance_events: Set(dto.show_romance_events),
        allow_romance_requests: Set(dto.allow_romance_requests),
        updated_at: Set(OffsetDateTime::now_utc()),
    };

    romance_privacy_settings::Entity::insert(settings)
        .on_conflict(
            OnConflict::columns([
                romance_privacy_settings::Column::PlayerId,
                romance_privacy_settings::Column::RomanceType,
            ])
            .update_columns([
                romance_privacy_settings::Column::ShowRelationshipStatus,
                romance_privacy_settings::Column::ShowRomanceEvents,
                romance_privacy_settings::Column::AllowRomanceRequests,
                romance_privacy_settings::Column::UpdatedAt,
            ])
            .to_owned(),
        )
        .exec_without_returning(txn)
        .await?;

    find_privacy(txn, dto.player_id, &dto.romance_type)
        .await?
        .ok_or_else(|| {
            sea_orm::DbErr::RecordNotFound("romance_privacy_settings row not found".to_string())
        })
}

pub async fn find_privacy<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: Uuid,
    romance_type: &str,
) -> Result<Option<romance_privacy_settings::Model>, sea_orm::DbErr> {
    romance_privacy_settings::Entity::find_by_id((player_id, romance_type.to_string()))
        .one(conn)
        .await
}
