//! SeaORM adapter for notification preferences and the romance
//! notification log.

use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseTransaction, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::entities::{notification_preferences, romance_notifications};

pub mod dto;

pub use dto::PreferencesUpdate;

pub async fn find_preferences<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: Uuid,
) -> Result<Option<notification_preferences::Model>, sea_orm::DbErr> {
    notification_preferences::Entity::find_by_id(player_id)
        .one(conn)
        .await
}

/// Insert the all-enabled default row if the player has none, then return
/// the stored row. Returns whether the default was inserted.
pub async fn ensure_default_preferences(
    txn: &DatabaseTransaction,
    player_id: Uuid,
) -> Result<(notification_preferences::Model, bool), sea_orm::DbErr> {
    let defaults = notification_preferences::ActiveModel {
        player_id: Set(player_id),
        romance_updates: Set(true),
        alliance_updates: Set(true),
        trust_updates: Set(true),
        rating_updates: Set(true),
        updated_at: Set(OffsetDateTime::now_utc()),
    };

    let rows = notification_preferences::Entity::insert(defaults)
        .on_conflict(
            OnConflict::column(notification_preferences::Column::PlayerId)
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(txn)
        .await?;

    let inserted = rows == 1;
    let prefs = find_preferences(txn, player_id).await?.ok_or_else(|| {
        sea_orm::DbErr::RecordNotFound("notification_preferences row not found".to_string())
    })?;

    Ok((prefs, inserted))
}

pub async fn update_preferences(
    txn: &DatabaseTransaction,
    player_id: Uuid,
    changes: PreferencesUpdate,
) -> Result<notification_preferences::Model, sea_orm::DbErr> {
    let (existing, _) = ensure_default_preferences(txn, player_id).await?;
    let mut active: notification_preferences::ActiveModel = existing.into();
    if let Some(value) = changes.romance_updates {
        active.romance_updates = Set(value);
    }
    if let Some(value) = changes.alliance_updates {
        active.alliance_updates = Set(value);
    }
    if let Some(value) = changes.trust_updates {
        active.trust_updates = Set(value);
    }
    if let Some(value) = changes.rating_updates {
        active.rating_updates = Set(value);
    }
    active.updated_at = Set(OffsetDateTime::now_utc());
    active.update(txn).await
}

/// Newest first, with total count.
pub async fn list_romance_notifications<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: Uuid,
    limit: u64,
    offset: u64,
) -> Result<(Vec<romance_notifications::Model>, u64), sea_orm::DbErr> {
    let query = romance_notifications::Entity::find()
        .filter(romance_notifications::Column::PlayerId.eq(player_id));

    let total = query.clone().count(conn).await?;
    let rows = query
        .order_by_desc(romance_notifications::Column::CreatedAt)
        .order_by_desc(romance_notifications::Column::Id)
        .limit(limit)
        .offset(offset)
        .all(conn)
        .await?;

    Ok((rows, total))
}
