//! SeaORM adapter for directed player relationships.

use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseTransaction, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::entities::relationships::{self, RelationshipType};

pub mod dto;

pub use dto::RelationshipUpsert;

pub async fn find_between<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: Uuid,
    target_id: Uuid,
) -> Result<Option<relationships::Model>, sea_orm::DbErr> {
    relationships::Entity::find()
        .filter(relationships::Column::PlayerId.eq(player_id))
        .filter(relationships::Column::TargetId.eq(target_id))
        .one(conn)
        .await
}

/// Insert the pair, or replace its type and refresh `updated_at` if it exists.
/// Identity and `created_at` of an existing row are preserved.
pub async fn upsert_relationship(
    txn: &DatabaseTransaction,
    dto: RelationshipUpsert,
) -> Result<relationships::Model, sea_orm::DbErr> {
    let now = OffsetDateTime::now_utc();
    let active = relationships::ActiveModel {
        id: Set(Uuid::new_v4()),
        player_id: Set(dto.player_id),
        target_id: Set(dto.target_id),
        relationship_type: Set(dto.relationship_type),
        created_at: Set(now),
        updated_at: Set(now),
    };

    relationships::Entity::insert(active)
        .on_conflict(
            OnConflict::columns([
                relationships::Column::PlayerId,
                relationships::Column::TargetId,
            ])
            .update_columns([
                relationships::Column::RelationshipType,
                relationships::Column::UpdatedAt,
            ])
            .to_owned(),
        )
        .exec_without_returning(txn)
        .await?;

    find_between(txn, dto.player_id, dto.target_id)
        .await?
        .ok_or_else(|| sea_orm::DbErr::RecordNotFound("relationship not found after upsert".into()))
}

/// Page of relationships owned by `player_id`, most recently updated first,
/// with the total matching count.
pub async fn list_for_player<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: Uuid,
    relationship_type: Option<RelationshipType>,
    limit: u64,
    offset: u64,
) -> Result<(Vec<relationships::Model>, u64), sea_orm::DbErr> {
    let mut query =
        relationships::Entity::find().filter(relationships::Column::PlayerId.eq(player_id));
    if let Some(kind) = relationship_type {
        query = query.filter(relationships::Column::RelationshipType.eq(kind));
    }

    let total = query.clone().count(conn).await?;
    let rows = query
        .order_by_desc(relationships::Column::UpdatedAt)
        .order_by_desc(relationships::Column::Id)
        .limit(limit)
        .offset(offset)
        .all(conn)
        .await?;

    Ok((rows, total))
}
