//! SeaORM adapter for alliances, membership and invitations.

use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseTransaction, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::entities::alliances::{self, AllianceStatus};
use crate::entities::{alliance_invitations, alliance_members};

pub mod dto;

pub use dto::{AllianceCreate, InvitationCreate};

pub async fn create_alliance(
    txn: &DatabaseTransaction,
    dto: AllianceCreate,
) -> Result<alliances::Model, sea_orm::DbErr> {
    let now = OffsetDateTime::now_utc();
    let alliance = alliances::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(dto.name),
        leader_id: Set(dto.leader_id),
        description: Set(dto.description),
        status: Set(AllianceStatus::Active),
        created_at: Set(now),
        updated_at: Set(now),
        terminated_at: Set(None),
    };
    alliance.insert(txn).await
}

pub async fn find_alliance<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    alliance_id: Uuid,
) -> Result<Option<alliances::Model>, sea_orm::DbErr> {
    alliances::Entity::find_by_id(alliance_id).one(conn).await
}

/// Active alliances, newest first, with the total active count.
pub async fn list_active<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    limit: u64,
    offset: u64,
) -> Result<(Vec<alliances::Model>, u64), sea_orm::DbErr> {
    let query =
        alliances::Entity::find().filter(alliances::Column::Status.eq(AllianceStatus::Active));

    let total = query.clone().count(conn).await?;
    let rows = query
        .order_by_desc(alliances::Column::CreatedAt)
        .order_by_desc(alliances::Column::Id)
        .limit(limit)
        .offset(offset)
        .all(conn)
        .await?;

    Ok((rows, total))
}

/// Guarded active -> terminated flip. `None` if the alliance is missing or
/// not active.
pub async fn terminate_alliance(
    txn: &DatabaseTransaction,
    alliance_id: Uuid,
) -> Result<Option<alliances::Model>, sea_orm::DbErr> {
    let now = OffsetDateTime::now_utc();
    let result = alliances::Entity::update_many()
        .col_expr(
            alliances::Column::Status,
            Expr::val(AllianceStatus::Terminated).into(),
        )
        .col_expr(alliances::Column::TerminatedAt, Expr::val(now).into())
        .col_expr(alliances::Column::UpdatedAt, Expr::val(now).into())
        .filter(alliances::Column::Id.eq(alliance_id))
        .filter(alliances::Column::Status.eq(AllianceStatus::Active))
        .exec(txn)
        .await?;

    if result.rows_affected == 0 {
        return Ok(None);
    }
    find_alliance(txn, alliance_id).await
}

pub async fn create_invitation(
    txn: &DatabaseTransaction,
    dto: InvitationCreate,
) -> Result<alliance_invitations::Model, sea_orm::DbErr> {
    let invitation = alliance_invitations::ActiveModel {
        id: Set(Uuid::new_v4()),
        alliance_id: Set(dto.alliance_id),
        inviter_id: Set(dto.inviter_id),
        player_id: Set(dto.player_id),
        status: Set(alliance_invitations::STATUS_PENDING.to_string()),
        created_at: Set(OffsetDateTime::now_utc()),
    };
    invitation.insert(txn).await
}

pub async fn find_member<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    alliance_id: Uuid,
    player_id: Uuid,
) -> Result<Option<alliance_members::Model>, sea_orm::DbErr> {
    alliance_members::Entity::find_by_id((alliance_id, player_id))
        .one(conn)
        .await
}

/// Idempotent enrolment. Returns the membership row and whether it was new.
pub async fn upsert_member(
    txn: &DatabaseTransaction,
    alliance_id: Uuid,
    player_id: Uuid,
) -> Result<(alliance_members::Model, bool), sea_orm::DbErr> {
    let member = alliance_members::ActiveModel {
        alliance_id: Set(alliance_id),
        player_id: Set(player_id),
        role: Set(alliance_members::MEMBER_ROLE.to_string()),
        joined_at: Set(OffsetDateTime::now_utc()),
    };

    let rows = alliance_members::Entity::insert(member)
        .on_conflict(
            OnConflict::columns([
                alliance_members::Column::AllianceId,
                alliance_members::Column::PlayerId,
            ])
            .do_nothing()
            .to_owned(),
        )
        .exec_without_returning(txn)
        .await?;

    let inserted = rows == 1;
    let member = find_member(txn, alliance_id, player_id)
        .await?
        .ok_or_else(|| {
            sea_orm::DbErr::RecordNotFound("alliance_members row not found".to_string())
        })?;

    Ok((member, inserted))
}

/// Returns the number of membership rows removed (0 or 1).
pub async fn delete_member(
    txn: &DatabaseTransaction,
    alliance_id: Uuid,
    player_id: Uuid,
) -> Result<u64, sea_orm::DbErr> {
    let result = alliance_members::Entity::delete_many()
        .filter(alliance_members::Column::AllianceId.eq(alliance_id))
        .filter(alliance_members::Column::PlayerId.eq(player_id))
        .exec(txn)
        .await?;
    Ok(result.rows_affected)
}

pub async fn find_members<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    alliance_id: Uuid,
) -> Result<Vec<alliance_members::Model>, sea_orm::DbErr> {
    alliance_members::Entity::find()
        .filter(alliance_members::Column::AllianceId.eq(alliance_id))
        .order_by_asc(alliance_members::Column::JoinedAt)
        .order_by_asc(alliance_members::Column::PlayerId)
        .all(conn)
        .await
}
