//! SeaORM adapter for ratings, social capital, interaction history and
//! arbitration cases.

use sea_orm::sea_query::{Expr, Func, OnConflict, SimpleExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseTransaction, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::entities::arbitration_cases::{self, CaseStatus};
use crate::entities::{interaction_history, player_ratings, social_capital};

pub mod dto;

pub use dto::{CaseCreate, RatingUpsert};

pub async fn upsert_rating(
    txn: &DatabaseTransaction,
    dto: RatingUpsert,
) -> Result<player_ratings::Model, sea_orm::DbErr> {
    let rating = player_ratings::ActiveModel {
        player_id: Set(dto.player_id),
        rater_id: Set(dto.rater_id),
        rating: Set(dto.rating),
        comment: Set(dto.comment),
        updated_at: Set(OffsetDateTime::now_utc()),
    };

    player_ratings::Entity::insert(rating)
        .on_conflict(
            OnConflict::columns([
                player_ratings::Column::PlayerId,
                player_ratings::Column::RaterId,
            ])
            .update_columns([
                player_ratings::Column::Rating,
                player_ratings::Column::Comment,
                player_ratings::Column::UpdatedAt,
            ])
            .to_owned(),
        )
        .exec_without_returning(txn)
        .await?;

    player_ratings::Entity::find_by_id((dto.player_id, dto.rater_id))
        .one(txn)
        .await?
        .ok_or_else(|| sea_orm::DbErr::RecordNotFound("player_ratings row not found".into()))
}

pub async fn list_ratings<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: Uuid,
    limit: u64,
    offset: u64,
) -> Result<(Vec<player_ratings::Model>, u64), sea_orm::DbErr> {
    let query =
        player_ratings::Entity::find().filter(player_ratings::Column::PlayerId.eq(player_id));

    let total = query.clone().count(conn).await?;
    let rows = query
        .order_by_desc(player_ratings::Column::UpdatedAt)
        .order_by_asc(player_ratings::Column::RaterId)
        .limit(limit)
        .offset(offset)
        .all(conn)
        .await?;

    Ok((rows, total))
}

/// `(count, sum)` of every rating the player has received. Summed as an
/// integer so both backends decode the same type.
pub async fn rating_totals<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: Uuid,
) -> Result<(i64, i64), sea_orm::DbErr> {
    let row = player_ratings::Entity::find()
        .select_only()
        .column_as(
            SimpleExpr::from(Func::count(Expr::col(player_ratings::Column::Rating))),
            "rating_count",
        )
        .column_as(
            SimpleExpr::from(Func::coalesce([
                SimpleExpr::from(Func::sum(Expr::col(player_ratings::Column::Rating))),
                Expr::val(0i64).into(),
            ])),
            "rating_sum",
        )
        .filter(player_ratings::Column::PlayerId.eq(player_id))
        .into_tuple::<(i64, i64)>()
        .one(conn)
        .await?;

    Ok(row.unwrap_or((0, 0)))
}

pub async fn find_social_capital<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: Uuid,
) -> Result<Option<social_capital::Model>, sea_orm::DbErr> {
    social_capital::Entity::find_by_id(player_id).one(conn).await
}

pub async fn list_interactions<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: Uuid,
    limit: u64,
    offset: u64,
) -> Result<(Vec<interaction_history::Model>, u64), sea_orm::DbErr> {
    let query = interaction_history::Entity::find()
        .filter(interaction_history::Column::PlayerId.eq(player_id));

    let total = query.clone().count(conn).await?;
    let rows = query
        .order_by_desc(interaction_history::Column::CreatedAt)
        .order_by_desc(interaction_history::Column::Id)
        .limit(limit)
        .offset(offset)
        .all(conn)
        .await?;

    Ok((rows, total))
}

pub async fn create_case(
    txn: &DatabaseTransaction,
    dto: CaseCreate,
) -> Result<arbitration_cases::Model, sea_orm::DbErr> {
    let case = arbitration_cases::ActiveModel {
        id: Set(Uuid::new_v4()),
        requester_id: Set(dto.requester_id),
        target_id: Set(dto.target_id),
        issue: Set(dto.issue),
        status: Set(CaseStatus::Pending),
        created_at: Set(OffsetDateTime::now_utc()),
        resolved_at: Set(None),
    };
    case.insert(txn).await
}

pub async fn find_case<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    case_id: Uuid,
) -> Result<Option<arbitration_cases::Model>, sea_orm::DbErr> {
    arbitration_cases::Entity::find_by_id(case_id).one(conn).await
}
