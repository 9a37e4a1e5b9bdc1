//! SeaORM adapter for trust levels and trust contracts.

use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DatabaseTransaction, EntityTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::domain::score_bounds::TRUST_SEED_LEVEL;
use crate::entities::trust_contracts::{self, ContractStatus};
use crate::entities::trust_levels;

pub mod dto;

pub use dto::ContractCreate;

pub async fn find_level<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: Uuid,
    target_id: Uuid,
) -> Result<Option<trust_levels::Model>, sea_orm::DbErr> {
    trust_levels::Entity::find_by_id((player_id, target_id))
        .one(conn)
        .await
}

/// Make sure the pair has a row, seeded at the default level with no
/// experience. Existing rows are left untouched.
pub async fn seed_level(
    txn: &DatabaseTransaction,
    player_id: Uuid,
    target_id: Uuid,
) -> Result<bool, sea_orm::DbErr> {
    let seed = trust_levels::ActiveModel {
        player_id: Set(player_id),
        target_id: Set(target_id),
        level: Set(TRUST_SEED_LEVEL),
        experience: Set(0),
        updated_at: Set(OffsetDateTime::now_utc()),
    };

    let rows = trust_levels::Entity::insert(seed)
        .on_conflict(
            OnConflict::columns([
                trust_levels::Column::PlayerId,
                trust_levels::Column::TargetId,
            ])
            .do_nothing()
            .to_owned(),
        )
        .exec_without_returning(txn)
        .await?;

    Ok(rows == 1)
}

/// Read the pair's row under `SELECT ... FOR UPDATE` so concurrent deltas
/// on the same pair serialize. SQLite locks the whole database per write
/// transaction and ignores the clause.
pub async fn lock_level(
    txn: &DatabaseTransaction,
    player_id: Uuid,
    target_id: Uuid,
) -> Result<trust_levels::Model, sea_orm::DbErr> {
    trust_levels::Entity::find_by_id((player_id, target_id))
        .lock_exclusive()
        .one(txn)
        .await?
        .ok_or_else(|| sea_orm::DbErr::RecordNotFound("trust level missing after seed".into()))
}

pub async fn write_level(
    txn: &DatabaseTransaction,
    current: trust_levels::Model,
    level: i32,
    experience: i64,
) -> Result<trust_levels::Model, sea_orm::DbErr> {
    let mut active: trust_levels::ActiveModel = current.into();
    active.level = Set(level);
    active.experience = Set(experience);
    active.updated_at = Set(OffsetDateTime::now_utc());
    active.update(txn).await
}

pub async fn create_contract(
    txn: &DatabaseTransaction,
    dto: ContractCreate,
) -> Result<trust_contracts::Model, sea_orm::DbErr> {
    let contract = trust_contracts::ActiveModel {
        id: Set(Uuid::new_v4()),
        player_id: Set(dto.player_id),
        target_id: Set(dto.target_id),
        terms: Set(dto.terms),
        status: Set(ContractStatus::Active),
        created_at: Set(OffsetDateTime::now_utc()),
        expires_at: Set(dto.expires_at),
        terminated_at: Set(None),
    };
    contract.insert(txn).await
}

pub async fn find_contract<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    contract_id: Uuid,
) -> Result<Option<trust_contracts::Model>, sea_orm::DbErr> {
    trust_contracts::Entity::find_by_id(contract_id).one(conn).await
}

/// Flip an active contract to terminated. Returns `None` when the contract
/// is missing or was not active.
pub async fn terminate_contract(
    txn: &DatabaseTransaction,
    contract_id: Uuid,
) -> Result<Option<trust_contracts::Model>, sea_orm::DbErr> {
    let now = OffsetDateTime::now_utc();
    let result = trust_contracts::Entity::update_many()
        .col_expr(
            trust_contracts::Column::Status,
            Expr::val(ContractStatus::Terminated).into(),
        )
        .col_expr(trust_contracts::Column::TerminatedAt, Expr::val(now).into())
        .filter(trust_contracts::Column::Id.eq(contract_id))
        .filter(trust_contracts::Column::Status.eq(ContractStatus::Active))
        .exec(txn)
        .await?;

    if result.rows_affected == 0 {
        return Ok(None);
    }
    find_contract(txn, contract_id).await
}

/// Contracts where the player is either party, newest first.
pub async fn list_contracts_for<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: Uuid,
) -> Result<Vec<trust_contracts::Model>, sea_orm::DbErr> {
    trust_contracts::Entity::find()
        .filter(
            Condition::any()
                .add(trust_contracts::Column::PlayerId.eq(player_id))
                .add(trust_contracts::Column::TargetId.eq(player_id)),
        )
        .order_by_desc(trust_contracts::Column::CreatedAt)
        .order_by_desc(trust_contracts::Column::Id)
        .all(conn)
        .await
}
