//! Relationship repository functions for domain layer.

use sea_orm::{ConnectionTrait, DatabaseTransaction};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::adapters::relationships_sea as relationships_adapter;
use crate::domain::pagination::{Page, PageRequest};
use crate::entities::relationships::{self, RelationshipType};
use crate::errors::domain::DomainError;

/// Directed player -> target relationship
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relationship {
    pub id: Uuid,
    pub player_id: Uuid,
    pub target_id: Uuid,
    pub relationship_type: RelationshipType,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

pub async fn find_between<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: Uuid,
    target_id: Uuid,
) -> Result<Option<Relationship>, DomainError> {
    let row = relationships_adapter::find_between(conn, player_id, target_id).await?;
    Ok(row.map(Relationship::from))
}

pub async fn upsert(
    txn: &DatabaseTransaction,
    player_id: Uuid,
    target_id: Uuid,
    relationship_type: RelationshipType,
) -> Result<Relationship, DomainError> {
    let dto = relationships_adapter::RelationshipUpsert {
        player_id,
        target_id,
        relationship_type,
    };
    let row = relationships_adapter::upsert_relationship(txn, dto).await?;
    Ok(Relationship::from(row))
}

pub async fn list_for_player<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: Uuid,
    relationship_type: Option<RelationshipType>,
    page: PageRequest,
) -> Result<Page<Relationship>, DomainError> {
    let (rows, total) = relationships_adapter::list_for_player(
        conn,
        player_id,
        relationship_type,
        page.limit,
        page.offset,
    )
    .await?;
    Ok(Page::new(rows, total, page).map(Relationship::from))
}

impl From<relationships::Model> for Relationship {
    fn from(model: relationships::Model) -> Self {
        Self {
            id: model.id,
            player_id: model.player_id,
            target_id: model.target_id,
            relationship_type: model.relationship_type,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
