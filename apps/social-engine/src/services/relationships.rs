use sea_orm::{ConnectionTrait, DatabaseTransaction};
use tracing::info;
use uuid::Uuid;

use crate::config::engine::EngineConfig;
use crate::domain::pagination::{Page, PageRequest};
use crate::entities::relationships::RelationshipType;
use crate::errors::domain::{DomainError, ValidationKind};
use crate::repos::relationships::{self, Relationship};

/// Directed player -> target relationships.
pub struct RelationshipGraph {
    config: EngineConfig,
}

impl RelationshipGraph {
    pub fn new(config: &EngineConfig) -> Self {
        Self { config: *config }
    }

    /// Most recently updated first. The total counts every match for the
    /// filter, not just this window.
    pub async fn list<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        player_id: Uuid,
        relationship_type: Option<RelationshipType>,
        page: PageRequest,
    ) -> Result<Page<Relationship>, DomainError> {
        let page = page.normalize(&self.config);
        relationships::list_for_player(conn, player_id, relationship_type, page).await
    }

    /// Insert or replace the relationship for the ordered pair.
    pub async fn set(
        &self,
        txn: &DatabaseTransaction,
        player_id: Uuid,
        target_id: Uuid,
        relationship_type: RelationshipType,
    ) -> Result<Relationship, DomainError> {
        if player_id == target_id {
            return Err(DomainError::validation(
                ValidationKind::SelfRelationship,
                "a player cannot hold a relationship with themselves",
            ));
        }

        let relationship =
            relationships::upsert(txn, player_id, target_id, relationship_type).await?;
        info!(
            player_id = %player_id,
            target_id = %target_id,
            relationship_type = ?relationship_type,
            relationship_id = %relationship.id,
            "relationship set"
        );
        Ok(relationship)
    }

    /// Exact direction only: `(a, b)` does not find a row stored as `(b, a)`.
    pub async fn get_between<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        player_id: Uuid,
        target_id: Uuid,
    ) -> Result<Option<Relationship>, DomainError> {
        relationships::find_between(conn, player_id, target_id).await
    }
}

impl Default for RelationshipGraph {
    fn default() -> Self {
        Self::new(&EngineConfig::default())
    }
}
