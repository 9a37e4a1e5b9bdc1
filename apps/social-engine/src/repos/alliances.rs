//! Alliance repository functions for domain layer.

use sea_orm::{ConnectionTrait, DatabaseTransaction};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::adapters::alliances_sea as alliances_adapter;
use crate::domain::pagination::{Page, PageRequest};
use crate::entities::alliances::{self, AllianceStatus};
use crate::entities::{alliance_invitations, alliance_members};
use crate::errors::domain::DomainError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alliance {
    pub id: Uuid,
    pub name: String,
    pub leader_id: Uuid,
    pub description: String,
    pub status: AllianceStatus,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
    pub terminated_at: Option<OffsetDateTime>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllianceMember {
    pub alliance_id: Uuid,
    pub player_id: Uuid,
    pub role: String,
    pub joined_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllianceInvitation {
    pub id: Uuid,
    pub alliance_id: Uuid,
    pub inviter_id: Uuid,
    pub player_id: Uuid,
    pub status: String,
    pub created_at: OffsetDateTime,
}

pub async fn create(
    txn: &DatabaseTransaction,
    leader_id: Uuid,
    name: &str,
    description: &str,
) -> Result<Alliance, DomainError> {
    let dto = alliances_adapter::AllianceCreate {
        leader_id,
        name: name.to_string(),
        description: description.to_string(),
    };
    let row = alliances_adapter::create_alliance(txn, dto).await?;
    Ok(Alliance::from(row))
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    alliance_id: Uuid,
) -> Result<Option<Alliance>, DomainError> {
    let row = alliances_adapter::find_alliance(conn, alliance_id).await?;
    Ok(row.map(Alliance::from))
}

pub async fn list_active<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    page: PageRequest,
) -> Result<Page<Alliance>, DomainError> {
    let (rows, total) = alliances_adapter::list_active(conn, page.limit, page.offset).await?;
    Ok(Page::new(rows, total, page).map(Alliance::from))
}

pub async fn terminate(
    txn: &DatabaseTransaction,
    alliance_id: Uuid,
) -> Result<Option<Alliance>, DomainError> {
    let row = alliances_adapter::terminate_alliance(txn, alliance_id).await?;
    Ok(row.map(Alliance::from))
}

pub async fn create_invitation(
    txn: &DatabaseTransaction,
    alliance_id: Uuid,
    inviter_id: Uuid,
    player_id: Uuid,
) -> Result<AllianceInvitation, DomainError> {
    let dto = alliances_adapter::InvitationCreate {
        alliance_id,
        inviter_id,
        player_id,
    };
    let row = alliances_adapter::create_invitation(txn, dto).await?;
    Ok(AllianceInvitation::from(row))
}

/// Returns the membership and whether this call created it.
pub async fn join(
    txn: &DatabaseTransaction,
    alliance_id: Uuid,
    player_id: Uuid,
) -> Result<(AllianceMember, bool), DomainError> {
    let (row, inserted) = alliances_adapter::upsert_member(txn, alliance_id, player_id).await?;
    Ok((AllianceMember::from(row), inserted))
}

/// Returns `false` when there was no membership to remove.
pub async fn leave(
    txn: &DatabaseTransaction,
    alliance_id: Uuid,
    player_id: Uuid,
) -> Result<bool, DomainError> {
    let removed = alliances_adapter::delete_member(txn, alliance_id, player_id).await?;
    Ok(removed > 0)
}

pub async fn members<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    alliance_id: Uuid,
) -> Result<Vec<AllianceMember>, DomainError> {
    let rows = alliances_adapter::find_members(conn, alliance_id).await?;
    Ok(rows.into_iter().map(AllianceMember::from).collect())
}

impl From<alliances::Model> for Alliance {
    fn from(model: alliances::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            leader_id: model.leader_id,
            description: model.description,
            status: model.status,
            created_at: model.created_at,
            updated_at: model.updated_at,
            terminated_at: model.terminated_at,
        }
    }
}

impl From<alliance_members::Model> for AllianceMember {
    fn from(model: alliance_members::Model) -> Self {
        Self {
            alliance_id: model.alliance_id,
            player_id: model.player_id,
            role: model.role,
            joined_at: model.joined_at,
        }
    }
}

impl From<alliance_invitations::Model> for AllianceInvitation {
    fn from(model: alliance_invitations::Model) -> Self {
        Self {
            id: model.id,
            alliance_id: model.alliance_id,
            inviter_id: model.inviter_id,
            player_id: model.player_id,
            status: model.status,
            created_at: model.created_at,
        }
    }
}
