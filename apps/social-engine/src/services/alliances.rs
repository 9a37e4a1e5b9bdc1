use sea_orm::{ConnectionTrait, DatabaseTransaction};
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::engine::EngineConfig;
use crate::domain::pagination::{Page, PageRequest};
use crate::errors::domain::{DomainError, NotFoundKind, ValidationKind};
use crate::repos::alliances::{self, Alliance, AllianceInvitation, AllianceMember};

/// Named player groups with a leader, a membership set and invitations.
pub struct AllianceRegistry {
    config: EngineConfig,
}

impl AllianceRegistry {
    pub fn new(config: &EngineConfig) -> Self {
        Self { config: *config }
    }

    /// Create an active alliance and enroll the leader as a plain member.
    ///
    /// Both writes share the caller's transaction, so a failed enrollment
    /// takes the alliance row down with it.
    pub async fn create(
        &self,
        txn: &DatabaseTransaction,
        leader_id: Uuid,
        name: &str,
        description: &str,
    ) -> Result<Alliance, DomainError> {
        if name.trim().is_empty() {
            return Err(DomainError::validation(
                ValidationKind::EmptyAllianceName,
                "alliance name must not be empty",
            ));
        }

        let alliance = alliances::create(txn, leader_id, name, description).await?;
        alliances::join(txn, alliance.id, leader_id).await?;

        info!(
            alliance_id = %alliance.id,
            leader_id = %leader_id,
            name = %alliance.name,
            "alliance created"
        );
        Ok(alliance)
    }

    /// Active alliances only, newest first.
    pub async fn list<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        page: PageRequest,
    ) -> Result<Page<Alliance>, DomainError> {
        alliances::list_active(conn, page.normalize(&self.config)).await
    }

    /// Terminated alliances are still returned.
    pub async fn get<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        alliance_id: Uuid,
    ) -> Result<Option<Alliance>, DomainError> {
        alliances::find_by_id(conn, alliance_id).await
    }

    pub async fn terminate(
        &self,
        txn: &DatabaseTransaction,
        alliance_id: Uuid,
    ) -> Result<Alliance, DomainError> {
        let alliance = alliances::terminate(txn, alliance_id).await?.ok_or_else(|| {
            DomainError::not_found(
                NotFoundKind::Alliance,
                format!("no active alliance {alliance_id}"),
            )
        })?;
        info!(alliance_id = %alliance_id, "alliance terminated");
        Ok(alliance)
    }

    /// Always records a new pending invitation. Deduplication and permission
    /// checks belong to the caller.
    pub async fn invite(
        &self,
        txn: &DatabaseTransaction,
        alliance_id: Uuid,
        inviter_id: Uuid,
        player_id: Uuid,
    ) -> Result<AllianceInvitation, DomainError> {
        self.require_alliance(txn, alliance_id).await?;
        let invitation =
            alliances::create_invitation(txn, alliance_id, inviter_id, player_id).await?;
        info!(
            alliance_id = %alliance_id,
            inviter_id = %inviter_id,
            player_id = %player_id,
            invitation_id = %invitation.id,
            "alliance invitation created"
        );
        Ok(invitation)
    }

    /// Idempotent: joining twice leaves a single membership.
    pub async fn join(
        &self,
        txn: &DatabaseTransaction,
        alliance_id: Uuid,
        player_id: Uuid,
    ) -> Result<AllianceMember, DomainError> {
        self.require_alliance(txn, alliance_id).await?;
        let (member, inserted) = alliances::join(txn, alliance_id, player_id).await?;
        if inserted {
            info!(alliance_id = %alliance_id, player_id = %player_id, "alliance joined");
        } else {
            debug!(alliance_id = %alliance_id, player_id = %player_id, "already a member");
        }
        Ok(member)
    }

    pub async fn leave(
        &self,
        txn: &DatabaseTransaction,
        alliance_id: Uuid,
        player_id: Uuid,
    ) -> Result<(), DomainError> {
        if !alliances::leave(txn, alliance_id, player_id).await? {
            return Err(DomainError::not_found(
                NotFoundKind::Membership,
                format!("player {player_id} is not a member of alliance {alliance_id}"),
            ));
        }
        info!(alliance_id = %alliance_id, player_id = %player_id, "alliance left");
        Ok(())
    }

    pub async fn members<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        alliance_id: Uuid,
    ) -> Result<Vec<AllianceMember>, DomainError> {
        alliances::members(conn, alliance_id).await
    }

    async fn require_alliance<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        alliance_id: Uuid,
    ) -> Result<Alliance, DomainError> {
        alliances::find_by_id(conn, alliance_id)
            .await?
            .ok_or_else(|| {
                DomainError::not_found(NotFoundKind::Alliance, format!("alliance {alliance_id}"))
            })
    }
}

impl Default for AllianceRegistry {
    fn default() -> Self {
        Self::new(&EngineConfig::default())
    }
}
