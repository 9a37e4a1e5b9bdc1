use std::sync::Arc;

use sea_orm::{ConnectionTrait, DatabaseTransaction, Iterable};
use serde_json::Value;
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::engine::EngineConfig;
use crate::domain::compatibility::{BaselineScorer, Compatibility, CompatibilityScorer};
use crate::domain::pagination::{Page, PageRequest};
use crate::domain::pairs::CanonicalPair;
use crate::domain::romance::{RomanceTransition, INITIATION_MESSAGE_KEY};
use crate::entities::romance_relationships::RomanceType;
use crate::errors::domain::{ConflictKind, DomainError, NotFoundKind, ValidationKind};
use crate::repos::notifications::{self, RomanceNotification};
use crate::repos::payload::Metadata;
use crate::repos::romance::{self, PrivacyToggles, RomancePrivacySettings, RomanceRelationship};

/// Consent-gated player-player romance lifecycle.
///
/// At most one active romance exists per unordered pair. `accept` only
/// fires from PendingConsent or Dating; `reject` and `breakup` are
/// caller-trusted and fire from any state once the caller is a participant.
pub struct RomanceStateMachine {
    config: EngineConfig,
    scorer: Arc<dyn CompatibilityScorer>,
}

impl RomanceStateMachine {
    pub fn new(config: &EngineConfig) -> Self {
        Self::with_scorer(config, Arc::new(BaselineScorer))
    }

    pub fn with_scorer(config: &EngineConfig, scorer: Arc<dyn CompatibilityScorer>) -> Self {
        Self {
            config: *config,
            scorer,
        }
    }

    /// Open a pending request from `player_id` to `target_id`.
    ///
    /// A non-empty `privacy` map also stores the initiator's player-player
    /// privacy toggles in the same transaction.
    pub async fn initiate(
        &self,
        txn: &DatabaseTransaction,
        player_id: Uuid,
        target_id: Uuid,
        message: &str,
        privacy: &Metadata,
    ) -> Result<RomanceRelationship, DomainError> {
        if player_id == target_id {
            return Err(DomainError::validation(
                ValidationKind::SelfRomance,
                "a player cannot start a romance with themselves",
            ));
        }

        let pair = CanonicalPair::new(player_id, target_id);
        if let Some(existing) =
            romance::find_active_between(txn, RomanceType::PlayerPlayer, &pair).await?
        {
            debug!(
                player_id = %player_id,
                target_id = %target_id,
                existing_id = %existing.id,
                "active romance already exists"
            );
            return Err(DomainError::conflict(
                ConflictKind::ActiveRomanceExists,
                format!("an active romance {} already exists for this pair", existing.id),
            ));
        }

        let mut metadata = Metadata::new();
        metadata.insert(
            INITIATION_MESSAGE_KEY.to_string(),
            Value::String(message.to_string()),
        );
        let romance = romance::create_pending(
            txn,
            RomanceType::PlayerPlayer,
            player_id,
            target_id,
            &metadata,
        )
        .await?;

        if !privacy.is_empty() {
            romance::upsert_privacy(
                txn,
                player_id,
                RomanceType::PlayerPlayer,
                PrivacyToggles::from_settings(privacy),
            )
            .await?;
        }

        info!(
            romance_id = %romance.id,
            player_id = %player_id,
            target_id = %target_id,
            "romance initiated"
        );
        Ok(romance)
    }

    pub async fn get<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        romance_id: Uuid,
    ) -> Result<Option<RomanceRelationship>, DomainError> {
        romance::find_by_id(conn, romance_id).await
    }

    /// PendingConsent -> Dating. Re-accepting a Dating romance succeeds and
    /// rewrites the same fields.
    pub async fn accept(
        &self,
        txn: &DatabaseTransaction,
        romance_id: Uuid,
        player_id: Uuid,
    ) -> Result<RomanceRelationship, DomainError> {
        self.transition(txn, romance_id, player_id, RomanceTransition::Accept)
            .await
    }

    pub async fn reject(
        &self,
        txn: &DatabaseTransaction,
        romance_id: Uuid,
        player_id: Uuid,
    ) -> Result<RomanceRelationship, DomainError> {
        self.transition(txn, romance_id, player_id, RomanceTransition::Reject)
            .await
    }

    pub async fn breakup(
        &self,
        txn: &DatabaseTransaction,
        romance_id: Uuid,
        player_id: Uuid,
    ) -> Result<RomanceRelationship, DomainError> {
        self.transition(txn, romance_id, player_id, RomanceTransition::Breakup)
            .await
    }

    /// No persisted side effect.
    pub async fn compatibility(
        &self,
        player_id: Uuid,
        target_id: Uuid,
    ) -> Result<Compatibility, DomainError> {
        self.scorer.score(player_id, target_id).await
    }

    /// Persists the three known toggles; other keys are accepted and dropped.
    pub async fn update_privacy(
        &self,
        txn: &DatabaseTransaction,
        player_id: Uuid,
        romance_type: RomanceType,
        settings: &Metadata,
    ) -> Result<RomancePrivacySettings, DomainError> {
        let stored = romance::upsert_privacy(
            txn,
            player_id,
            romance_type,
            PrivacyToggles::from_settings(settings),
        )
        .await?;
        info!(
            player_id = %player_id,
            romance_type = ?romance_type,
            "romance privacy updated"
        );
        Ok(stored)
    }

    pub async fn privacy<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        player_id: Uuid,
        romance_type: RomanceType,
    ) -> Result<Option<RomancePrivacySettings>, DomainError> {
        romance::find_privacy(conn, player_id, romance_type).await
    }

    /// Romances the player takes part in on either side, newest-updated first.
    pub async fn list_for_player<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        player_id: Uuid,
        romance_type: Option<RomanceType>,
        page: PageRequest,
    ) -> Result<Page<RomanceRelationship>, DomainError> {
        romance::list_for_player(conn, player_id, romance_type, page.normalize(&self.config)).await
    }

    pub fn romance_types(&self) -> Vec<RomanceType> {
        RomanceType::iter().collect()
    }

    /// The player-player romance between two players in either order,
    /// preferring an active one.
    pub async fn find_between<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        player_id: Uuid,
        target_id: Uuid,
    ) -> Result<Option<RomanceRelationship>, DomainError> {
        let pair = CanonicalPair::new(player_id, target_id);
        romance::find_latest_between(conn, RomanceType::PlayerPlayer, &pair).await
    }

    pub async fn notifications<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        player_id: Uuid,
        page: PageRequest,
    ) -> Result<Page<RomanceNotification>, DomainError> {
        notifications::list_romance_notifications(conn, player_id, page.normalize(&self.config))
            .await
    }

    async fn transition(
        &self,
        txn: &DatabaseTransaction,
        romance_id: Uuid,
        player_id: Uuid,
        transition: RomanceTransition,
    ) -> Result<RomanceRelationship, DomainError> {
        let updated = romance::transition(txn, romance_id, |current| {
            if !current.involves(player_id) {
                return None;
            }
            transition.apply(&current.status())
        })
        .await?
        .ok_or_else(|| {
            DomainError::not_found(
                NotFoundKind::Romance,
                format!("romance {romance_id} not found for player {player_id}"),
            )
        })?;

        info!(
            romance_id = %romance_id,
            player_id = %player_id,
            transition = ?transition,
            consent_status = ?updated.consent_status,
            "romance transition applied"
        );
        Ok(updated)
    }
}

impl Default for RomanceStateMachine {
    fn default() -> Self {
        Self::new(&EngineConfig::default())
    }
}
