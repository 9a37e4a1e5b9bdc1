//! Notification preferences and the romance notification log.

use sea_orm::{ConnectionTrait, DatabaseTransaction};
use time::OffsetDateTime;
use uuid::Uuid;

use super::payload::{self, Metadata};
use crate::adapters::notifications_sea as notifications_adapter;
use crate::domain::pagination::{Page, PageRequest};
use crate::entities::{notification_preferences, romance_notifications};
use crate::errors::domain::DomainError;

pub use notifications_adapter::PreferencesUpdate;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationPreferences {
    pub player_id: Uuid,
    pub romance_updates: bool,
    pub alliance_updates: bool,
    pub trust_updates: bool,
    pub rating_updates: bool,
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RomanceNotification {
    pub id: Uuid,
    pub player_id: Uuid,
    pub notification_type: String,
    pub relationship_id: Option<Uuid>,
    pub message: String,
    pub is_read: bool,
    pub metadata: Metadata,
    pub created_at: OffsetDateTime,
}

/// Returns the stored preferences, inserting the all-enabled default first
/// when the player has none. The flag reports whether that insert happened.
pub async fn get_or_initialize(
    txn: &DatabaseTransaction,
    player_id: Uuid,
) -> Result<(NotificationPreferences, bool), DomainError> {
    let (row, inserted) = notifications_adapter::ensure_default_preferences(txn, player_id).await?;
    Ok((NotificationPreferences::from(row), inserted))
}

pub async fn update_preferences(
    txn: &DatabaseTransaction,
    player_id: Uuid,
    changes: PreferencesUpdate,
) -> Result<NotificationPreferences, DomainError> {
    let row = notifications_adapter::update_preferences(txn, player_id, changes).await?;
    Ok(NotificationPreferences::from(row))
}

pub async fn list_romance_notifications<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: Uuid,
    page: PageRequest,
) -> Result<Page<RomanceNotification>, DomainError> {
    let (rows, total) = notifications_adapter::list_romance_notifications(
        conn,
        player_id,
        page.limit,
        page.offset,
    )
    .await?;
    Ok(Page::new(rows, total, page).map(RomanceNotification::from))
}

impl From<notification_preferences::Model> for NotificationPreferences {
    fn from(model: notification_preferences::Model) -> Self {
        Self {
            player_id: model.player_id,
            romance_updates: model.romance_updates,
            alliance_updates: model.alliance_updates,
            trust_updates: model.trust_updates,
            rating_updates: model.rating_updates,
            updated_at: model.updated_at,
        }
    }
}

impl From<romance_notifications::Model> for RomanceNotification {
    fn from(model: romance_notifications::Model) -> Self {
        let metadata = payload::decode_or_default(&model.metadata, "metadata", model.id);
        Self {
            id: model.id,
            player_id: model.player_id,
            notification_type: model.notification_type,
            relationship_id: model.relationship_id,
            message: model.message,
            is_read: model.is_read,
            metadata,
            created_at: model.created_at,
        }
    }
}
