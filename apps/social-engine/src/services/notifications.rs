use sea_orm::DatabaseTransaction;
use tracing::info;
use uuid::Uuid;

use crate::errors::domain::DomainError;
use crate::repos::notifications::{self, NotificationPreferences, PreferencesUpdate};

/// Per-player notification preferences.
///
/// Reading preferences is an explicit get-or-initialize: a player without a
/// row gets the default (every category enabled) written and returned.
pub struct NotificationCenter;

impl NotificationCenter {
    pub fn new() -> Self {
        Self
    }

    pub async fn get_or_initialize(
        &self,
        txn: &DatabaseTransaction,
        player_id: Uuid,
    ) -> Result<NotificationPreferences, DomainError> {
        let (prefs, inserted) = notifications::get_or_initialize(txn, player_id).await?;
        if inserted {
            info!(player_id = %player_id, "default notification preferences stored");
        }
        Ok(prefs)
    }

    /// Fields left as `None` keep their stored value.
    pub async fn update(
        &self,
        txn: &DatabaseTransaction,
        player_id: Uuid,
        changes: PreferencesUpdate,
    ) -> Result<NotificationPreferences, DomainError> {
        let prefs = notifications::update_preferences(txn, player_id, changes).await?;
        info!(player_id = %player_id, "notification preferences updated");
        Ok(prefs)
    }
}

impl Default for NotificationCenter {
    fn default() -> Self {
        Self::new()
    }
}
