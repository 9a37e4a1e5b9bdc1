mod common;
mod support;

use social_engine::repos::notifications::PreferencesUpdate;
use social_engine::{with_txn, DomainError, NotificationCenter};
use support::test_state;
use uuid::Uuid;

#[tokio::test]
async fn get_or_initialize_stores_defaults_once() -> Result<(), DomainError> {
    let state = test_state().await;

    with_txn(&state.db, move |txn| {
        Box::pin(async move {
            let center = NotificationCenter::new();
            let player = Uuid::new_v4();

            let first = center.get_or_initialize(txn, player).await?;
            assert!(first.romance_updates);
            assert!(first.alliance_updates);
            assert!(first.trust_updates);
            assert!(first.rating_updates);

            let second = center.get_or_initialize(txn, player).await?;
            assert_eq!(first, second);
            Ok::<_, DomainError>(())
        })
    })
    .await
}

#[tokio::test]
async fn update_changes_only_given_fields() -> Result<(), DomainError> {
    let state = test_state().await;

    with_txn(&state.db, move |txn| {
        Box::pin(async move {
            let center = NotificationCenter::new();
            let player = Uuid::new_v4();

            // No prior row: update starts from the defaults.
            let updated = center
                .update(
                    txn,
                    player,
                    PreferencesUpdate {
                        trust_updates: Some(false),
                        ..PreferencesUpdate::default()
                    },
                )
                .await?;
            assert!(!updated.trust_updates);
            assert!(updated.romance_updates);

            let updated = center
                .update(
                    txn,
                    player,
                    PreferencesUpdate {
                        romance_updates: Some(false),
                        ..PreferencesUpdate::default()
                    },
                )
                .await?;
            assert!(!updated.trust_updates);
            assert!(!updated.romance_updates);
            assert!(updated.alliance_updates);

            let read = center.get_or_initialize(txn, player).await?;
            assert_eq!(read, updated);
            Ok::<_, DomainError>(())
        })
    })
    .await
}
