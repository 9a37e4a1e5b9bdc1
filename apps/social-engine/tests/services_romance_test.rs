mod common;
mod support;

use serde_json::{json, Value};
use social_engine::domain::romance::{INITIATION_MESSAGE_KEY, STAGE_DATING, STAGE_STRANGER};
use social_engine::entities::romance_relationships::{ConsentStatus, RomanceType};
use social_engine::repos::payload::Metadata;
use social_engine::{
    with_txn, ConflictKind, DomainError, NotFoundKind, PageRequest, RomanceStateMachine,
    ValidationKind,
};
use support::{factory, test_state};
use time::{Duration, OffsetDateTime};
use uuid::Uuid;

fn settings(value: Value) -> Metadata {
    value.as_object().cloned().expect("settings object")
}

#[tokio::test]
async fn initiate_creates_pending_request() -> Result<(), DomainError> {
    let state = test_state().await;

    with_txn(&state.db, move |txn| {
        Box::pin(async move {
            let romance = RomanceStateMachine::default();
            let (a, b) = (Uuid::new_v4(), Uuid::new_v4());

            let created = romance.initiate(txn, a, b, "coffee?", &Metadata::new()).await?;
            assert_eq!(created.romance_type, RomanceType::PlayerPlayer);
            assert_eq!((created.player_id, created.target_id), (a, b));
            assert_eq!(created.consent_status, ConsentStatus::Pending);
            assert!(created.is_active);
            assert!(!created.is_romantic);
            assert!(!created.is_public);
            assert_eq!(created.relationship_stage, STAGE_STRANGER);
            assert_eq!(created.relationship_health, 100);
            assert_eq!(
                [
                    created.relationship_score,
                    created.chemistry_score,
                    created.trust_score,
                    created.physical_intimacy,
                    created.emotional_intimacy,
                ],
                [0; 5]
            );
            assert!(created.flags.is_empty());
            assert_eq!(
                created.metadata.get(INITIATION_MESSAGE_KEY),
                Some(&json!("coffee?"))
            );
            // Nothing was asked for, so no privacy row is written.
            assert!(romance.privacy(txn, a, RomanceType::PlayerPlayer).await?.is_none());
            Ok::<_, DomainError>(())
        })
    })
    .await
}

#[tokio::test]
async fn initiate_rejects_self_romance() -> Result<(), DomainError> {
    let state = test_state().await;

    with_txn(&state.db, move |txn| {
        Box::pin(async move {
            let romance = RomanceStateMachine::default();
            let player = Uuid::new_v4();
            let err = romance
                .initiate(txn, player, player, "me?", &Metadata::new())
                .await
                .expect_err("self romance");
            assert!(matches!(err, DomainError::Validation(ValidationKind::SelfRomance, _)));
            Ok::<_, DomainError>(())
        })
    })
    .await
}

#[tokio::test]
async fn reversed_initiate_conflicts_while_first_is_active() -> Result<(), DomainError> {
    let state = test_state().await;

    with_txn(&state.db, move |txn| {
        Box::pin(async move {
            let romance = RomanceStateMachine::default();
            let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
            romance.initiate(txn, a, b, "hi", &Metadata::new()).await?;

            for (from, to) in [(b, a), (a, b)] {
                let err = romance
                    .initiate(txn, from, to, "hello", &Metadata::new())
                    .await
                    .expect_err("active romance exists");
                assert!(matches!(
                    err,
                    DomainError::Conflict(ConflictKind::ActiveRomanceExists, _)
                ));
            }
            Ok::<_, DomainError>(())
        })
    })
    .await
}

#[tokio::test]
async fn accept_moves_to_dating_and_tolerates_repeat() -> Result<(), DomainError> {
    let state = test_state().await;

    with_txn(&state.db, move |txn| {
        Box::pin(async move {
            let romance = RomanceStateMachine::default();
            let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
            let pending = romance.initiate(txn, a, b, "hi", &Metadata::new()).await?;

            let dating = romance.accept(txn, pending.id, b).await?;
            assert_eq!(dating.consent_status, ConsentStatus::Accepted);
            assert!(dating.is_active);
            assert!(dating.is_romantic);
            assert_eq!(dating.relationship_stage, STAGE_DATING);

            // Documented quirk: accepting an already-dating romance succeeds.
            let again = romance.accept(txn, pending.id, a).await?;
            assert_eq!(again.consent_status, ConsentStatus::Accepted);
            assert_eq!(again.relationship_stage, STAGE_DATING);
            Ok::<_, DomainError>(())
        })
    })
    .await
}

#[tokio::test]
async fn non_participant_and_missing_rows_are_not_found() -> Result<(), DomainError> {
    let state = test_state().await;

    with_txn(&state.db, move |txn| {
        Box::pin(async move {
            let romance = RomanceStateMachine::default();
            let (a, b, outsider) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
            let pending = romance.initiate(txn, a, b, "hi", &Metadata::new()).await?;

            let err = romance
                .accept(txn, pending.id, outsider)
                .await
                .expect_err("outsider");
            assert!(matches!(err, DomainError::NotFound(NotFoundKind::Romance, _)));

            let err = romance
                .breakup(txn, Uuid::new_v4(), a)
                .await
                .expect_err("missing romance");
            assert!(matches!(err, DomainError::NotFound(NotFoundKind::Romance, _)));

            // The outsider's attempt left the row untouched.
            let current = romance.find_between(txn, b, a).await?.expect("romance");
            assert_eq!(current.consent_status, ConsentStatus::Pending);
            Ok::<_, DomainError>(())
        })
    })
    .await
}

#[tokio::test]
async fn reject_is_terminal_and_frees_the_pair() -> Result<(), DomainError> {
    let state = test_state().await;

    with_txn(&state.db, move |txn| {
        Box::pin(async move {
            let romance = RomanceStateMachine::default();
            let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
            let pending = romance.initiate(txn, a, b, "hi", &Metadata::new()).await?;

            let rejected = romance.reject(txn, pending.id, b).await?;
            assert_eq!(rejected.consent_status, ConsentStatus::Rejected);
            assert!(!rejected.is_active);

            // Re-rejecting re-applies the same fields.
            let twice = romance.reject(txn, pending.id, b).await?;
            assert_eq!(twice.consent_status, ConsentStatus::Rejected);

            let err = romance
                .accept(txn, pending.id, b)
                .await
                .expect_err("accept after reject");
            assert!(err.is_not_found());

            // A terminal row no longer blocks a fresh request.
            let fresh = romance.initiate(txn, b, a, "second try", &Metadata::new()).await?;
            assert_ne!(fresh.id, pending.id);
            let found = romance.find_between(txn, a, b).await?.expect("active one");
            assert_eq!(found.id, fresh.id);
            Ok::<_, DomainError>(())
        })
    })
    .await
}

// Reject is caller-trusted: it is not limited to pending requests, so a
// dating romance can still be rejected. Only the consent and activity
// fields change.
#[tokio::test]
async fn reject_still_applies_to_a_dating_romance() -> Result<(), DomainError> {
    let state = test_state().await;

    with_txn(&state.db, move |txn| {
        Box::pin(async move {
            let romance = RomanceStateMachine::default();
            let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
            let pending = romance.initiate(txn, a, b, "hi", &Metadata::new()).await?;
            let dating = romance.accept(txn, pending.id, b).await?;
            assert!(dating.is_romantic);
            assert_eq!(dating.relationship_stage, STAGE_DATING);

            let rejected = romance.reject(txn, pending.id, a).await?;
            assert_eq!(rejected.consent_status, ConsentStatus::Rejected);
            assert!(!rejected.is_active);
            assert!(rejected.is_romantic);
            assert_eq!(rejected.relationship_stage, STAGE_DATING);

            let stored = romance.get(txn, pending.id).await?.expect("romance row");
            assert_eq!(stored.status(), rejected.status());

            let err = romance
                .accept(txn, pending.id, b)
                .await
                .expect_err("accept after reject");
            assert!(matches!(err, DomainError::NotFound(NotFoundKind::Romance, _)));
            Ok::<_, DomainError>(())
        })
    })
    .await
}

#[tokio::test]
async fn breakup_ends_a_dating_romance() -> Result<(), DomainError> {
    let state = test_state().await;

    with_txn(&state.db, move |txn| {
        Box::pin(async move {
            let romance = RomanceStateMachine::default();
            let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
            let pending = romance.initiate(txn, a, b, "hi", &Metadata::new()).await?;
            romance.accept(txn, pending.id, b).await?;

            let ended = romance.breakup(txn, pending.id, a).await?;
            assert_eq!(ended.consent_status, ConsentStatus::Revoked);
            assert!(!ended.is_active);
            assert!(!ended.is_romantic);
            assert_eq!(ended.relationship_stage, STAGE_STRANGER);

            let stored = romance.get(txn, pending.id).await?.expect("romance row");
            assert_eq!(stored.status(), ended.status());
            assert!(romance.get(txn, Uuid::new_v4()).await?.is_none());
            Ok::<_, DomainError>(())
        })
    })
    .await
}

#[tokio::test]
async fn privacy_keeps_known_toggles_only() -> Result<(), DomainError> {
    let state = test_state().await;

    with_txn(&state.db, move |txn| {
        Box::pin(async move {
            let romance = RomanceStateMachine::default();
            let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
            let on_initiate = settings(json!({"show_romance_events": false, "theme": "dark"}));
            romance.initiate(txn, a, b, "hi", &on_initiate).await?;

            let stored = romance
                .privacy(txn, a, RomanceType::PlayerPlayer)
                .await?
                .expect("privacy from initiate");
            assert!(stored.toggles.show_relationship_status);
            assert!(!stored.toggles.show_romance_events);
            assert!(stored.toggles.allow_romance_requests);

            let updated = romance
                .update_privacy(
                    txn,
                    a,
                    RomanceType::PlayerPlayer,
                    &settings(json!({"allow_romance_requests": false})),
                )
                .await?;
            assert!(updated.toggles.show_romance_events, "absent keys reset to enabled");
            assert!(!updated.toggles.allow_romance_requests);

            assert!(romance.privacy(txn, a, RomanceType::PlayerNpc).await?.is_none());
            Ok::<_, DomainError>(())
        })
    })
    .await
}

#[tokio::test]
async fn damaged_flags_and_metadata_degrade_to_empty() -> Result<(), DomainError> {
    let state = test_state().await;

    with_txn(&state.db, move |txn| {
        Box::pin(async move {
            let romance = RomanceStateMachine::default();
            let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
            let created = romance.initiate(txn, a, b, "hi", &Metadata::new()).await?;
            factory::overwrite_romance_payloads(txn, created.id, "[\"shy\",", "not json").await?;

            let read = romance.find_between(txn, a, b).await?.expect("romance");
            assert!(read.flags.is_empty());
            assert!(read.metadata.is_empty());
            assert_eq!(read.consent_status, ConsentStatus::Pending);
            Ok::<_, DomainError>(())
        })
    })
    .await
}

#[tokio::test]
async fn list_for_player_covers_both_sides() -> Result<(), DomainError> {
    let state = test_state().await;

    with_txn(&state.db, move |txn| {
        Box::pin(async move {
            let romance = RomanceStateMachine::default();
            let player = Uuid::new_v4();
            romance
                .initiate(txn, player, Uuid::new_v4(), "hi", &Metadata::new())
                .await?;
            romance
                .initiate(txn, Uuid::new_v4(), player, "hey", &Metadata::new())
                .await?;
            romance
                .initiate(txn, Uuid::new_v4(), Uuid::new_v4(), "unrelated", &Metadata::new())
                .await?;

            let page = romance
                .list_for_player(txn, player, None, PageRequest::new(1, 0))
                .await?;
            assert_eq!(page.total, 2);
            assert_eq!(page.len(), 1);

            let npc = romance
                .list_for_player(txn, player, Some(RomanceType::PlayerNpc), PageRequest::default())
                .await?;
            assert_eq!(npc.total, 0);
            Ok::<_, DomainError>(())
        })
    })
    .await
}

#[tokio::test]
async fn notifications_page_newest_first() -> Result<(), DomainError> {
    let state = test_state().await;

    with_txn(&state.db, move |txn| {
        Box::pin(async move {
            let romance = RomanceStateMachine::default();
            let player = Uuid::new_v4();
            let now = OffsetDateTime::now_utc();
            factory::seed_romance_notification(txn, player, "old", "{}", now - Duration::hours(2))
                .await?;
            let newest = factory::seed_romance_notification(
                txn,
                player,
                "new",
                "{\"from\": \"someone\"}",
                now,
            )
            .await?;
            let an_hour_ago = now - Duration::hours(1);
            factory::seed_romance_notification(txn, player, "broken", "{{", an_hour_ago).await?;

            let page = romance
                .notifications(txn, player, PageRequest::new(2, 0))
                .await?;
            assert_eq!(page.total, 3);
            assert_eq!(page.items[0].id, newest);
            assert_eq!(page.items[0].metadata.get("from"), Some(&json!("someone")));
            assert_eq!(page.items[1].message, "broken");
            assert!(page.items[1].metadata.is_empty());
            Ok::<_, DomainError>(())
        })
    })
    .await
}

#[tokio::test]
async fn catalogue_and_compatibility() -> Result<(), DomainError> {
    let romance = RomanceStateMachine::default();
    assert_eq!(
        romance.romance_types(),
        vec![
            RomanceType::PlayerPlayer,
            RomanceType::PlayerNpc,
            RomanceType::PlayerDigitalAvatar
        ]
    );

    let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
    let score = romance.compatibility(a, b).await?;
    assert_eq!(score, romance.compatibility(a, b).await?);
    assert!((0..=100).contains(&score.compatibility_score));
    assert!((0..=100).contains(&score.chemistry_score));
    assert!(!score.factors.is_empty());
    Ok(())
}
