mod common;
mod support;

use social_engine::db::txn_policy::{self, TxnPolicy};
use social_engine::entities::relationships::RelationshipType;
use social_engine::{with_txn, DomainError, RelationshipGraph};
use support::test_state;
use uuid::Uuid;

#[tokio::test]
async fn successful_txn_follows_the_policy() -> Result<(), DomainError> {
    let state = test_state().await;
    let (player, target) = (Uuid::new_v4(), Uuid::new_v4());

    let written = with_txn(&state.db, move |txn| {
        Box::pin(async move {
            RelationshipGraph::default()
                .set(txn, player, target, RelationshipType::Ally)
                .await
        })
    })
    .await?;

    let after = RelationshipGraph::default()
        .get_between(&state.db, player, target)
        .await?;
    match txn_policy::current() {
        TxnPolicy::RollbackOnOk => assert!(after.is_none()),
        TxnPolicy::CommitOnOk => assert_eq!(after.map(|r| r.id), Some(written.id)),
    }
    Ok(())
}

#[tokio::test]
async fn failed_txn_rolls_back_earlier_writes() -> Result<(), DomainError> {
    let state = test_state().await;
    let (player, target) = (Uuid::new_v4(), Uuid::new_v4());

    let err = with_txn(&state.db, move |txn| {
        Box::pin(async move {
            let graph = RelationshipGraph::default();
            graph.set(txn, player, target, RelationshipType::Friend).await?;
            graph.set(txn, player, player, RelationshipType::Friend).await
        })
    })
    .await
    .expect_err("second write is invalid");
    assert!(err.is_validation());

    let after = RelationshipGraph::default()
        .get_between(&state.db, player, target)
        .await?;
    assert!(after.is_none());
    Ok(())
}
