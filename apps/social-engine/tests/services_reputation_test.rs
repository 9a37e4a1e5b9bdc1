mod common;
mod support;

use social_engine::entities::arbitration_cases::CaseStatus;
use social_engine::{with_txn, DomainError, PageRequest, ReputationAggregator, ValidationKind};
use support::{factory, test_state};
use uuid::Uuid;

#[tokio::test]
async fn rate_enforces_bounds() -> Result<(), DomainError> {
    let state = test_state().await;

    with_txn(&state.db, move |txn| {
        Box::pin(async move {
            let reputation = ReputationAggregator::default();
            let (rater, target) = (Uuid::new_v4(), Uuid::new_v4());

            for rating in [0, 6] {
                let err = reputation
                    .rate(txn, rater, target, rating, "")
                    .await
                    .expect_err("rating out of range");
                assert!(matches!(
                    err,
                    DomainError::Validation(ValidationKind::RatingOutOfRange, _)
                ));
            }
            let page = reputation.list_ratings(txn, target, PageRequest::default()).await?;
            assert_eq!(page.page.total, 0);
            assert_eq!(page.page_average, None);
            Ok::<_, DomainError>(())
        })
    })
    .await
}

#[tokio::test]
async fn re_rating_replaces_the_live_rating() -> Result<(), DomainError> {
    let state = test_state().await;

    with_txn(&state.db, move |txn| {
        Box::pin(async move {
            let reputation = ReputationAggregator::default();
            let (rater, target) = (Uuid::new_v4(), Uuid::new_v4());

            reputation.rate(txn, rater, target, 5, "great").await?;
            let replaced = reputation.rate(txn, rater, target, 3, "eh").await?;
            assert_eq!((replaced.rating, replaced.comment.as_str()), (3, "eh"));

            let page = reputation.list_ratings(txn, target, PageRequest::default()).await?;
            assert_eq!(page.page.total, 1);
            assert_eq!(page.page.items[0].rating, 3);
            assert_eq!(page.page.items[0].rater_id, rater);
            Ok::<_, DomainError>(())
        })
    })
    .await
}

#[tokio::test]
async fn page_average_differs_from_population_summary() -> Result<(), DomainError> {
    let state = test_state().await;

    with_txn(&state.db, move |txn| {
        Box::pin(async move {
            let reputation = ReputationAggregator::default();
            let target = Uuid::new_v4();
            for rating in [5, 4, 1] {
                reputation.rate(txn, Uuid::new_v4(), target, rating, "").await?;
            }

            let page = reputation.list_ratings(txn, target, PageRequest::new(2, 0)).await?;
            assert_eq!(page.page.len(), 2);
            assert_eq!(page.page.total, 3);
            let page_sum: i32 = page.page.items.iter().map(|r| r.rating).sum();
            let expected = f64::from(page_sum) / 2.0;
            assert_eq!(page.page_average, Some(expected));

            let summary = reputation.rating_summary(txn, target).await?;
            assert_eq!(summary.count, 3);
            let average = summary.average.expect("population average");
            assert!((average - 10.0 / 3.0).abs() < 1e-9);

            let empty = reputation.rating_summary(txn, Uuid::new_v4()).await?;
            assert_eq!((empty.count, empty.average), (0, None));
            Ok::<_, DomainError>(())
        })
    })
    .await
}

#[tokio::test]
async fn social_capital_is_a_passthrough() -> Result<(), DomainError> {
    let state = test_state().await;

    with_txn(&state.db, move |txn| {
        Box::pin(async move {
            let reputation = ReputationAggregator::default();
            let player = Uuid::new_v4();
            assert!(reputation.social_capital(txn, player).await?.is_none());

            factory::seed_social_capital(txn, player, 12.5).await?;
            let capital = reputation
                .social_capital(txn, player)
                .await?
                .expect("seeded capital");
            assert_eq!(capital.capital_score, 12.5);
            assert_eq!((capital.positive_actions, capital.negative_actions), (4, 1));
            Ok::<_, DomainError>(())
        })
    })
    .await
}

#[tokio::test]
async fn interaction_history_paginates() -> Result<(), DomainError> {
    let state = test_state().await;

    with_txn(&state.db, move |txn| {
        Box::pin(async move {
            let reputation = ReputationAggregator::default();
            let player = Uuid::new_v4();
            factory::seed_interactions(txn, player, 15).await?;

            let first = reputation
                .interaction_history(txn, player, PageRequest::new(10, 0))
                .await?;
            let second = reputation
                .interaction_history(txn, player, PageRequest::new(10, 10))
                .await?;
            assert_eq!((first.len(), first.total), (10, 15));
            assert_eq!((second.len(), second.total), (5, 15));
            assert_eq!(first.items[0].description, "interaction #14");
            assert_eq!(second.items[4].description, "interaction #0");
            Ok::<_, DomainError>(())
        })
    })
    .await
}

#[tokio::test]
async fn arbitration_needs_an_issue() -> Result<(), DomainError> {
    let state = test_state().await;

    with_txn(&state.db, move |txn| {
        Box::pin(async move {
            let reputation = ReputationAggregator::default();
            let (requester, target) = (Uuid::new_v4(), Uuid::new_v4());

            let err = reputation
                .request_arbitration(txn, requester, target, "  ")
                .await
                .expect_err("blank issue");
            assert!(matches!(
                err,
                DomainError::Validation(ValidationKind::EmptyArbitrationIssue, _)
            ));

            let case = reputation
                .request_arbitration(txn, requester, target, "stole my loot")
                .await?;
            assert_eq!(case.status, CaseStatus::Pending);
            assert!(case.resolved_at.is_none());

            let fetched = reputation
                .get_arbitration_case(txn, case.id)
                .await?
                .expect("case");
            assert_eq!(fetched, case);
            assert!(reputation
                .get_arbitration_case(txn, Uuid::new_v4())
                .await?
                .is_none());
            Ok::<_, DomainError>(())
        })
    })
    .await
}
