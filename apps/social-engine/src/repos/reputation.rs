//! Reputation repository: ratings, social capital, interaction history and
//! arbitration cases.

use sea_orm::{ConnectionTrait, DatabaseTransaction};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::adapters::reputation_sea as reputation_adapter;
use crate::domain::pagination::{Page, PageRequest};
use crate::entities::arbitration_cases::{self, CaseStatus};
use crate::entities::{interaction_history, player_ratings, social_capital};
use crate::errors::domain::DomainError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerRating {
    pub player_id: Uuid,
    pub rater_id: Uuid,
    pub rating: i32,
    pub comment: String,
    pub updated_at: OffsetDateTime,
}

/// Aggregate over every rating a player has received.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatingSummary {
    pub player_id: Uuid,
    pub count: u64,
    /// `None` when the player has no ratings.
    pub average: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SocialCapital {
    pub player_id: Uuid,
    pub capital_score: f64,
    pub positive_actions: i64,
    pub negative_actions: i64,
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interaction {
    pub id: Uuid,
    pub player_id: Uuid,
    pub target_id: Uuid,
    pub interaction_type: String,
    pub description: String,
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArbitrationCase {
    pub id: Uuid,
    pub requester_id: Uuid,
    pub target_id: Uuid,
    pub issue: String,
    pub status: CaseStatus,
    pub created_at: OffsetDateTime,
    pub resolved_at: Option<OffsetDateTime>,
}

pub async fn upsert_rating(
    txn: &DatabaseTransaction,
    player_id: Uuid,
    rater_id: Uuid,
    rating: i32,
    comment: &str,
) -> Result<PlayerRating, DomainError> {
    let dto = reputation_adapter::RatingUpsert {
        player_id,
        rater_id,
        rating,
        comment: comment.to_string(),
    };
    let row = reputation_adapter::upsert_rating(txn, dto).await?;
    Ok(PlayerRating::from(row))
}

pub async fn list_ratings<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: Uuid,
    page: PageRequest,
) -> Result<Page<PlayerRating>, DomainError> {
    let (rows, total) =
        reputation_adapter::list_ratings(conn, player_id, page.limit, page.offset).await?;
    Ok(Page::new(rows, total, page).map(PlayerRating::from))
}

pub async fn rating_summary<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: Uuid,
) -> Result<RatingSummary, DomainError> {
    let (count, sum) = reputation_adapter::rating_totals(conn, player_id).await?;
    let count = u64::try_from(count).map_err(|_| {
        DomainError::corrupt_state(format!("negative rating count for player_id={player_id}"))
    })?;
    let average = (count > 0).then(|| sum as f64 / count as f64);
    Ok(RatingSummary {
        player_id,
        count,
        average,
    })
}

pub async fn find_social_capital<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: Uuid,
) -> Result<Option<SocialCapital>, DomainError> {
    let row = reputation_adapter::find_social_capital(conn, player_id).await?;
    Ok(row.map(SocialCapital::from))
}

pub async fn list_interactions<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: Uuid,
    page: PageRequest,
) -> Result<Page<Interaction>, DomainError> {
    let (rows, total) =
        reputation_adapter::list_interactions(conn, player_id, page.limit, page.offset).await?;
    Ok(Page::new(rows, total, page).map(Interaction::from))
}

pub async fn create_case(
    txn: &DatabaseTransaction,
    requester_id: Uuid,
    target_id: Uuid,
    issue: &str,
) -> Result<ArbitrationCase, DomainError> {
    let dto = reputation_adapter::CaseCreate {
        requester_id,
        target_id,
        issue: issue.to_string(),
    };
    let row = reputation_adapter::create_case(txn, dto).await?;
    Ok(ArbitrationCase::from(row))
}

pub async fn find_case<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    case_id: Uuid,
) -> Result<Option<ArbitrationCase>, DomainError> {
    let row = reputation_adapter::find_case(conn, case_id).await?;
    Ok(row.map(ArbitrationCase::from))
}

impl From<player_ratings::Model> for PlayerRating {
    fn from(model: player_ratings::Model) -> Self {
        Self {
            player_id: model.player_id,
            rater_id: model.rater_id,
            rating: model.rating,
            comment: model.comment,
            updated_at: model.updated_at,
        }
    }
}

impl From<social_capital::Model> for SocialCapital {
    fn from(model: social_capital::Model) -> Self {
        Self {
            player_id: model.player_id,
            capital_score: model.capital_score,
            positive_actions: model.positive_actions,
            negative_actions: model.negative_actions,
            updated_at: model.updated_at,
        }
    }
}

impl From<interaction_history::Model> for Interaction {
    fn from(model: interaction_history::Model) -> Self {
        Self {
            id: model.id,
            player_id: model.player_id,
            target_id: model.target_id,
            interaction_type: model.interaction_type,
            description: model.description,
            created_at: model.created_at,
        }
    }
}

impl From<arbitration_cases::Model> for ArbitrationCase {
    fn from(model: arbitration_cases::Model) -> Self {
        Self {
            id: model.id,
            requester_id: model.requester_id,
            target_id: model.target_id,
            issue: model.issue,
            status: model.status,
            created_at: model.created_at,
            resolved_at: model.resolved_at,
        }
    }
}
