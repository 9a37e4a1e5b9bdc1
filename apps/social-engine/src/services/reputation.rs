use sea_orm::{ConnectionTrait, DatabaseTransaction};
use tracing::info;
use uuid::Uuid;

use crate::config::engine::EngineConfig;
use crate::domain::pagination::{Page, PageRequest};
use crate::errors::domain::{DomainError, ValidationKind};
use crate::repos::reputation::{
    self, ArbitrationCase, Interaction, PlayerRating, RatingSummary, SocialCapital,
};

pub const RATING_MIN: i32 = 1;
pub const RATING_MAX: i32 = 5;

/// A page of ratings with the mean of that page.
#[derive(Debug, Clone, PartialEq)]
pub struct RatingsPage {
    pub page: Page<PlayerRating>,
    /// Mean over `page.items` only; `None` for an empty page. See
    /// [`ReputationAggregator::rating_summary`] for the population mean.
    pub page_average: Option<f64>,
}

/// Ratings, social capital, interaction history and arbitration.
pub struct ReputationAggregator {
    config: EngineConfig,
}

impl ReputationAggregator {
    pub fn new(config: &EngineConfig) -> Self {
        Self { config: *config }
    }

    pub async fn list_ratings<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        player_id: Uuid,
        page: PageRequest,
    ) -> Result<RatingsPage, DomainError> {
        let page = reputation::list_ratings(conn, player_id, page.normalize(&self.config)).await?;
        let average = page_average(&page.items);
        Ok(RatingsPage {
            page,
            page_average: average,
        })
    }

    /// One live rating per (rater, target); re-rating replaces it.
    pub async fn rate(
        &self,
        txn: &DatabaseTransaction,
        rater_id: Uuid,
        target_id: Uuid,
        rating: i32,
        comment: &str,
    ) -> Result<PlayerRating, DomainError> {
        if !(RATING_MIN..=RATING_MAX).contains(&rating) {
            return Err(DomainError::validation(
                ValidationKind::RatingOutOfRange,
                format!("rating must be between {RATING_MIN} and {RATING_MAX}, got {rating}"),
            ));
        }

        let stored = reputation::upsert_rating(txn, target_id, rater_id, rating, comment).await?;
        info!(rater_id = %rater_id, target_id = %target_id, rating, "player rated");
        Ok(stored)
    }

    /// Count and mean over every rating the player has received.
    pub async fn rating_summary<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        player_id: Uuid,
    ) -> Result<RatingSummary, DomainError> {
        reputation::rating_summary(conn, player_id).await
    }

    pub async fn social_capital<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        player_id: Uuid,
    ) -> Result<Option<SocialCapital>, DomainError> {
        reputation::find_social_capital(conn, player_id).await
    }

    pub async fn interaction_history<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        player_id: Uuid,
        page: PageRequest,
    ) -> Result<Page<Interaction>, DomainError> {
        reputation::list_interactions(conn, player_id, page.normalize(&self.config)).await
    }

    pub async fn request_arbitration(
        &self,
        txn: &DatabaseTransaction,
        requester_id: Uuid,
        target_id: Uuid,
        issue: &str,
    ) -> Result<ArbitrationCase, DomainError> {
        if issue.trim().is_empty() {
            return Err(DomainError::validation(
                ValidationKind::EmptyArbitrationIssue,
                "arbitration issue must not be empty",
            ));
        }

        let case = reputation::create_case(txn, requester_id, target_id, issue).await?;
        info!(
            case_id = %case.id,
            requester_id = %requester_id,
            target_id = %target_id,
            "arbitration requested"
        );
        Ok(case)
    }

    pub async fn get_arbitration_case<C: ConnectionTrait + Send + Sync>(
        &self,
        conn: &C,
        case_id: Uuid,
    ) -> Result<Option<ArbitrationCase>, DomainError> {
        reputation::find_case(conn, case_id).await
    }
}

impl Default for ReputationAggregator {
    fn default() -> Self {
        Self::new(&EngineConfig::default())
    }
}

fn page_average(ratings: &[PlayerRating]) -> Option<f64> {
    if ratings.is_empty() {
        return None;
    }
    let sum: i64 = ratings.iter().map(|r| i64::from(r.rating)).sum();
    Some(sum as f64 / ratings.len() as f64)
}

#[cfg(test)]
mod tests {
    use time::OffsetDateTime;

    use super::*;

    fn rating(value: i32) -> PlayerRating {
        PlayerRating {
            player_id: Uuid::nil(),
            rater_id: Uuid::new_v4(),
            rating: value,
            comment: String::new(),
            updated_at: OffsetDateTime::UNIX_EPOCH,
        }
    }

    #[test]
    fn empty_page_has_no_average() {
        assert_eq!(page_average(&[]), None);
    }

    #[test]
    fn average_covers_only_given_items() {
        let avg = page_average(&[rating(5), rating(2)]).expect("average");
        assert!((avg - 3.5).abs() < f64::EPSILON);
    }
}
