//! DTOs for reputation_sea adapter.

use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct RatingUpsert {
    /// The rated player.
    pub player_id: Uuid,
    pub rater_id: Uuid,
    pub rating: i32,
    pub comment: String,
}

#[derive(Debug, Clone)]
pub struct CaseCreate {
    pub requester_id: Uuid,
    pub target_id: Uuid,
    pub issue: String,
}
