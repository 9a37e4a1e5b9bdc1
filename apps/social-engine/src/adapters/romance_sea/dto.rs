//! DTOs for romance_sea adapter.

use uuid::Uuid;

use crate::domain::pairs::CanonicalPair;
use crate::domain::romance::RomanceStatus;
use crate::entities::romance_relationships::RomanceType;

/// DTO for a new romance row. Scores and health come from the caller so the
/// starting values live in one place.
#[derive(Debug, Clone)]
pub struct RomanceCreate {
    pub romance_type: RomanceType,
    pub player_id: Uuid,
    pub target_id: Uuid,
    pub pair: CanonicalPair,
    pub initial_score: i32,
    pub initial_health: i32,
    pub status: RomanceStatus,
    pub is_public: bool,
    /// Serialized JSON array.
    pub flags: String,
    /// Serialized JSON object.
    pub metadata: String,
}

#[derive(Debug, Clone)]
pub struct PrivacyUpsert {
    pub player_id: Uuid,
    pub romance_type: String,
    pub show_relationship_status: bool,
    pub show_romance_events: bool,
    pub allow_romance_requests: bool,
}
