//! DTOs for relationships_sea adapter.

use uuid::Uuid;

use crate::entities::relationships::RelationshipType;

/// DTO for inserting or replacing the relationship of an ordered pair.
#[derive(Debug, Clone)]
pub struct RelationshipUpsert {
    pub player_id: Uuid,
    pub target_id: Uuid,
    pub relationship_type: RelationshipType,
}
