//! DTOs for trust_sea adapter.

use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct ContractCreate {
    pub player_id: Uuid,
    pub target_id: Uuid,
    /// Already-serialized JSON document.
    pub terms: String,
    pub expires_at: Option<OffsetDateTime>,
}
