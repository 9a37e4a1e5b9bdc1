//! DTOs for alliances_sea adapter.

use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct AllianceCreate {
    pub leader_id: Uuid,
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone)]
pub struct InvitationCreate {
    pub alliance_id: Uuid,
    pub inviter_id: Uuid,
    pub player_id: Uuid,
}
