use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
#[serde(rename_all = "snake_case")]
pub enum RomanceType {
    #[sea_orm(string_value = "player_player")]
    PlayerPlayer,
    #[sea_orm(string_value = "player_npc")]
    PlayerNpc,
    #[sea_orm(string_value = "player_digital_avatar")]
    PlayerDigitalAvatar,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
#[serde(rename_all = "snake_case")]
pub enum ConsentStatus {
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "accepted")]
    Accepted,
    #[sea_orm(string_value = "rejected")]
    Rejected,
    #[sea_orm(string_value = "revoked")]
    Revoked,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "romance_relationships")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(column_name = "romance_type")]
    pub romance_type: RomanceType,
    /// Initiator.
    #[sea_orm(column_name = "player_id")]
    pub player_id: Uuid,
    #[sea_orm(column_name = "target_id")]
    pub target_id: Uuid,
    #[sea_orm(column_name = "pair_low")]
    pub pair_low: Uuid,
    #[sea_orm(column_name = "pair_high")]
    pub pair_high: Uuid,
    /// `"{type}:{low}:{high}"` while active, NULL otherwise; unique.
    #[sea_orm(column_name = "active_pair_key")]
    pub active_pair_key: Option<String>,
    pub relationship_score: i32,
    pub chemistry_score: i32,
    pub trust_score: i32,
    pub physical_intimacy: i32,
    pub emotional_intimacy: i32,
    pub relationship_stage: String,
    pub is_active: bool,
    pub is_romantic: bool,
    pub is_public: bool,
    pub consent_status: ConsentStatus,
    pub relationship_health: i32,
    /// JSON array of strings.
    #[sea_orm(column_type = "Text")]
    pub flags: String,
    /// JSON object.
    #[sea_orm(column_type = "Text")]
    pub metadata: String,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
