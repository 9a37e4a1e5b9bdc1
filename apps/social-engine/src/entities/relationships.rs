use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
#[serde(rename_all = "snake_case")]
pub enum RelationshipType {
    #[sea_orm(string_value = "friend")]
    Friend,
    #[sea_orm(string_value = "rival")]
    Rival,
    #[sea_orm(string_value = "blocked")]
    Blocked,
    #[sea_orm(string_value = "ally")]
    Ally,
    #[sea_orm(string_value = "acquaintance")]
    Acquaintance,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "relationships")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(column_name = "player_id")]
    pub player_id: Uuid,
    #[sea_orm(column_name = "target_id")]
    pub target_id: Uuid,
    #[sea_orm(column_name = "relationship_type")]
    pub relationship_type: RelationshipType,
    #[sea_orm(column_name = "created_at")]
    pub created_at: OffsetDateTime,
    #[sea_orm(column_name = "updated_at")]
    pub updated_at: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
