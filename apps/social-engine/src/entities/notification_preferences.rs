use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "notification_preferences")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub player_id: Uuid,
    #[sea_orm(column_name = "romance_updates")]
    pub romance_updates: bool,
    #[sea_orm(column_name = "alliance_updates")]
    pub alliance_updates: bool,
    #[sea_orm(column_name = "trust_updates")]
    pub trust_updates: bool,
    #[sea_orm(column_name = "rating_updates")]
    pub rating_updates: bool,
    #[sea_orm(column_name = "updated_at")]
    pub updated_at: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
