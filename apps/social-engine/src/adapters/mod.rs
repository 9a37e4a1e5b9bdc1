//! SeaORM adapters. Functions here return `sea_orm::DbErr`; the repos layer
//! converts to `DomainError`.

pub mod alliances_sea;
pub mod notifications_sea;
pub mod relationships_sea;
pub mod reputation_sea;
pub mod romance_sea;
pub mod trust_sea;
