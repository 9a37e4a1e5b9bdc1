//! Repository layer: domain models over the SeaORM adapters.

pub mod alliances;
pub mod notifications;
pub mod payload;
pub mod relationships;
pub mod reputation;
pub mod romance;
pub mod trust;
