pub mod alliance_invitations;
pub mod alliance_members;
pub mod alliances;
pub mod arbitration_cases;
pub mod interaction_history;
pub mod notification_preferences;
pub mod player_ratings;
pub mod relationships;
pub mod romance_notifications;
pub mod romance_privacy_settings;
pub mod romance_relationships;
pub mod social_capital;
pub mod trust_contracts;
pub mod trust_levels;

pub use alliances::Entity as Alliances;
pub use alliances::Model as Alliance;
pub use relationships::Entity as Relationships;
pub use relationships::Model as Relationship;
pub use romance_relationships::Entity as RomanceRelationships;
pub use romance_relationships::Model as RomanceRelationship;
pub use trust_levels::Entity as TrustLevels;
pub use trust_levels::Model as TrustLevel;
