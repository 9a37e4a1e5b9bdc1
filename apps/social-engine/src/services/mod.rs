//! Engine services, one per component. Writes take the caller's
//! transaction; reads accept any connection.

pub mod alliances;
pub mod notifications;
pub mod relationships;
pub mod reputation;
pub mod romance;
pub mod trust;
