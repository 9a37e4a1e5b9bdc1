//! DTOs for notifications_sea adapter.

/// Partial update; `None` leaves the stored flag unchanged.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PreferencesUpdate {
    pub romance_updates: Option<bool>,
    pub alliance_updates: Option<bool>,
    pub trust_updates: Option<bool>,
    pub rating_updates: Option<bool>,
}
