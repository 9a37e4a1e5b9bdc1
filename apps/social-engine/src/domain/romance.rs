//! Romance lifecycle vocabulary and transition rules.
//!
//! The lifecycle position is not stored as one column; it is encoded jointly
//! by consent status, the active/romantic flags and the stage string.
//! `accept` is guarded (PendingConsent or Dating only). `reject` and
//! `breakup` are caller-trusted and fire from any state once the caller is
//! known to be a participant.

use crate::entities::romance_relationships::ConsentStatus;

pub const STAGE_STRANGER: &str = "stranger";
pub const STAGE_DATING: &str = "dating";

pub const INITIAL_SCORE: i32 = 0;
pub const INITIAL_HEALTH: i32 = 100;

/// Metadata key holding the message sent with the initial request.
pub const INITIATION_MESSAGE_KEY: &str = "initiation_message";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RomancePhase {
    PendingConsent,
    Dating,
    /// Terminal.
    Rejected,
    /// Terminal.
    Ended,
}

impl RomancePhase {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Rejected | Self::Ended)
    }
}

/// The persisted fields that jointly encode a romance's lifecycle position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RomanceStatus {
    pub consent_status: ConsentStatus,
    pub is_active: bool,
    pub is_romantic: bool,
    pub relationship_stage: String,
}

impl RomanceStatus {
    /// Fresh request awaiting the target's consent.
    pub fn pending() -> Self {
        Self {
            consent_status: ConsentStatus::Pending,
            is_active: true,
            is_romantic: false,
            relationship_stage: STAGE_STRANGER.to_string(),
        }
    }

    pub fn phase(&self) -> RomancePhase {
        match self.consent_status {
            ConsentStatus::Pending => RomancePhase::PendingConsent,
            ConsentStatus::Accepted => RomancePhase::Dating,
            ConsentStatus::Rejected => RomancePhase::Rejected,
            ConsentStatus::Revoked => RomancePhase::Ended,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RomanceTransition {
    Accept,
    Reject,
    Breakup,
}

impl RomanceTransition {
    /// Status after the transition, or `None` when it is not allowed from
    /// `current`.
    pub fn apply(self, current: &RomanceStatus) -> Option<RomanceStatus> {
        match self {
            // Accepting an already-dating romance re-applies the same fields.
            Self::Accept => match current.phase() {
                RomancePhase::PendingConsent | RomancePhase::Dating => Some(RomanceStatus {
                    consent_status: ConsentStatus::Accepted,
                    is_active: current.is_active,
                    is_romantic: true,
                    relationship_stage: STAGE_DATING.to_string(),
                }),
                RomancePhase::Rejected | RomancePhase::Ended => None,
            },
            Self::Reject => Some(RomanceStatus {
                consent_status: ConsentStatus::Rejected,
                is_active: false,
                ..current.clone()
            }),
            Self::Breakup => Some(RomanceStatus {
                consent_status: ConsentStatus::Revoked,
                is_active: false,
                is_romantic: false,
                relationship_stage: STAGE_STRANGER.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dating() -> RomanceStatus {
        RomanceTransition::Accept
            .apply(&RomanceStatus::pending())
            .expect("accept from pending")
    }

    #[test]
    fn accept_moves_pending_to_dating() {
        let status = dating();
        assert_eq!(status.phase(), RomancePhase::Dating);
        assert!(status.is_active);
        assert!(status.is_romantic);
        assert_eq!(status.relationship_stage, STAGE_DATING);
    }

    #[test]
    fn accept_on_dating_is_allowed() {
        assert_eq!(RomanceTransition::Accept.apply(&dating()), Some(dating()));
    }

    #[test]
    fn accept_from_terminal_is_refused() {
        let rejected = RomanceTransition::Reject
            .apply(&RomanceStatus::pending())
            .expect("reject");
        let ended = RomanceTransition::Breakup.apply(&dating()).expect("breakup");
        assert!(rejected.phase().is_terminal());
        assert!(ended.phase().is_terminal());
        assert_eq!(RomanceTransition::Accept.apply(&rejected), None);
        assert_eq!(RomanceTransition::Accept.apply(&ended), None);
    }

    #[test]
    fn reject_is_idempotent() {
        let once = RomanceTransition::Reject
            .apply(&RomanceStatus::pending())
            .expect("reject");
        let twice = RomanceTransition::Reject.apply(&once).expect("reject again");
        assert_eq!(once, twice);
        assert!(!twice.is_active);
    }

    #[test]
    fn breakup_resets_to_stranger() {
        let ended = RomanceTransition::Breakup.apply(&dating()).expect("breakup");
        assert_eq!(ended.consent_status, ConsentStatus::Revoked);
        assert!(!ended.is_active);
        assert!(!ended.is_romantic);
        assert_eq!(ended.relationship_stage, STAGE_STRANGER);
    }

    #[test]
    fn breakup_is_not_guarded_by_source_state() {
        let ended = RomanceTransition::Breakup
            .apply(&RomanceStatus::pending())
            .expect("breakup from pending");
        assert_eq!(ended.phase(), RomancePhase::Ended);
    }
}
