//! Clamping and accumulation rules for bounded scores.
//!
//! Trust and romance scores both live in `[SCORE_MIN, SCORE_MAX]`. These are
//! the only two primitives; every score mutation goes through them.

use crate::errors::domain::{DomainError, ValidationKind};

pub const SCORE_MIN: i32 = 0;
pub const SCORE_MAX: i32 = 100;
/// Level a trust pair starts at before its first delta is applied.
pub const TRUST_SEED_LEVEL: i32 = 50;
pub const MAX_TRUST_DELTA: i32 = 100;

/// Clamp `value` into `[lo, hi]`. Values equal to a bound return that bound.
pub fn clamp(value: i32, lo: i32, hi: i32) -> i32 {
    if value < lo {
        lo
    } else if value > hi {
        hi
    } else {
        value
    }
}

pub fn clamp_score(value: i32) -> i32 {
    clamp(value, SCORE_MIN, SCORE_MAX)
}

/// `old + |delta|`, independent of whether the level saturated.
pub fn accumulate_experience(old: i64, delta: i32) -> i64 {
    old.saturating_add(i64::from(delta.unsigned_abs()))
}

pub fn validate_trust_delta(delta: i32) -> Result<(), DomainError> {
    if !(-MAX_TRUST_DELTA..=MAX_TRUST_DELTA).contains(&delta) {
        return Err(DomainError::validation(
            ValidationKind::TrustDeltaOutOfRange,
            format!(
                "trust delta must be within [-{MAX_TRUST_DELTA}, {MAX_TRUST_DELTA}], got {delta}"
            ),
        ));
    }
    Ok(())
}

/// New `(level, experience)` after applying `delta` to the live values.
pub fn apply_trust_delta(level: i32, experience: i64, delta: i32) -> (i32, i64) {
    (
        clamp_score(level.saturating_add(delta)),
        accumulate_experience(experience, delta),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_ties_resolve_to_bound() {
        assert_eq!(clamp(0, 0, 100), 0);
        assert_eq!(clamp(100, 0, 100), 100);
        assert_eq!(clamp(-5, 0, 100), 0);
        assert_eq!(clamp(250, 0, 100), 100);
        assert_eq!(clamp(42, 0, 100), 42);
    }

    #[test]
    fn experience_grows_when_level_saturates() {
        let (level, exp) = apply_trust_delta(100, 7, 30);
        assert_eq!(level, 100);
        assert_eq!(exp, 37);
    }

    #[test]
    fn negative_delta_counts_as_experience() {
        assert_eq!(accumulate_experience(0, -40), 40);
    }

    #[test]
    fn delta_bounds() {
        assert!(validate_trust_delta(100).is_ok());
        assert!(validate_trust_delta(-100).is_ok());
        assert!(validate_trust_delta(150).is_err());
        assert!(validate_trust_delta(-101).is_err());
        assert!(validate_trust_delta(i32::MIN).is_err());
    }
}
