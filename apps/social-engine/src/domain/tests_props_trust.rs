//! Property tests for trust sequencing over the score primitives.

use proptest::prelude::*;

use super::score_bounds::{
    apply_trust_delta, clamp, validate_trust_delta, MAX_TRUST_DELTA, SCORE_MAX, SCORE_MIN,
    TRUST_SEED_LEVEL,
};

fn delta() -> impl Strategy<Value = i32> {
    -MAX_TRUST_DELTA..=MAX_TRUST_DELTA
}

proptest! {
    #[test]
    fn two_deltas_from_seed(d1 in delta(), d2 in delta()) {
        let (l1, e1) = apply_trust_delta(TRUST_SEED_LEVEL, 0, d1);
        let (l2, e2) = apply_trust_delta(l1, e1, d2);

        prop_assert_eq!(l2, clamp(clamp(TRUST_SEED_LEVEL + d1, 0, 100) + d2, 0, 100));
        prop_assert_eq!(e2, i64::from(d1.abs()) + i64::from(d2.abs()));
    }

    #[test]
    fn level_stays_in_bounds(deltas in prop::collection::vec(delta(), 0..40)) {
        let mut level = TRUST_SEED_LEVEL;
        let mut exp = 0i64;
        for d in deltas {
            let before = exp;
            (level, exp) = apply_trust_delta(level, exp, d);
            prop_assert!((SCORE_MIN..=SCORE_MAX).contains(&level));
            prop_assert!(exp >= before);
        }
    }

    #[test]
    fn out_of_range_deltas_rejected(
        d in prop_oneof![i32::MIN..-MAX_TRUST_DELTA, (MAX_TRUST_DELTA + 1)..=i32::MAX]
    ) {
        prop_assert!(validate_trust_delta(d).is_err());
    }
}
