//! Property tests for canonical pair ordering.

use proptest::prelude::*;
use uuid::Uuid;

use super::pairs::CanonicalPair;

fn player() -> impl Strategy<Value = Uuid> {
    any::<u128>().prop_map(Uuid::from_u128)
}

proptest! {
    #[test]
    fn ordering_is_symmetric(a in player(), b in player()) {
        prop_assert_eq!(CanonicalPair::new(a, b), CanonicalPair::new(b, a));
        prop_assert_eq!(
            CanonicalPair::new(a, b).active_key("player_player"),
            CanonicalPair::new(b, a).active_key("player_player")
        );
    }

    #[test]
    fn low_never_exceeds_high(a in player(), b in player()) {
        let pair = CanonicalPair::new(a, b);
        prop_assert!(pair.low() <= pair.high());
        prop_assert!(pair.contains(a) && pair.contains(b));
    }

    #[test]
    fn outsiders_are_not_members(a in player(), b in player(), c in player()) {
        prop_assume!(c != a && c != b);
        prop_assert!(!CanonicalPair::new(a, b).contains(c));
    }
}
