//! Canonical ordering for unordered player pairs.

use uuid::Uuid;

/// An unordered pair stored low-id first, so `(a, b)` and `(b, a)` collapse
/// to the same value before any lookup or uniqueness check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CanonicalPair {
    low: Uuid,
    high: Uuid,
}

impl CanonicalPair {
    pub fn new(a: Uuid, b: Uuid) -> Self {
        if a <= b {
            Self { low: a, high: b }
        } else {
            Self { low: b, high: a }
        }
    }

    pub fn low(&self) -> Uuid {
        self.low
    }

    pub fn high(&self) -> Uuid {
        self.high
    }

    pub fn contains(&self, player_id: Uuid) -> bool {
        self.low == player_id || self.high == player_id
    }

    /// Key for the active-romance unique index, scoped by romance type.
    pub fn active_key(&self, romance_type: &str) -> String {
        format!("{romance_type}:{}:{}", self.low, self.high)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_player_twice_is_a_degenerate_pair() {
        let a = Uuid::new_v4();
        let pair = CanonicalPair::new(a, a);
        assert_eq!(pair.low(), pair.high());
        assert!(pair.contains(a));
    }

    #[test]
    fn key_embeds_type() {
        let pair = CanonicalPair::new(Uuid::nil(), Uuid::max());
        assert_eq!(
            pair.active_key("player_player"),
            format!("player_player:{}:{}", Uuid::nil(), Uuid::max())
        );
    }
}
