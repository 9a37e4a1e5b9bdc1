//! Romance compatibility scoring contract.
//!
//! The weighting function belongs to whoever owns player profiles; the
//! engine only fixes the shape of the answer and its bounds.

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::Serialize;
use uuid::Uuid;

use super::score_bounds::clamp_score;
use crate::errors::domain::DomainError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Compatibility {
    pub compatibility_score: i32,
    pub chemistry_score: i32,
    pub factors: BTreeMap<String, i32>,
}

impl Compatibility {
    /// Every score, including each factor, is clamped into `[0, 100]`.
    pub fn new(
        compatibility_score: i32,
        chemistry_score: i32,
        factors: impl IntoIterator<Item = (String, i32)>,
    ) -> Self {
        Self {
            compatibility_score: clamp_score(compatibility_score),
            chemistry_score: clamp_score(chemistry_score),
            factors: factors
                .into_iter()
                .map(|(name, value)| (name, clamp_score(value)))
                .collect(),
        }
    }
}

#[async_trait]
pub trait CompatibilityScorer: Send + Sync {
    async fn score(&self, player_id: Uuid, target_id: Uuid) -> Result<Compatibility, DomainError>;
}

/// Fixed baseline used when no profile-aware scorer is plugged in.
#[derive(Debug, Default, Clone, Copy)]
pub struct BaselineScorer;

#[async_trait]
impl CompatibilityScorer for BaselineScorer {
    async fn score(
        &self,
        _player_id: Uuid,
        _target_id: Uuid,
    ) -> Result<Compatibility, DomainError> {
        Ok(Compatibility::new(
            75,
            70,
            [
                ("personality_match".to_string(), 80),
                ("interests_match".to_string(), 70),
                ("values_match".to_string(), 75),
            ],
        ))
    }
}
