//! Pure, store-free rules shared by the services.

pub mod compatibility;
pub mod pagination;
pub mod pairs;
pub mod romance;
pub mod score_bounds;

#[cfg(test)]
mod tests_props_pairs;
#[cfg(test)]
mod tests_props_trust;

pub use compatibility::{BaselineScorer, Compatibility, CompatibilityScorer};
pub use pagination::{Page, PageRequest};
pub use pairs::CanonicalPair;
pub use romance::{RomanceStatus, RomanceTransition};
pub use score_bounds::{accumulate_experience, apply_trust_delta, clamp, clamp_score};
