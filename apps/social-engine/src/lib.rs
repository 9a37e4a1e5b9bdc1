#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod adapters;
pub mod config;
pub mod db;
pub mod domain;
pub mod entities;
pub mod errors;
pub mod infra;
pub mod repos;
pub mod services;
pub mod state;
pub mod telemetry;

// Re-exports for public API
pub use config::engine::EngineConfig;
pub use db::txn::with_txn;
pub use domain::pagination::{Page, PageRequest};
pub use errors::domain::{ConflictKind, DomainError, InfraErrorKind, NotFoundKind, ValidationKind};
pub use infra::state::{build_state, StateBuilder};
pub use services::alliances::AllianceRegistry;
pub use services::notifications::NotificationCenter;
pub use services::relationships::RelationshipGraph;
pub use services::reputation::ReputationAggregator;
pub use services::romance::RomanceStateMachine;
pub use services::trust::TrustLedger;
pub use state::engine_state::EngineState;

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    engine_test_support::test_logging::init();
}
