//! Error handling for the social engine.

pub mod domain;

pub use domain::DomainError;
