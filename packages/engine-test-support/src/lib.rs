//! Shared helpers for social-engine test binaries.

pub mod test_logging;
