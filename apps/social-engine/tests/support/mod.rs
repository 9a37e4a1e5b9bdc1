#![allow(dead_code)]

pub mod factory;
pub mod test_state;

pub use test_state::test_state;
