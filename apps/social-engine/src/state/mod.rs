pub mod engine_state;
