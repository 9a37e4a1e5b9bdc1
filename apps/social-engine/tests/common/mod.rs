#![allow(dead_code)]

use social_engine::db::txn_policy::{self, TxnPolicy};

// Logging is auto-installed for every test binary
#[ctor::ctor]
fn init_logging() {
    engine_test_support::test_logging::init();
}

// Policy defaults to rollback but can be flipped per run via `SOCIAL_TXN_POLICY=commit`.
#[ctor::ctor]
fn init_txn_policy() {
    let policy = TxnPolicy::from_env(TxnPolicy::RollbackOnOk).unwrap_or(TxnPolicy::RollbackOnOk);
    txn_policy::set_txn_policy(policy);
}
