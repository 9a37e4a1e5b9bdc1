use std::future::Future;
use std::pin::Pin;

use sea_orm::{DatabaseConnection, DatabaseTransaction, TransactionTrait};
use tracing::warn;

use super::txn_policy;
use crate::errors::domain::DomainError;

/// Boxed future borrowed from the transaction handed to a `with_txn` closure.
pub type TxnFuture<'c, R> = Pin<Box<dyn Future<Output = Result<R, DomainError>> + Send + 'c>>;

/// Execute a function within a database transaction.
///
/// Begins a transaction, runs the closure, then applies the process
/// transaction policy on `Ok` and rolls back on `Err`. Callers write
/// `with_txn(&db, |txn| Box::pin(async move { ... }))`.
pub async fn with_txn<R, F>(db: &DatabaseConnection, f: F) -> Result<R, DomainError>
where
    F: for<'c> FnOnce(&'c DatabaseTransaction) -> TxnFuture<'c, R> + Send,
    R: Send,
{
    let txn = db.begin().await?;
    let out = f(&txn).await;

    match out {
        Ok(val) => match txn_policy::current() {
            txn_policy::TxnPolicy::CommitOnOk => {
                txn.commit().await?;
                Ok(val)
            }
            txn_policy::TxnPolicy::RollbackOnOk => {
                txn.rollback().await?;
                Ok(val)
            }
        },
        Err(err) => {
            // Best-effort rollback; the operation error is what the caller sees
            if let Err(rollback_err) = txn.rollback().await {
                warn!(error = %rollback_err, "rollback after failed operation also failed");
            }
            Err(err)
        }
    }
}
