//! Rollback discipline shared by the transactional use cases.

use tracing::{error, warn};

use crate::domain::shared::StoreError;
use crate::infrastructure::persistence::UnitOfWork;

/// Roll back after `cause` failed a statement inside `operation`.
///
/// A failing rollback is logged and swallowed so the caller still sees the
/// original error.
pub(crate) async fn abort(uow: UnitOfWork, operation: &'static str, cause: &StoreError) {
    match uow.rollback().await {
        Ok(()) => warn!(operation, error = %cause, "Transaction rolled back"),
        Err(rollback_err) => error!(
            operation,
            error = %cause,
            rollback_error = %rollback_err,
            "Transaction rollback failed"
        ),
    }
}

/// Roll back a unit that found nothing to do.
pub(crate) async fn discard(uow: UnitOfWork, operation: &'static str) -> Result<(), StoreError> {
    uow.rollback().await?;
    warn!(operation, "Transaction rolled back, target not found");
    Ok(())
}
