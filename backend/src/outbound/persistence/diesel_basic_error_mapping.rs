//! Shared Diesel error mapping and deadline handling for the repositories.

use std::future::Future;
use std::time::Duration;

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::{debug, warn};

use super::pool::PoolError;

/// Fold a pool error into a repository connection error.
pub(super) fn map_basic_pool_error<E, C>(error: PoolError, connection: C) -> E
where
    C: FnOnce(String) -> E,
{
    let message = match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    };
    connection(message)
}

/// Fold a Diesel error into query or connection constructors.
///
/// Details stay in the debug log; callers only see a coarse message.
pub(super) fn map_basic_diesel_error<E, Q, C>(error: DieselError, query: Q, connection: C) -> E
where
    Q: Fn(&'static str) -> E,
    C: Fn(&'static str) -> E,
{
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        other => debug!(error = %other, "diesel operation failed"),
    }

    match error {
        DieselError::NotFound => query("record not found"),
        DieselError::QueryBuilderError(_) => query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            connection("database connection error")
        }
        _ => query("database error"),
    }
}

/// Whether `error` is a unique violation of the named constraint.
pub(super) fn is_unique_violation(error: &DieselError, constraint: &str) -> bool {
    matches!(
        error,
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info)
            if info.constraint_name() == Some(constraint)
    )
}

/// Run `operation` under `deadline`, mapping expiry with `on_timeout`.
pub(super) async fn with_deadline<T, E, Fut, Tm>(
    deadline: Duration,
    operation: &'static str,
    fut: Fut,
    on_timeout: Tm,
) -> Result<T, E>
where
    Fut: Future<Output = Result<T, E>>,
    Tm: FnOnce(&'static str) -> E,
{
    if let Ok(result) = tokio::time::timeout(deadline, fut).await {
        result
    } else {
        warn!(
            operation,
            deadline_ms = u64::try_from(deadline.as_millis()).unwrap_or(u64::MAX),
            "store operation timed out"
        );
        Err(on_timeout(operation))
    }
}
