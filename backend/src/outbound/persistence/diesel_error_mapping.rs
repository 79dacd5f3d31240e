//! Shared Diesel error mapping for the SQLite repositories.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use super::pool::PoolError;

/// Map pool errors into a repository-specific connection error constructor.
pub(crate) fn map_basic_pool_error<E, C>(error: PoolError, connection: C) -> E
where
    C: FnOnce(String) -> E,
{
    let message = match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    };
    connection(message)
}

/// Map common Diesel failures into query/connection constructors.
///
/// SQLite reports lock contention that outlived the busy timeout as an
/// unknown database error with a `database is locked` message; it is treated
/// as a connection failure so callers surface it as unavailability.
pub(crate) fn map_basic_diesel_error<E, Q, C>(error: DieselError, query: Q, connection: C) -> E
where
    Q: Fn(&'static str) -> E,
    C: Fn(&'static str) -> E,
{
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(%error, "diesel operation failed"),
    }

    match error {
        DieselError::NotFound => query("record not found"),
        DieselError::QueryBuilderError(_) => query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            connection("database connection error")
        }
        DieselError::DatabaseError(_, info) if is_lock_timeout(info.message()) => {
            connection("database is locked")
        }
        DieselError::DeserializationError(_) => query("could not decode row"),
        _ => query("database error"),
    }
}

fn is_lock_timeout(message: &str) -> bool {
    message.contains("database is locked") || message.contains("database is busy")
}

/// Whether `error` is a violation of a unique index.
pub(crate) fn is_unique_violation(error: &DieselError) -> bool {
    matches!(
        error,
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)
    )
}

/// Error type for transaction bodies that can reject an operation for a
/// business reason as well as fail in Diesel.
#[derive(Debug)]
pub(crate) enum TxError<E> {
    Diesel(DieselError),
    Rejected(E),
}

impl<E> From<DieselError> for TxError<E> {
    fn from(error: DieselError) -> Self {
        Self::Diesel(error)
    }
}

impl<E> TxError<E> {
    /// Collapse into the repository error, mapping Diesel failures with
    /// `map_diesel`.
    pub(crate) fn into_repository_error(self, map_diesel: impl FnOnce(DieselError) -> E) -> E {
        match self {
            Self::Diesel(error) => map_diesel(error),
            Self::Rejected(error) => error,
        }
    }
}
