//! Diesel and pool error mapping for the item repository.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use crate::domain::ports::ItemRepositoryError;

use super::pool::PoolError;

/// Pool failures mean the store is unreachable.
pub(crate) fn map_pool_error(error: PoolError) -> ItemRepositoryError {
    let message = match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    };
    ItemRepositoryError::connection(message)
}

/// Translate Diesel failures, keeping database detail out of the message.
pub(crate) fn map_diesel_error(error: DieselError) -> ItemRepositoryError {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        other => debug!(error = %other, "diesel operation failed"),
    }

    match error {
        DieselError::NotFound => ItemRepositoryError::query("record not found"),
        DieselError::DeserializationError(_) => {
            ItemRepositoryError::query("item row could not be decoded")
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            ItemRepositoryError::connection("database connection error")
        }
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            ItemRepositoryError::query("item id already exists")
        }
        DieselError::DatabaseError(DatabaseErrorKind::CheckViolation, _) => {
            ItemRepositoryError::query("item violates a table constraint")
        }
        DieselError::BrokenTransactionManager => {
            ItemRepositoryError::connection("transaction manager is broken")
        }
        _ => ItemRepositoryError::query("database error"),
    }
}
