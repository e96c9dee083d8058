//! Shared Diesel error mapping for the repository adapters.
//!
//! Every repository error enum has the same two-variant shape (connection,
//! query), so the mapping from pool and Diesel failures is written once and
//! parameterised over the constructors.

use tracing::debug;

use super::pool::PoolError;

/// Map pool errors into a repository-specific connection error constructor.
pub(super) fn map_pool_error<E, C>(error: PoolError, connection: C) -> E
where
    C: FnOnce(String) -> E,
{
    let message = match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    };
    connection(message)
}

/// Map common Diesel error variants into query/connection constructors.
///
/// Database error details are logged at debug level and never forwarded;
/// the domain only sees a stable category message.
pub(super) fn map_diesel_error<E, Q, C>(error: diesel::result::Error, query: Q, connection: C) -> E
where
    Q: Fn(&'static str) -> E,
    C: Fn(&'static str) -> E,
{
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => query("record not found"),
        DieselError::QueryBuilderError(_) => query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            connection("database connection error")
        }
        DieselError::DatabaseError(_, _) => query("database error"),
        _ => query("database error"),
    }
}

#[cfg(test)]
mod tests {
    use diesel::result::Error as DieselError;
    use rstest::rstest;

    use super::*;
    use crate::domain::ports::UserRepositoryError;

    fn query(message: &'static str) -> UserRepositoryError {
        UserRepositoryError::query(message)
    }

    fn connection(message: &'static str) -> UserRepositoryError {
        UserRepositoryError::connection(message)
    }

    #[rstest]
    fn pool_errors_map_to_connection() {
        let mapped: UserRepositoryError = map_pool_error(
            PoolError::checkout("pool exhausted"),
            UserRepositoryError::connection,
        );
        assert_eq!(mapped, UserRepositoryError::connection("pool exhausted"));
    }

    #[rstest]
    fn not_found_maps_to_query() {
        let mapped = map_diesel_error(DieselError::NotFound, query, connection);
        assert_eq!(mapped, UserRepositoryError::query("record not found"));
    }

    #[rstest]
    fn rollback_maps_to_generic_query_error() {
        let mapped = map_diesel_error(DieselError::RollbackTransaction, query, connection);
        assert_eq!(mapped, UserRepositoryError::query("database error"));
    }
}
