//! Mapping sqlx failures into application errors.

use gatekeep_core::error::{AppError, ErrorKind};

/// PostgreSQL SQLSTATE for `unique_violation`.
const UNIQUE_VIOLATION: &str = "23505";

/// Whether `err` is a unique-constraint violation.
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err
            .code()
            .is_some_and(|code| code.as_ref() == UNIQUE_VIOLATION),
        _ => false,
    }
}

/// Wrap a sqlx error, turning unique violations into `Conflict`.
pub(crate) fn map_write_error(err: sqlx::Error, context: &str) -> AppError {
    if is_unique_violation(&err) {
        AppError::with_source(ErrorKind::Conflict, format!("{context}: duplicate entry"), err)
    } else {
        AppError::with_source(ErrorKind::Database, context.to_string(), err)
    }
}
