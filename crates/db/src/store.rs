//! Classification of low-level sqlx errors into the domain taxonomy.

use eventra_core::error::CoreError;

/// Extract the violated constraint name from a database error, if any.
pub(crate) fn constraint(err: &sqlx::Error) -> Option<String> {
    match err {
        sqlx::Error::Database(db_err) => db_err.constraint().map(str::to_string),
        _ => None,
    }
}

/// Map a sqlx error into a [`CoreError`].
///
/// Known constraint violations become validation failures with a
/// user-renderable message; everything else is a transient store failure
/// that the caller may retry.
pub(crate) fn store_error(err: sqlx::Error) -> CoreError {
    if let sqlx::Error::Database(db_err) = &err {
        match db_err.constraint() {
            Some("fk_events_organizer") => {
                return CoreError::Validation("Organizer does not exist".into());
            }
            Some("uq_users_email") => {
                return CoreError::Validation("Email already used".into());
            }
            Some("ck_events_capacity_positive") => {
                return CoreError::Validation("Capacity must be a positive integer".into());
            }
            Some("ck_events_price_non_negative") => {
                return CoreError::Validation("Price must not be negative".into());
            }
            _ => {}
        }
    }
    CoreError::Transient(err.to_string())
}
