use crate::types::DbId;

/// Domain-level error taxonomy shared by the database and HTTP layers.
///
/// Business-rule failures from the registration subsystem get their own
/// variants so callers can render distinct, user-actionable messages
/// instead of a generic conflict.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// The event already holds as many confirmed registrations as its capacity.
    #[error("Event {event_id} is full")]
    CapacityExceeded { event_id: DbId },

    /// The event's date has passed relative to the check-time instant.
    #[error("Event {event_id} has already finished")]
    EventExpired { event_id: DbId },

    /// A registration for this (user, event) pair already exists.
    #[error("Already registered for event {event_id}")]
    AlreadyRegistered { event_id: DbId },

    /// Connection or transaction failure. Safe for the caller to retry;
    /// never retried automatically inside the core.
    #[error("Transient store error: {0}")]
    Transient(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
