//! Route definitions for the `/registrations` resource.

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::registrations;
use crate::state::AppState;

/// Routes mounted at `/registrations`.
///
/// ```text
/// POST   /                    -> register for an event (requires auth)
/// GET    /me                  -> upcoming/past registrations
/// DELETE /{id}                -> cancel by registration id
/// DELETE /event/{event_id}    -> cancel by event id
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(registrations::create))
        .route("/me", get(registrations::list_mine))
        .route("/{id}", delete(registrations::cancel))
        .route("/event/{event_id}", delete(registrations::cancel_by_event))
}
