//! Route definitions for the `/events` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::events;
use crate::state::AppState;

/// Routes mounted at `/events`.
///
/// `/mine` must be registered before `/{id}` would otherwise shadow it.
///
/// ```text
/// GET    /        -> list upcoming (public)
/// POST   /        -> create (organizer or admin)
/// GET    /mine    -> organizer's events
/// GET    /{id}    -> detail (public)
/// PUT    /{id}    -> update (owner or admin)
/// DELETE /{id}    -> delete (owner or admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(events::list).post(events::create))
        .route("/mine", get(events::list_mine))
        .route(
            "/{id}",
            get(events::get).put(events::update).delete(events::delete),
        )
}
