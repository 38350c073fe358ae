//! Route definitions for the `/admin` surface.

use axum::routing::{delete, get, put};
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

/// Routes mounted at `/admin` (all admin-only).
///
/// ```text
/// GET    /users            -> list users
/// DELETE /users/{id}       -> delete user (never admins)
/// PUT    /users/{id}/role  -> change role
/// GET    /events           -> event summaries with organizer + counts
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", get(admin::list_users))
        .route("/users/{id}", delete(admin::delete_user))
        .route("/users/{id}/role", put(admin::set_role))
        .route("/events", get(admin::list_events))
}
