pub mod admin;
pub mod auth;
pub mod events;
pub mod health;
pub mod payments;
pub mod registrations;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                    register (public)
/// /auth/login                       login (public)
///
/// /users/me                         get, update own profile (auth required)
///
/// /events                           list upcoming (public), create (organizer)
/// /events/mine                      organizer's own events
/// /events/{id}                      get (public), update, delete (owner or admin)
///
/// /registrations                    register for an event (auth required)
/// /registrations/me                 upcoming/past registrations
/// /registrations/{id}               cancel by registration id
/// /registrations/event/{event_id}   cancel by event id
///
/// /payments                         record payment stub (auth required)
/// /payments/me                      own payment stubs
///
/// /admin/users                      list users (admin only)
/// /admin/users/{id}                 delete user
/// /admin/users/{id}/role            change role (PUT)
/// /admin/events                     event summaries with organizer + counts
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Authentication routes (register, login).
        .nest("/auth", auth::router())
        // Own-profile routes.
        .nest("/users", users::router())
        // Event catalog and organizer management.
        .nest("/events", events::router())
        // Capacity-enforced registrations.
        .nest("/registrations", registrations::router())
        // Payment stubs.
        .nest("/payments", payments::router())
        // Admin surface (user management + event oversight).
        .nest("/admin", admin::router())
}
