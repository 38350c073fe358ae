//! Route definitions for the `/payments` stub resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::payments;
use crate::state::AppState;

/// Routes mounted at `/payments`.
///
/// ```text
/// POST /     -> record payment stub (requires auth)
/// GET  /me   -> own payment stubs
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(payments::create))
        .route("/me", get(payments::list_mine))
}
