//! Handlers for the `/registrations` resource.
//!
//! All writes go through [`RegistrationService`]; handlers never touch the
//! ledger directly, so the capacity and duplicate rules cannot be bypassed
//! from the HTTP layer.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use eventra_core::types::DbId;
use eventra_db::models::registration::{Registration, UserRegistrations};
use eventra_db::registration::RegistrationService;
use serde::Deserialize;

use crate::error::AppResult;
use crate::middleware::rbac::RequireAuth;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /registrations`.
#[derive(Debug, Deserialize)]
pub struct CreateRegistrationRequest {
    pub event_id: DbId,
}

/// POST /api/v1/registrations
///
/// Register the authenticated user for an event. Fails with 404 if the
/// event does not exist, 409 if it is full or the user is already
/// registered, and 400 if the event date has passed.
pub async fn create(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(input): Json<CreateRegistrationRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Registration>>)> {
    let registration =
        RegistrationService::register(&state.pool, user.user_id, input.event_id).await?;

    tracing::info!(
        registration_id = registration.id,
        user_id = user.user_id,
        event_id = input.event_id,
        "Registration confirmed"
    );
    Ok((
        StatusCode::CREATED,
        Json(DataResponse { data: registration }),
    ))
}

/// GET /api/v1/registrations/me
///
/// The authenticated user's registrations, partitioned into upcoming and
/// past by event date.
pub async fn list_mine(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> AppResult<Json<DataResponse<UserRegistrations>>> {
    let registrations = RegistrationService::list_for_user(&state.pool, user.user_id).await?;
    Ok(Json(DataResponse {
        data: registrations,
    }))
}

/// DELETE /api/v1/registrations/{id}
///
/// Cancel one of the authenticated user's registrations. Another user's
/// registration id reports 404, not 403.
pub async fn cancel(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    RegistrationService::cancel(&state.pool, user.user_id, id).await?;
    tracing::info!(registration_id = id, user_id = user.user_id, "Registration cancelled");
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/registrations/event/{event_id}
///
/// Cancel by event id, for clients that track events rather than
/// registration ids.
pub async fn cancel_by_event(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(event_id): Path<DbId>,
) -> AppResult<StatusCode> {
    RegistrationService::cancel_by_event(&state.pool, user.user_id, event_id).await?;
    tracing::info!(event_id, user_id = user.user_id, "Registration cancelled");
    Ok(StatusCode::NO_CONTENT)
}
