//! Handlers for the `/events` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use eventra_core::error::CoreError;
use eventra_core::roles::ROLE_ADMIN;
use eventra_core::types::DbId;
use eventra_db::models::event::{CreateEvent, Event, EventWithCount, UpdateEvent};
use eventra_db::repositories::EventRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireOrganizer;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Public reads
// ---------------------------------------------------------------------------

/// GET /api/v1/events
///
/// Public listing of upcoming events with live participant counts,
/// soonest first.
pub async fn list(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<EventWithCount>>>> {
    let events = EventRepo::list_upcoming(&state.pool).await?;
    Ok(Json(DataResponse { data: events }))
}

/// GET /api/v1/events/{id}
///
/// Public detail view of a single event.
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Event>>> {
    let event = EventRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Event",
            id,
        })?;
    Ok(Json(DataResponse { data: event }))
}

// ---------------------------------------------------------------------------
// Organizer surface
// ---------------------------------------------------------------------------

/// GET /api/v1/events/mine
///
/// Events organized by the authenticated organizer, with participant counts.
pub async fn list_mine(
    State(state): State<AppState>,
    RequireOrganizer(user): RequireOrganizer,
) -> AppResult<Json<DataResponse<Vec<EventWithCount>>>> {
    let events = EventRepo::list_by_organizer(&state.pool, user.user_id).await?;
    Ok(Json(DataResponse { data: events }))
}

/// POST /api/v1/events
///
/// Create an event owned by the authenticated organizer.
pub async fn create(
    State(state): State<AppState>,
    RequireOrganizer(user): RequireOrganizer,
    Json(input): Json<CreateEvent>,
) -> AppResult<(StatusCode, Json<DataResponse<Event>>)> {
    let event = EventRepo::create(&state.pool, user.user_id, &input).await?;
    tracing::info!(event_id = event.id, organizer_id = user.user_id, "Event created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: event })))
}

/// PUT /api/v1/events/{id}
///
/// Merge-patch an event. Only its organizer or an admin may update it.
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(patch): Json<UpdateEvent>,
) -> AppResult<Json<DataResponse<Event>>> {
    require_owner_or_admin(&state, &user, id).await?;

    let updated = EventRepo::update(&state.pool, id, &patch)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Event",
            id,
        })?;
    Ok(Json(DataResponse { data: updated }))
}

/// DELETE /api/v1/events/{id}
///
/// Delete an event and everything that references it. Only its organizer
/// or an admin may delete it.
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    require_owner_or_admin(&state, &user, id).await?;

    let deleted = EventRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Event",
            id,
        }));
    }
    tracing::info!(event_id = id, user_id = user.user_id, "Event deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// Reject with 403 unless `user` organizes event `id` or is an admin.
/// Missing events report 404 before the ownership check so organizers get
/// an accurate error.
async fn require_owner_or_admin(
    state: &AppState,
    user: &AuthUser,
    id: DbId,
) -> Result<(), AppError> {
    let event = EventRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Event",
            id,
        })?;

    if event.organizer_id != user.user_id && user.role != ROLE_ADMIN {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the event organizer or an admin may modify this event".into(),
        )));
    }
    Ok(())
}
