//! Handlers for the `/admin` surface (user management, event oversight).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use eventra_core::error::CoreError;
use eventra_core::roles::{ROLE_ADMIN, ROLE_ORGANIZER, ROLE_PARTICIPANT};
use eventra_core::types::DbId;
use eventra_db::models::event::EventSummary;
use eventra_db::models::user::UserView;
use eventra_db::repositories::{EventRepo, UserRepo};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `PUT /admin/users/{id}/role`.
#[derive(Debug, Deserialize)]
pub struct SetRoleRequest {
    pub role: String,
}

/// GET /api/v1/admin/users
///
/// List all accounts (safe view, no password hashes), oldest first.
pub async fn list_users(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<DataResponse<Vec<UserView>>>> {
    let users = UserRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: users }))
}

/// GET /api/v1/admin/events
///
/// All events with organizer identity and live participant counts.
pub async fn list_events(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<DataResponse<Vec<EventSummary>>>> {
    let events = EventRepo::list_summary(&state.pool).await?;
    Ok(Json(DataResponse { data: events }))
}

/// PUT /api/v1/admin/users/{id}/role
///
/// Change a user's role. Admins cannot change their own role, so the last
/// admin cannot lock everyone out by accident.
pub async fn set_role(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<SetRoleRequest>,
) -> AppResult<Json<DataResponse<UserView>>> {
    if ![ROLE_ADMIN, ROLE_ORGANIZER, ROLE_PARTICIPANT].contains(&input.role.as_str()) {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Unknown role '{}'",
            input.role
        ))));
    }
    if id == admin.user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Admins cannot change their own role".into(),
        )));
    }

    let updated = UserRepo::set_role(&state.pool, id, &input.role)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "User",
            id,
        })?;

    tracing::info!(user_id = id, role = %input.role, admin_id = admin.user_id, "Role changed");
    Ok(Json(DataResponse { data: updated }))
}

/// DELETE /api/v1/admin/users/{id}
///
/// Remove an account together with its registrations, payments, and
/// organized events. Admin accounts cannot be removed through the API.
pub async fn delete_user(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let user = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "User",
            id,
        })?;

    if user.role == ROLE_ADMIN {
        return Err(AppError::Core(CoreError::Forbidden(
            "Admin accounts cannot be deleted".into(),
        )));
    }

    UserRepo::delete_cascade(&state.pool, id).await?;
    tracing::info!(user_id = id, admin_id = admin.user_id, "User deleted");
    Ok(StatusCode::NO_CONTENT)
}
