//! Handlers for the `/users` resource (own profile).

use axum::extract::State;
use axum::Json;
use eventra_core::error::CoreError;
use eventra_db::models::user::UserView;
use eventra_db::repositories::UserRepo;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAuth;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `PUT /users/me`.
#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub name: String,
}

/// GET /api/v1/users/me
///
/// Return the authenticated user's profile.
pub async fn me(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> AppResult<Json<DataResponse<UserView>>> {
    let profile = UserRepo::find_by_id(&state.pool, user.user_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "User",
            id: user.user_id,
        })?;

    Ok(Json(DataResponse {
        data: profile.into_view(),
    }))
}

/// PUT /api/v1/users/me
///
/// Update the authenticated user's display name.
pub async fn update_me(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(input): Json<UpdateProfileRequest>,
) -> AppResult<Json<DataResponse<UserView>>> {
    let name = input.name.trim();
    if name.is_empty() || name.len() > 100 {
        return Err(AppError::Core(CoreError::Validation(
            "Name must be between 1 and 100 characters".into(),
        )));
    }
    if !name
        .chars()
        .all(|c| c.is_alphanumeric() || c.is_whitespace() || c == '-' || c == '\'')
    {
        return Err(AppError::Core(CoreError::Validation(
            "Name may only contain letters, digits, spaces, hyphens, and apostrophes".into(),
        )));
    }

    let updated = UserRepo::update_name(&state.pool, user.user_id, name)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "User",
            id: user.user_id,
        })?;

    Ok(Json(DataResponse { data: updated }))
}
