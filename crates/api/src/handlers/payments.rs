//! Handlers for the `/payments` stub resource.
//!
//! Payments are recorded as pending stubs only; no provider integration and
//! no reconciliation against registrations.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use eventra_core::error::CoreError;
use eventra_core::types::DbId;
use eventra_db::models::payment::Payment;
use eventra_db::repositories::{EventRepo, PaymentRepo};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAuth;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /payments`.
#[derive(Debug, Deserialize)]
pub struct CreatePaymentRequest {
    pub event_id: DbId,
    /// Optional override; defaults to the event's listed price.
    pub amount: Option<Decimal>,
}

/// POST /api/v1/payments
///
/// Record a pending payment stub for an event.
pub async fn create(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(input): Json<CreatePaymentRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Payment>>)> {
    let event = EventRepo::find_by_id(&state.pool, input.event_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Event",
            id: input.event_id,
        })?;

    let amount = input.amount.unwrap_or(event.price);
    if amount < Decimal::ZERO {
        return Err(AppError::Core(CoreError::Validation(
            "Payment amount must not be negative".into(),
        )));
    }

    let payment = PaymentRepo::create(&state.pool, user.user_id, event.id, amount).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: payment })))
}

/// GET /api/v1/payments/me
///
/// The authenticated user's payment stubs, newest first.
pub async fn list_mine(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> AppResult<Json<DataResponse<Vec<Payment>>>> {
    let payments = PaymentRepo::list_for_user(&state.pool, user.user_id).await?;
    Ok(Json(DataResponse { data: payments }))
}
