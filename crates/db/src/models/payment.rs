//! Payment stub model.
//!
//! Payments are recorded but never reconciled against any ledger; the row
//! exists so event deletion can demonstrate the full application-level
//! cascade.

use eventra_core::types::{DbId, Timestamp};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `payments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Payment {
    pub id: DbId,
    pub user_id: DbId,
    pub event_id: DbId,
    pub amount: Decimal,
    pub status: String,
    pub payment_date: Option<Timestamp>,
}
