//! Registration entity model and reporting views.

use eventra_core::types::{DbId, Timestamp};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;

/// Registration status counted against event capacity.
pub const STATUS_CONFIRMED: &str = "confirmed";

/// Registration status reserved for flows that defer confirmation
/// (e.g. unreconciled payments). Not counted against capacity.
pub const STATUS_PENDING: &str = "pending";

/// A row from the `registrations` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Registration {
    pub id: DbId,
    pub user_id: DbId,
    pub event_id: DbId,
    pub status: String,
    pub registered_at: Timestamp,
}

/// A registration joined with a snapshot of its event.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RegistrationWithEvent {
    pub id: DbId,
    pub user_id: DbId,
    pub event_id: DbId,
    pub status: String,
    pub registered_at: Timestamp,
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub date: Timestamp,
    pub capacity: i32,
    pub price: Decimal,
    pub organizer_id: DbId,
    pub photos: Vec<String>,
}

/// A user's registrations partitioned by the event date, using the same
/// now-comparison as the registration-time expiry check.
#[derive(Debug, Serialize)]
pub struct UserRegistrations {
    pub upcoming: Vec<RegistrationWithEvent>,
    pub past: Vec<RegistrationWithEvent>,
}
