//! Event entity model and DTOs.

use eventra_core::photos::PhotoInput;
use eventra_core::types::{DbId, Timestamp};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `events` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Event {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub date: Timestamp,
    pub capacity: i32,
    pub price: Decimal,
    pub organizer_id: DbId,
    pub photos: Vec<String>,
    pub created_at: Timestamp,
}

/// An event annotated with its live confirmed-registration count.
///
/// The count is always derived by aggregation at query time; it is never
/// stored, so it cannot drift from the ledger.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct EventWithCount {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub date: Timestamp,
    pub capacity: i32,
    pub price: Decimal,
    pub organizer_id: DbId,
    pub photos: Vec<String>,
    pub created_at: Timestamp,
    pub participants_count: i64,
}

/// Admin summary row: event plus organizer identity and participant count.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct EventSummary {
    pub id: DbId,
    pub title: String,
    pub date: Timestamp,
    pub location: Option<String>,
    pub capacity: i32,
    pub price: Decimal,
    pub organizer_id: DbId,
    pub organizer_name: Option<String>,
    pub organizer_email: Option<String>,
    pub participants_count: i64,
}

/// DTO for creating an event.
///
/// `date` is accepted as a string so the store can report an unparseable
/// date as a validation failure rather than a deserialization rejection.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateEvent {
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub date: String,
    pub capacity: i32,
    pub price: Option<Decimal>,
    pub photos: Option<PhotoInput>,
}

/// Merge-patch DTO for updating an event. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateEvent {
    pub title: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub date: Option<String>,
    pub capacity: Option<i32>,
    pub price: Option<Decimal>,
    pub photos: Option<PhotoInput>,
}
