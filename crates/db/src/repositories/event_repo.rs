//! Repository for the `events` table.
//!
//! This is the event store of the platform: it owns field validation on
//! create/update, the live participant-count aggregation, and the
//! application-level cascade that removes registrations and payment stubs
//! together with their event.

use chrono::{NaiveDate, NaiveDateTime, TimeZone, Utc};
use eventra_core::error::CoreError;
use eventra_core::photos;
use eventra_core::types::{DbId, Timestamp};
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::models::event::{CreateEvent, Event, EventSummary, EventWithCount, UpdateEvent};
use crate::models::registration::STATUS_CONFIRMED;
use crate::store::store_error;

/// Column list for `events` queries.
const COLUMNS: &str =
    "id, title, description, location, date, capacity, price, organizer_id, photos, created_at";

/// Column list for queries annotated with the live confirmed count.
/// The count is computed by aggregation on every read, never stored.
const COUNTED_COLUMNS: &str = "\
    e.id, e.title, e.description, e.location, e.date, e.capacity, e.price, \
    e.organizer_id, e.photos, e.created_at, \
    COUNT(r.id) FILTER (WHERE r.status = $1) AS participants_count";

/// Parse an event date from an ISO-8601 string or a handful of common
/// date formats, normalized to UTC.
pub fn parse_event_date(raw: &str) -> Result<Timestamp, CoreError> {
    let trimmed = raw.trim();

    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S") {
        return Ok(Utc.from_utc_datetime(&naive));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S") {
        return Ok(Utc.from_utc_datetime(&naive));
    }
    if let Ok(day) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        let midnight = day.and_time(chrono::NaiveTime::MIN);
        return Ok(Utc.from_utc_datetime(&midnight));
    }

    Err(CoreError::Validation(format!("Invalid date format: {raw}")))
}

/// Validate capacity and price bounds shared by create and update.
fn check_capacity(capacity: i32) -> Result<(), CoreError> {
    if capacity <= 0 {
        return Err(CoreError::Validation(
            "Capacity must be a positive integer".into(),
        ));
    }
    Ok(())
}

fn check_price(price: Decimal) -> Result<(), CoreError> {
    if price < Decimal::ZERO {
        return Err(CoreError::Validation("Price must not be negative".into()));
    }
    Ok(())
}

/// Provides CRUD and query operations for events.
pub struct EventRepo;

impl EventRepo {
    /// Validate and insert a new event, returning the created row with
    /// photos normalized to an ordered list.
    ///
    /// All validation failures are reported before any write.
    pub async fn create(
        pool: &PgPool,
        organizer_id: DbId,
        input: &CreateEvent,
    ) -> Result<Event, CoreError> {
        let title = input.title.trim();
        if title.is_empty() {
            return Err(CoreError::Validation("Title is required".into()));
        }
        check_capacity(input.capacity)?;
        let price = input.price.unwrap_or(Decimal::ZERO);
        check_price(price)?;
        let date = parse_event_date(&input.date)?;
        let photo_list = photos::normalize(input.photos.clone());

        let query = format!(
            "INSERT INTO events (title, description, location, date, capacity, price, organizer_id, photos)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Event>(&query)
            .bind(title)
            .bind(&input.description)
            .bind(&input.location)
            .bind(date)
            .bind(input.capacity)
            .bind(price)
            .bind(organizer_id)
            .bind(&photo_list)
            .fetch_one(pool)
            .await
            .map_err(store_error)
    }

    /// Find an event by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Event>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM events WHERE id = $1");
        sqlx::query_as::<_, Event>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an event by ID and lock its row (`FOR UPDATE`) for the duration
    /// of the surrounding transaction.
    ///
    /// The registration service acquires this lock before counting, so two
    /// concurrent registrations for the same event serialize on the event
    /// row and cannot both observe a free slot.
    pub async fn find_by_id_locked(
        conn: &mut sqlx::PgConnection,
        id: DbId,
    ) -> Result<Option<Event>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM events WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, Event>(&query)
            .bind(id)
            .fetch_optional(conn)
            .await
    }

    /// List all events ordered by date ascending, each annotated with its
    /// live confirmed-registration count.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<EventWithCount>, sqlx::Error> {
        let query = format!(
            "SELECT {COUNTED_COLUMNS} FROM events e \
             LEFT JOIN registrations r ON r.event_id = e.id \
             GROUP BY e.id ORDER BY e.date ASC"
        );
        sqlx::query_as::<_, EventWithCount>(&query)
            .bind(STATUS_CONFIRMED)
            .fetch_all(pool)
            .await
    }

    /// List events whose date has not passed, ordered by date ascending,
    /// with live confirmed counts.
    pub async fn list_upcoming(pool: &PgPool) -> Result<Vec<EventWithCount>, sqlx::Error> {
        let query = format!(
            "SELECT {COUNTED_COLUMNS} FROM events e \
             LEFT JOIN registrations r ON r.event_id = e.id \
             WHERE e.date >= NOW() \
             GROUP BY e.id ORDER BY e.date ASC"
        );
        sqlx::query_as::<_, EventWithCount>(&query)
            .bind(STATUS_CONFIRMED)
            .fetch_all(pool)
            .await
    }

    /// List the events organized by a user, with live confirmed counts.
    pub async fn list_by_organizer(
        pool: &PgPool,
        organizer_id: DbId,
    ) -> Result<Vec<EventWithCount>, sqlx::Error> {
        let query = format!(
            "SELECT {COUNTED_COLUMNS} FROM events e \
             LEFT JOIN registrations r ON r.event_id = e.id \
             WHERE e.organizer_id = $2 \
             GROUP BY e.id ORDER BY e.date ASC"
        );
        sqlx::query_as::<_, EventWithCount>(&query)
            .bind(STATUS_CONFIRMED)
            .bind(organizer_id)
            .fetch_all(pool)
            .await
    }

    /// Admin summary: every event joined with its organizer's identity and
    /// the live confirmed count, ordered by date.
    pub async fn list_summary(pool: &PgPool) -> Result<Vec<EventSummary>, sqlx::Error> {
        sqlx::query_as::<_, EventSummary>(
            "SELECT e.id, e.title, e.date, e.location, e.capacity, e.price, e.organizer_id, \
                    u.name AS organizer_name, u.email AS organizer_email, \
                    COUNT(r.id) FILTER (WHERE r.status = $1) AS participants_count \
             FROM events e \
             LEFT JOIN users u ON u.id = e.organizer_id \
             LEFT JOIN registrations r ON r.event_id = e.id \
             GROUP BY e.id, u.id ORDER BY e.date ASC",
        )
        .bind(STATUS_CONFIRMED)
        .fetch_all(pool)
        .await
    }

    /// Merge-patch an event. Fields not present in the patch are left
    /// unchanged; date and capacity are re-validated when supplied.
    ///
    /// Returns `Ok(None)` if the event does not exist.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        patch: &UpdateEvent,
    ) -> Result<Option<Event>, CoreError> {
        if let Some(capacity) = patch.capacity {
            check_capacity(capacity)?;
        }
        if let Some(price) = patch.price {
            check_price(price)?;
        }
        let date = patch.date.as_deref().map(parse_event_date).transpose()?;
        let photo_list = patch.photos.clone().map(|p| photos::normalize(Some(p)));

        let query = format!(
            "UPDATE events SET \
                 title = COALESCE($2, title), \
                 description = COALESCE($3, description), \
                 location = COALESCE($4, location), \
                 date = COALESCE($5, date), \
                 capacity = COALESCE($6, capacity), \
                 price = COALESCE($7, price), \
                 photos = COALESCE($8, photos) \
             WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Event>(&query)
            .bind(id)
            .bind(&patch.title)
            .bind(&patch.description)
            .bind(&patch.location)
            .bind(date)
            .bind(patch.capacity)
            .bind(patch.price)
            .bind(&photo_list)
            .fetch_optional(pool)
            .await
            .map_err(store_error)
    }

    /// Delete an event and, in the same transaction, every registration and
    /// payment stub referencing it. Returns `false` if the event did not
    /// exist.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("DELETE FROM registrations WHERE event_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM payments WHERE event_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete every event whose date is before `cutoff`, cascading each
    /// event's registrations and payments in the same transaction.
    ///
    /// Returns the number of events removed. Used by the background purge.
    pub async fn delete_expired(pool: &PgPool, cutoff: Timestamp) -> Result<u64, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query(
            "DELETE FROM registrations WHERE event_id IN \
                 (SELECT id FROM events WHERE date < $1)",
        )
        .bind(cutoff)
        .execute(&mut *tx)
        .await?;
        sqlx::query(
            "DELETE FROM payments WHERE event_id IN \
                 (SELECT id FROM events WHERE date < $1)",
        )
        .bind(cutoff)
        .execute(&mut *tx)
        .await?;
        let result = sqlx::query("DELETE FROM events WHERE date < $1")
            .bind(cutoff)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(result.rows_affected())
    }
}
