//! Repository for the `registrations` table (the registration ledger).
//!
//! Uniqueness of the (user, event) pair is enforced here twice: a lookup
//! before insert, and the `uq_registrations_user_event` constraint for
//! requests that race past the lookup.
//!
//! The read/insert methods are generic over the executor so the
//! registration service can run them inside its row-locking transaction.

use eventra_core::types::DbId;
use sqlx::{PgExecutor, PgPool};

use crate::models::registration::{Registration, RegistrationWithEvent, STATUS_CONFIRMED};

/// Column list for `registrations` queries.
const COLUMNS: &str = "id, user_id, event_id, status, registered_at";

/// Provides CRUD operations for registrations.
pub struct RegistrationRepo;

impl RegistrationRepo {
    /// Insert a confirmed registration, returning the created row.
    pub async fn insert_confirmed<'e>(
        executor: impl PgExecutor<'e>,
        user_id: DbId,
        event_id: DbId,
    ) -> Result<Registration, sqlx::Error> {
        let query = format!(
            "INSERT INTO registrations (user_id, event_id, status)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Registration>(&query)
            .bind(user_id)
            .bind(event_id)
            .bind(STATUS_CONFIRMED)
            .fetch_one(executor)
            .await
    }

    /// Count the confirmed registrations for an event.
    ///
    /// This is the live value checked against capacity; there is no cached
    /// counter anywhere that could drift from it.
    pub async fn count_confirmed<'e>(
        executor: impl PgExecutor<'e>,
        event_id: DbId,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM registrations WHERE event_id = $1 AND status = $2")
            .bind(event_id)
            .bind(STATUS_CONFIRMED)
            .fetch_one(executor)
            .await
    }

    /// Find the registration ID for a (user, event) pair, if one exists.
    pub async fn find_id_by_user_and_event<'e>(
        executor: impl PgExecutor<'e>,
        user_id: DbId,
        event_id: DbId,
    ) -> Result<Option<DbId>, sqlx::Error> {
        sqlx::query_scalar("SELECT id FROM registrations WHERE user_id = $1 AND event_id = $2")
            .bind(user_id)
            .bind(event_id)
            .fetch_optional(executor)
            .await
    }

    /// Delete a registration only if it belongs to the given user.
    /// Returns `false` when no such owned row exists.
    pub async fn delete_owned(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM registrations WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// List a user's registrations joined with their event snapshots,
    /// ordered by event date ascending.
    pub async fn list_for_user_with_events(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<RegistrationWithEvent>, sqlx::Error> {
        sqlx::query_as::<_, RegistrationWithEvent>(
            "SELECT r.id, r.user_id, r.event_id, r.status, r.registered_at, \
                    e.title, e.description, e.location, e.date, e.capacity, \
                    e.price, e.organizer_id, e.photos \
             FROM registrations r \
             JOIN events e ON e.id = r.event_id \
             WHERE r.user_id = $1 \
             ORDER BY e.date ASC",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }
}
