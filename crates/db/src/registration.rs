//! Capacity-enforcing registration service.
//!
//! The single authority through which registrations are created or
//! cancelled. Every `register` call runs its checks and the insert inside
//! one transaction that holds a row lock on the event, so concurrent
//! requests for the last slot serialize on that lock and the confirmed
//! count can never exceed capacity. A plain read-then-insert sequence is
//! not sufficient here; the lock is what closes the race.

use chrono::Utc;
use eventra_core::error::CoreError;
use eventra_core::types::DbId;
use sqlx::PgPool;

use crate::models::registration::{Registration, UserRegistrations};
use crate::repositories::{EventRepo, RegistrationRepo, UserRepo};
use crate::store::{constraint, store_error};

/// Orchestrates the registration workflow against the event store and the
/// registration ledger.
pub struct RegistrationService;

impl RegistrationService {
    /// Register `user_id` for `event_id`.
    ///
    /// Inside one transaction, with the event row locked:
    /// 1. the event must exist;
    /// 2. its capacity must be configured (positive);
    /// 3. the live confirmed count must be below capacity;
    /// 4. the event date must not have passed;
    /// 5. no registration for this (user, event) pair may exist.
    ///
    /// Failures roll back without any partial state. Connection and
    /// transaction errors surface as [`CoreError::Transient`] and are safe
    /// for the caller to retry; nothing is retried here.
    pub async fn register(
        pool: &PgPool,
        user_id: DbId,
        event_id: DbId,
    ) -> Result<Registration, CoreError> {
        let mut tx = pool.begin().await.map_err(store_error)?;

        let event = EventRepo::find_by_id_locked(&mut *tx, event_id)
            .await
            .map_err(store_error)?
            .ok_or(CoreError::NotFound {
                entity: "Event",
                id: event_id,
            })?;

        // The schema forbids non-positive capacity, but rows imported from
        // older data may predate the constraint. An event without a usable
        // capacity must not accept registrations.
        if event.capacity <= 0 {
            return Err(CoreError::Validation(
                "Event capacity is not configured".into(),
            ));
        }

        let confirmed = RegistrationRepo::count_confirmed(&mut *tx, event_id)
            .await
            .map_err(store_error)?;
        if confirmed >= i64::from(event.capacity) {
            return Err(CoreError::CapacityExceeded { event_id });
        }

        if event.date < Utc::now() {
            return Err(CoreError::EventExpired { event_id });
        }

        if RegistrationRepo::find_id_by_user_and_event(&mut *tx, user_id, event_id)
            .await
            .map_err(store_error)?
            .is_some()
        {
            return Err(CoreError::AlreadyRegistered { event_id });
        }

        let registration = RegistrationRepo::insert_confirmed(&mut *tx, user_id, event_id)
            .await
            .map_err(|err| match constraint(&err).as_deref() {
                // A duplicate that raced past the lookup above.
                Some("uq_registrations_user_event") => CoreError::AlreadyRegistered { event_id },
                _ => store_error(err),
            })?;

        tx.commit().await.map_err(store_error)?;

        // Cosmetic role tag, applied only after the commit. A failure here
        // must never undo or block the registration itself.
        if let Err(err) = UserRepo::tag_participant(pool, user_id).await {
            tracing::warn!(user_id, error = %err, "post-registration role tag failed");
        }

        Ok(registration)
    }

    /// Cancel a registration owned by `user_id`.
    ///
    /// Cancellation is unconditional and simply frees one capacity slot;
    /// there is no waitlist to promote from. A registration that does not
    /// exist or belongs to another user reports not-found, revealing
    /// nothing about other users' registrations.
    pub async fn cancel(
        pool: &PgPool,
        user_id: DbId,
        registration_id: DbId,
    ) -> Result<(), CoreError> {
        let deleted = RegistrationRepo::delete_owned(pool, registration_id, user_id)
            .await
            .map_err(store_error)?;
        if !deleted {
            return Err(CoreError::NotFound {
                entity: "Registration",
                id: registration_id,
            });
        }
        Ok(())
    }

    /// Cancel by (user, event) instead of registration ID.
    pub async fn cancel_by_event(
        pool: &PgPool,
        user_id: DbId,
        event_id: DbId,
    ) -> Result<(), CoreError> {
        let registration_id = RegistrationRepo::find_id_by_user_and_event(pool, user_id, event_id)
            .await
            .map_err(store_error)?
            .ok_or(CoreError::NotFound {
                entity: "Registration",
                id: event_id,
            })?;
        Self::cancel(pool, user_id, registration_id).await
    }

    /// Partition a user's registrations into upcoming and past, enriched
    /// with their event snapshots.
    ///
    /// Uses the same `date >= now` comparison as the registration-time
    /// expiry gate, and is recomputed from the ledger on every call.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<UserRegistrations, CoreError> {
        let rows = RegistrationRepo::list_for_user_with_events(pool, user_id)
            .await
            .map_err(store_error)?;

        let now = Utc::now();
        let (upcoming, past) = rows.into_iter().partition(|row| row.date >= now);

        Ok(UserRegistrations { upcoming, past })
    }
}
