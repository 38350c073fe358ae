//! Periodic purge of expired events.
//!
//! Spawns a background task that deletes events whose date passed more than
//! the configured grace period ago, together with their registrations and
//! payments. Runs on a fixed interval using `tokio::time::interval`, so
//! read paths never pay the purge cost.

use std::time::Duration;

use chrono::Utc;
use eventra_db::repositories::EventRepo;
use sqlx::PgPool;
use tokio_util::sync::CancellationToken;

/// Default grace period: events stay queryable for 24 hours past their date.
const DEFAULT_GRACE_HOURS: i64 = 24;

/// How often the purge job runs.
const PURGE_INTERVAL: Duration = Duration::from_secs(3600); // 1 hour

/// Run the expired-event purge loop.
///
/// Deletes events older than `now - grace_hours` (defaults to 24) along with
/// their dependent rows. Runs until `cancel` is triggered.
pub async fn run(pool: PgPool, cancel: CancellationToken) {
    let grace_hours: i64 = std::env::var("EVENT_PURGE_GRACE_HOURS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_GRACE_HOURS);

    tracing::info!(
        grace_hours,
        interval_secs = PURGE_INTERVAL.as_secs(),
        "Event purge job started"
    );

    let mut interval = tokio::time::interval(PURGE_INTERVAL);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Event purge job stopping");
                break;
            }
            _ = interval.tick() => {
                let cutoff = Utc::now() - chrono::Duration::hours(grace_hours);
                match EventRepo::delete_expired(&pool, cutoff).await {
                    Ok(deleted) => {
                        if deleted > 0 {
                            tracing::info!(deleted, "Event purge: removed expired events");
                        } else {
                            tracing::debug!("Event purge: nothing to remove");
                        }
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Event purge: cleanup failed");
                    }
                }
            }
        }
    }
}
