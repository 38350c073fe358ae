//! Repository for the `payments` stub table.

use eventra_core::types::DbId;
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::models::payment::Payment;

/// Column list for `payments` queries.
const COLUMNS: &str = "id, user_id, event_id, amount, status, payment_date";

/// Provides operations for payment stubs. Amounts are recorded as-is and
/// never reconciled.
pub struct PaymentRepo;

impl PaymentRepo {
    /// Insert a pending payment stub, returning the created row.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        event_id: DbId,
        amount: Decimal,
    ) -> Result<Payment, sqlx::Error> {
        let query = format!(
            "INSERT INTO payments (user_id, event_id, amount)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Payment>(&query)
            .bind(user_id)
            .bind(event_id)
            .bind(amount)
            .fetch_one(pool)
            .await
    }

    /// List a user's payment stubs, newest first.
    pub async fn list_for_user(pool: &PgPool, user_id: DbId) -> Result<Vec<Payment>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM payments WHERE user_id = $1 ORDER BY id DESC");
        sqlx::query_as::<_, Payment>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }
}
