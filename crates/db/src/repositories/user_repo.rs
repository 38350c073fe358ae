//! Repository for the `users` table.

use eventra_core::roles::{ROLE_ADMIN, ROLE_ORGANIZER, ROLE_PARTICIPANT};
use eventra_core::types::DbId;
use sqlx::PgPool;

use crate::models::user::{CreateUser, User, UserView};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, email, password_hash, role, created_at";

/// Column list for responses that must not carry the password hash.
const VIEW_COLUMNS: &str = "id, name, email, role, created_at";

/// Provides CRUD operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (name, email, password_hash, role)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.password_hash)
            .bind(&input.role)
            .fetch_one(pool)
            .await
    }

    /// Find a user by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by email (case-sensitive).
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE email = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// List all users (safe view), oldest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<UserView>, sqlx::Error> {
        let query = format!("SELECT {VIEW_COLUMNS} FROM users ORDER BY created_at");
        sqlx::query_as::<_, UserView>(&query).fetch_all(pool).await
    }

    /// Update a user's display name, returning the updated safe view.
    pub async fn update_name(
        pool: &PgPool,
        id: DbId,
        name: &str,
    ) -> Result<Option<UserView>, sqlx::Error> {
        let query = format!("UPDATE users SET name = $2 WHERE id = $1 RETURNING {VIEW_COLUMNS}");
        sqlx::query_as::<_, UserView>(&query)
            .bind(id)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// Set a user's role, returning the updated safe view.
    pub async fn set_role(
        pool: &PgPool,
        id: DbId,
        role: &str,
    ) -> Result<Option<UserView>, sqlx::Error> {
        let query = format!("UPDATE users SET role = $2 WHERE id = $1 RETURNING {VIEW_COLUMNS}");
        sqlx::query_as::<_, UserView>(&query)
            .bind(id)
            .bind(role)
            .fetch_optional(pool)
            .await
    }

    /// Best-effort cosmetic role tag applied after a successful registration.
    ///
    /// Marks the user as a participant unless they already hold an elevated
    /// role. This is an annotation, not a security grant; no authorization
    /// decision reads it.
    pub async fn tag_participant(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE users SET role = $2 WHERE id = $1 AND role NOT IN ($3, $4)")
            .bind(id)
            .bind(ROLE_PARTICIPANT)
            .bind(ROLE_ADMIN)
            .bind(ROLE_ORGANIZER)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Delete a user and everything that references them, in one transaction:
    /// their registrations and payments, the events they organize (with each
    /// event's registrations and payments), and finally the user row.
    ///
    /// Returns `false` if the user did not exist.
    pub async fn delete_cascade(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("DELETE FROM registrations WHERE user_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM payments WHERE user_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        sqlx::query(
            "DELETE FROM registrations WHERE event_id IN \
                 (SELECT id FROM events WHERE organizer_id = $1)",
        )
        .bind(id)
        .execute(&mut *tx)
        .await?;
        sqlx::query(
            "DELETE FROM payments WHERE event_id IN \
                 (SELECT id FROM events WHERE organizer_id = $1)",
        )
        .bind(id)
        .execute(&mut *tx)
        .await?;
        sqlx::query("DELETE FROM events WHERE organizer_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }
}
