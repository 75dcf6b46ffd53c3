//! Repository for the `contact_messages` table.

use nest_core::types::DbId;
use sqlx::PgPool;

use crate::models::contact_message::{ContactMessage, NewContactMessage};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, email, company, message, created_at";

/// Provides insert/list/delete operations for contact messages.
///
/// Messages are immutable after insert; there is no update path.
pub struct ContactMessageRepo;

impl ContactMessageRepo {
    /// Insert a new contact message, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &NewContactMessage,
    ) -> Result<ContactMessage, sqlx::Error> {
        let query = format!(
            "INSERT INTO contact_messages (name, email, company, message)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ContactMessage>(&query)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.company)
            .bind(&input.message)
            .fetch_one(pool)
            .await
    }

    /// List all contact messages, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<ContactMessage>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM contact_messages ORDER BY created_at DESC, id DESC");
        sqlx::query_as::<_, ContactMessage>(&query)
            .fetch_all(pool)
            .await
    }

    /// Delete a contact message by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM contact_messages WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
