//! Repository for the `contacts` table.

use sqlx::PgPool;
use storefront_core::submission::{ContactStatus, SubmissionStatus};
use storefront_core::types::DbId;

use crate::models::contact::{Contact, CreateContact};

const COLUMNS: &str = "id, name, email, subject, message, status, created_at, updated_at";

/// Provides operations for contact messages.
pub struct ContactRepo;

impl ContactRepo {
    /// Insert a new contact message in the initial status.
    pub async fn create(pool: &PgPool, input: &CreateContact) -> Result<Contact, sqlx::Error> {
        let query = format!(
            "INSERT INTO contacts (name, email, subject, message, status) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Contact>(&query)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.subject)
            .bind(&input.message)
            .bind(ContactStatus::INITIAL.as_str())
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Contact>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM contacts WHERE id = $1");
        sqlx::query_as::<_, Contact>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List contact messages, optionally filtered by status. Newest first.
    pub async fn list(
        pool: &PgPool,
        status: Option<ContactStatus>,
    ) -> Result<Vec<Contact>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM contacts \
             WHERE ($1::TEXT IS NULL OR status = $1) \
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Contact>(&query)
            .bind(status.map(|s| s.as_str()))
            .fetch_all(pool)
            .await
    }

    pub async fn update_status(
        pool: &PgPool,
        id: DbId,
        status: ContactStatus,
    ) -> Result<Option<Contact>, sqlx::Error> {
        let query = format!("UPDATE contacts SET status = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Contact>(&query)
            .bind(id)
            .bind(status.as_str())
            .fetch_optional(pool)
            .await
    }

    /// Hard-delete a contact message. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM contacts WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
