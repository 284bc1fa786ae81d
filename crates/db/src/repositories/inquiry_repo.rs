//! Repository for the `inquiries` table.
//!
//! Every read returns the inquiry left-joined with its product's summary
//! columns, so a missing or unresolved product yields `product: None`.

use sqlx::PgPool;
use storefront_core::submission::{InquiryStatus, SubmissionStatus};
use storefront_core::types::DbId;

use crate::models::inquiry::{CreateInquiry, Inquiry, InquiryRow};

/// Inquiry columns qualified with the `i` alias.
const COLUMNS: &str = "\
    i.id, i.name, i.email, i.phone, i.message, i.product_id, i.status, \
    i.created_at, i.updated_at";

/// Product summary columns from the joined `p` alias.
const PRODUCT_COLUMNS: &str = "\
    p.external_id AS product_external_id, p.name AS product_name, \
    p.brand AS product_brand, p.price AS product_price, p.image AS product_image";

/// Provides operations for customer inquiries.
pub struct InquiryRepo;

impl InquiryRepo {
    /// Insert a new inquiry in the initial status. `product_id` is the
    /// already-resolved system id, if any.
    pub async fn create(
        pool: &PgPool,
        input: &CreateInquiry,
        product_id: Option<DbId>,
    ) -> Result<Inquiry, sqlx::Error> {
        let query = format!(
            "WITH i AS ( \
                INSERT INTO inquiries (name, email, phone, message, product_id, status) \
                VALUES ($1, $2, $3, $4, $5, $6) \
                RETURNING * \
             ) \
             SELECT {COLUMNS}, {PRODUCT_COLUMNS} \
             FROM i LEFT JOIN products p ON p.id = i.product_id"
        );
        let row = sqlx::query_as::<_, InquiryRow>(&query)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(&input.message)
            .bind(product_id)
            .bind(InquiryStatus::INITIAL.as_str())
            .fetch_one(pool)
            .await?;
        Ok(row.into())
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Inquiry>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS}, {PRODUCT_COLUMNS} \
             FROM inquiries i LEFT JOIN products p ON p.id = i.product_id \
             WHERE i.id = $1"
        );
        let row = sqlx::query_as::<_, InquiryRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(Inquiry::from))
    }

    /// List inquiries, optionally restricted to one status. Newest first.
    pub async fn list(
        pool: &PgPool,
        status: Option<InquiryStatus>,
    ) -> Result<Vec<Inquiry>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS}, {PRODUCT_COLUMNS} \
             FROM inquiries i LEFT JOIN products p ON p.id = i.product_id \
             WHERE ($1::TEXT IS NULL OR i.status = $1) \
             ORDER BY i.created_at DESC, i.id DESC"
        );
        let rows = sqlx::query_as::<_, InquiryRow>(&query)
            .bind(status.map(|s| s.as_str()))
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(Inquiry::from).collect())
    }

    /// Set the status of an inquiry. Returns the updated inquiry if found.
    pub async fn update_status(
        pool: &PgPool,
        id: DbId,
        status: InquiryStatus,
    ) -> Result<Option<Inquiry>, sqlx::Error> {
        let query = format!(
            "WITH i AS ( \
                UPDATE inquiries SET status = $2 WHERE id = $1 RETURNING * \
             ) \
             SELECT {COLUMNS}, {PRODUCT_COLUMNS} \
             FROM i LEFT JOIN products p ON p.id = i.product_id"
        );
        let row = sqlx::query_as::<_, InquiryRow>(&query)
            .bind(id)
            .bind(status.as_str())
            .fetch_optional(pool)
            .await?;
        Ok(row.map(Inquiry::from))
    }

    /// Hard-delete an inquiry. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM inquiries WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
