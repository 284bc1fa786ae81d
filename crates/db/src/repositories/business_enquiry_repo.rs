//! Repository for the `business_enquiries` table.

use sqlx::PgPool;
use storefront_core::submission::{BusinessEnquiryStatus, SubmissionStatus};
use storefront_core::types::DbId;

use crate::models::business_enquiry::{BusinessEnquiry, CreateBusinessEnquiry};

/// Column list for `business_enquiries` queries.
const COLUMNS: &str = "\
    id, enquiry_type, company_name, contact_name, email, phone, country, \
    message, status, created_at, updated_at";

/// Provides operations for wholesale / partnership enquiries.
pub struct BusinessEnquiryRepo;

impl BusinessEnquiryRepo {
    /// Insert a new enquiry in the initial status. `enquiry_type` must have
    /// been validated already.
    pub async fn create(
        pool: &PgPool,
        input: &CreateBusinessEnquiry,
    ) -> Result<BusinessEnquiry, sqlx::Error> {
        let query = format!(
            "INSERT INTO business_enquiries \
                (enquiry_type, company_name, contact_name, email, phone, country, message, status) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, BusinessEnquiry>(&query)
            .bind(&input.enquiry_type)
            .bind(&input.company_name)
            .bind(&input.contact_name)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(&input.country)
            .bind(&input.message)
            .bind(BusinessEnquiryStatus::INITIAL.as_str())
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<BusinessEnquiry>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM business_enquiries WHERE id = $1");
        sqlx::query_as::<_, BusinessEnquiry>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List enquiries, optionally filtered by status. Newest first.
    pub async fn list(
        pool: &PgPool,
        status: Option<BusinessEnquiryStatus>,
    ) -> Result<Vec<BusinessEnquiry>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM business_enquiries \
             WHERE ($1::TEXT IS NULL OR status = $1) \
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, BusinessEnquiry>(&query)
            .bind(status.map(|s| s.as_str()))
            .fetch_all(pool)
            .await
    }

    pub async fn update_status(
        pool: &PgPool,
        id: DbId,
        status: BusinessEnquiryStatus,
    ) -> Result<Option<BusinessEnquiry>, sqlx::Error> {
        let query = format!(
            "UPDATE business_enquiries SET status = $2 WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, BusinessEnquiry>(&query)
            .bind(id)
            .bind(status.as_str())
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM business_enquiries WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
