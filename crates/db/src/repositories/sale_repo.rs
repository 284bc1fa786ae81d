//! Repository for the `sales` table and its reporting aggregates.

use sqlx::PgPool;
use storefront_core::sale::{SaleFilter, SaleStatus};
use storefront_core::types::{DbId, Timestamp};

use crate::models::sale::{CreateSale, DailyTotal, MonthlyTotal, Sale, SaleRow, UpdateSale};

/// Sale columns qualified with the `s` alias.
const COLUMNS: &str = "\
    s.id, s.product_id, s.customer_name, s.customer_email, s.quantity, \
    s.unit_price, s.total_amount, s.sale_date, s.status, s.created_at, s.updated_at";

/// Product summary columns from the joined `p` alias.
const PRODUCT_COLUMNS: &str = "\
    p.external_id AS product_external_id, p.name AS product_name, \
    p.brand AS product_brand, p.price AS product_price, p.image AS product_image";

/// Provides CRUD and reporting queries for sales.
pub struct SaleRepo;

impl SaleRepo {
    /// Record a sale. `sale_date` defaults to now; `product_id` must refer
    /// to an existing product.
    pub async fn create(pool: &PgPool, input: &CreateSale) -> Result<Sale, sqlx::Error> {
        let query = format!(
            "WITH s AS ( \
                INSERT INTO sales \
                    (product_id, customer_name, customer_email, quantity, \
                     unit_price, total_amount, sale_date, status) \
                VALUES ($1, $2, $3, $4, $5, $6, COALESCE($7, NOW()), $8) \
                RETURNING * \
             ) \
             SELECT {COLUMNS}, {PRODUCT_COLUMNS} \
             FROM s JOIN products p ON p.id = s.product_id"
        );
        let row = sqlx::query_as::<_, SaleRow>(&query)
            .bind(input.product_id)
            .bind(&input.customer_name)
            .bind(&input.customer_email)
            .bind(input.quantity.unwrap_or(1))
            .bind(input.unit_price.unwrap_or_default())
            .bind(input.total_amount.unwrap_or_default())
            .bind(input.sale_date)
            .bind(input.status().as_str())
            .fetch_one(pool)
            .await?;
        Ok(row.into())
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Sale>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS}, {PRODUCT_COLUMNS} \
             FROM sales s JOIN products p ON p.id = s.product_id \
             WHERE s.id = $1"
        );
        let row = sqlx::query_as::<_, SaleRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(Sale::from))
    }

    /// List sales matching the filter, most recent `sale_date` first.
    pub async fn list(pool: &PgPool, filter: &SaleFilter) -> Result<Vec<Sale>, sqlx::Error> {
        let mut conditions: Vec<String> = Vec::new();
        let mut param_idx: usize = 1;

        if filter.start_date.is_some() {
            conditions.push(format!("s.sale_date >= ${param_idx}"));
            param_idx += 1;
        }
        if filter.end_date.is_some() {
            conditions.push(format!("s.sale_date <= ${param_idx}"));
            param_idx += 1;
        }
        if filter.status.is_some() {
            conditions.push(format!("s.status = ${param_idx}"));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let query = format!(
            "SELECT {COLUMNS}, {PRODUCT_COLUMNS} \
             FROM sales s JOIN products p ON p.id = s.product_id \
             {where_clause} \
             ORDER BY s.sale_date DESC, s.id DESC"
        );

        let mut q = sqlx::query_as::<_, SaleRow>(&query);
        if let Some(start) = filter.start_date {
            q = q.bind(start);
        }
        if let Some(end) = filter.end_date {
            q = q.bind(end);
        }
        if let Some(status) = filter.status {
            q = q.bind(status.as_str());
        }

        let rows = q.fetch_all(pool).await?;
        Ok(rows.into_iter().map(Sale::from).collect())
    }

    /// Apply a partial update. Returns `None` if the sale does not exist.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateSale,
    ) -> Result<Option<Sale>, sqlx::Error> {
        let query = format!(
            "WITH s AS ( \
                UPDATE sales SET \
                    product_id = COALESCE($2, product_id), \
                    customer_name = COALESCE($3, customer_name), \
                    customer_email = COALESCE($4, customer_email), \
                    quantity = COALESCE($5, quantity), \
                    unit_price = COALESCE($6, unit_price), \
                    total_amount = COALESCE($7, total_amount), \
                    sale_date = COALESCE($8, sale_date), \
                    status = COALESCE($9, status) \
                WHERE id = $1 \
                RETURNING * \
             ) \
             SELECT {COLUMNS}, {PRODUCT_COLUMNS} \
             FROM s JOIN products p ON p.id = s.product_id"
        );
        let row = sqlx::query_as::<_, SaleRow>(&query)
            .bind(id)
            .bind(input.product_id)
            .bind(&input.customer_name)
            .bind(&input.customer_email)
            .bind(input.quantity)
            .bind(input.unit_price)
            .bind(input.total_amount)
            .bind(input.sale_date)
            .bind(input.status().map(SaleStatus::as_str))
            .fetch_optional(pool)
            .await?;
        Ok(row.map(Sale::from))
    }

    /// Delete a sale. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM sales WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Sum of completed `total_amount`, optionally bounded by sale date.
    pub async fn total_completed(
        pool: &PgPool,
        start: Option<Timestamp>,
        end: Option<Timestamp>,
    ) -> Result<f64, sqlx::Error> {
        sqlx::query_scalar::<_, f64>(
            "SELECT COALESCE(SUM(total_amount), 0)::DOUBLE PRECISION \
             FROM sales \
             WHERE status = $1 \
               AND ($2::TIMESTAMPTZ IS NULL OR sale_date >= $2) \
               AND ($3::TIMESTAMPTZ IS NULL OR sale_date <= $3)",
        )
        .bind(SaleStatus::Completed.as_str())
        .bind(start)
        .bind(end)
        .fetch_one(pool)
        .await
    }

    /// Completed totals per calendar month since `since`, oldest first.
    pub async fn monthly_totals(
        pool: &PgPool,
        since: Timestamp,
    ) -> Result<Vec<MonthlyTotal>, sqlx::Error> {
        sqlx::query_as::<_, MonthlyTotal>(
            "SELECT EXTRACT(YEAR FROM sale_date)::INT AS year, \
                    EXTRACT(MONTH FROM sale_date)::INT AS month, \
                    SUM(total_amount)::DOUBLE PRECISION AS total \
             FROM sales \
             WHERE status = $1 AND sale_date >= $2 \
             GROUP BY 1, 2 \
             ORDER BY 1, 2",
        )
        .bind(SaleStatus::Completed.as_str())
        .bind(since)
        .fetch_all(pool)
        .await
    }

    /// Completed totals and counts per calendar day since `since`, oldest first.
    pub async fn daily_totals(
        pool: &PgPool,
        since: Timestamp,
    ) -> Result<Vec<DailyTotal>, sqlx::Error> {
        sqlx::query_as::<_, DailyTotal>(
            "SELECT EXTRACT(YEAR FROM sale_date)::INT AS year, \
                    EXTRACT(MONTH FROM sale_date)::INT AS month, \
                    EXTRACT(DAY FROM sale_date)::INT AS day, \
                    SUM(total_amount)::DOUBLE PRECISION AS total, \
                    COUNT(*) AS count \
             FROM sales \
             WHERE status = $1 AND sale_date >= $2 \
             GROUP BY 1, 2, 3 \
             ORDER BY 1, 2, 3",
        )
        .bind(SaleStatus::Completed.as_str())
        .bind(since)
        .fetch_all(pool)
        .await
    }
}
