//! Sale record model, DTOs and report rows.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use storefront_core::sale::SaleStatus;
use storefront_core::types::{DbId, Timestamp};
use storefront_core::validation::{normalize_email, trim_in_place};
use validator::Validate;

use super::product::ProductSummary;

/// A `sales` row joined with the referenced product's summary columns.
#[derive(Debug, Clone, FromRow)]
pub struct SaleRow {
    pub id: DbId,
    pub product_id: DbId,
    pub customer_name: String,
    pub customer_email: String,
    pub quantity: i32,
    pub unit_price: f64,
    pub total_amount: f64,
    pub sale_date: Timestamp,
    #[sqlx(try_from = "String")]
    pub status: SaleStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub product_external_id: String,
    pub product_name: String,
    pub product_brand: String,
    pub product_price: f64,
    pub product_image: String,
}

/// Sale as returned by the API.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    pub id: DbId,
    pub product_id: DbId,
    pub product: ProductSummary,
    pub customer_name: String,
    pub customer_email: String,
    pub quantity: i32,
    pub unit_price: f64,
    pub total_amount: f64,
    pub sale_date: Timestamp,
    pub status: SaleStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<SaleRow> for Sale {
    fn from(row: SaleRow) -> Self {
        Self {
            id: row.id,
            product_id: row.product_id,
            product: ProductSummary {
                id: row.product_id,
                external_id: row.product_external_id,
                name: row.product_name,
                brand: row.product_brand,
                price: row.product_price,
                image: row.product_image,
            },
            customer_name: row.customer_name,
            customer_email: row.customer_email,
            quantity: row.quantity,
            unit_price: row.unit_price,
            total_amount: row.total_amount,
            sale_date: row.sale_date,
            status: row.status,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// DTO for recording a sale.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateSale {
    #[validate(required(message = "Invalid product ID"))]
    pub product_id: Option<DbId>,
    #[validate(length(min = 1, message = "Customer name is required"))]
    pub customer_name: String,
    #[validate(custom(function = "storefront_core::validation::validate_email_address"))]
    pub customer_email: String,
    #[validate(
        required(message = "Quantity is required"),
        range(min = 1, message = "Quantity must be at least 1")
    )]
    pub quantity: Option<i32>,
    #[validate(
        required(message = "Unit price is required"),
        range(min = 0.0, message = "Unit price must be positive")
    )]
    pub unit_price: Option<f64>,
    #[validate(
        required(message = "Total amount is required"),
        range(min = 0.0, message = "Total amount must be positive")
    )]
    pub total_amount: Option<f64>,
    pub sale_date: Option<Timestamp>,
    #[validate(custom(function = "storefront_core::sale::validate_sale_status"))]
    pub status: Option<String>,
}

impl CreateSale {
    pub fn normalized(mut self) -> Self {
        trim_in_place(&mut self.customer_name);
        normalize_email(&mut self.customer_email);
        if let Some(status) = self.status.as_mut() {
            trim_in_place(status);
        }
        self
    }

    /// Status to persist: the requested one, or `completed`.
    pub fn status(&self) -> SaleStatus {
        self.status
            .as_deref()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }
}

/// DTO for a partial sale update.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct UpdateSale {
    pub product_id: Option<DbId>,
    #[validate(length(min = 1, message = "Customer name must not be empty"))]
    pub customer_name: Option<String>,
    #[validate(custom(function = "storefront_core::validation::validate_email_address"))]
    pub customer_email: Option<String>,
    #[validate(range(min = 1, message = "Quantity must be at least 1"))]
    pub quantity: Option<i32>,
    #[validate(range(min = 0.0, message = "Unit price must be positive"))]
    pub unit_price: Option<f64>,
    #[validate(range(min = 0.0, message = "Total amount must be positive"))]
    pub total_amount: Option<f64>,
    pub sale_date: Option<Timestamp>,
    #[validate(custom(function = "storefront_core::sale::validate_sale_status"))]
    pub status: Option<String>,
}

impl UpdateSale {
    pub fn normalized(mut self) -> Self {
        if let Some(name) = self.customer_name.as_mut() {
            trim_in_place(name);
        }
        if let Some(email) = self.customer_email.as_mut() {
            normalize_email(email);
        }
        if let Some(status) = self.status.as_mut() {
            trim_in_place(status);
        }
        self
    }

    pub fn status(&self) -> Option<SaleStatus> {
        self.status.as_deref().and_then(|s| s.parse().ok())
    }
}

/// Raw query parameters for `GET /sales` and `GET /sales/stats`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleListParams {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub status: Option<String>,
}

/// Completed-sale total for one calendar month.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, PartialEq)]
pub struct MonthlyTotal {
    pub year: i32,
    pub month: i32,
    pub total: f64,
}

/// Completed-sale total and count for one calendar day.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, PartialEq)]
pub struct DailyTotal {
    pub year: i32,
    pub month: i32,
    pub day: i32,
    pub total: f64,
    pub count: i64,
}

/// Aggregate figures for the admin dashboard.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct SalesStats {
    pub total_sales: f64,
    pub monthly_sales: Vec<MonthlyTotal>,
    pub daily_sales: Vec<DailyTotal>,
}
