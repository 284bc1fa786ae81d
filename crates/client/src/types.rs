//! Wire types for requests and responses.
//!
//! Responses reuse the shared status and category enums from
//! `storefront_core`, so an unknown status coming back from the server is a
//! decode error rather than a silently passed-through string.

use serde::{Deserialize, Serialize};
use storefront_core::error::FieldError;
use storefront_core::product::ProductCategory;
use storefront_core::sale::SaleStatus;
use storefront_core::submission::{
    BusinessEnquiryStatus, ContactStatus, EnquiryType, InquiryStatus,
};
use storefront_core::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Envelope
// ---------------------------------------------------------------------------

/// The `{ success, data, ... }` body every API response is wrapped in.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    pub data: Option<T>,
    pub count: Option<usize>,
    pub message: Option<String>,
    pub code: Option<String>,
    #[serde(default)]
    pub errors: Vec<FieldError>,
    #[serde(default)]
    pub warnings: Vec<String>,
}

/// A public submission as accepted by the server, plus any non-fatal
/// warnings (an unresolved product reference, for instance).
#[derive(Debug, Clone)]
pub struct Accepted<T> {
    pub record: T,
    pub warnings: Vec<String>,
}

// ---------------------------------------------------------------------------
// Auth
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub role: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthPayload {
    pub token: String,
    pub expires_in: i64,
    pub user: User,
}

#[derive(Debug, Serialize)]
pub struct Credentials<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Serialize)]
pub struct Registration<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password: &'a str,
}

// ---------------------------------------------------------------------------
// Products
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: DbId,
    pub external_id: String,
    pub name: String,
    pub brand: String,
    pub price: f64,
    pub year: String,
    pub image: String,
    pub description: String,
    pub features: Vec<String>,
    pub category: ProductCategory,
    pub stock: i32,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Product projection embedded in inquiries and sales.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductSummary {
    pub id: DbId,
    pub external_id: String,
    pub name: String,
    pub brand: String,
    pub price: f64,
    pub image: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub external_id: String,
    pub name: String,
    pub brand: String,
    pub price: f64,
    pub year: String,
    pub image: String,
    pub description: String,
    pub features: Vec<String>,
    pub category: ProductCategory,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock: Option<i32>,
}

/// Partial product update; `None` fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub features: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<ProductCategory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

/// Exact-match catalog filter for `GET /products`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProductQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<ProductCategory>,
}

// ---------------------------------------------------------------------------
// Submissions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Inquiry {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: Option<String>,
    pub product_id: Option<DbId>,
    pub product: Option<ProductSummary>,
    pub status: InquiryStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewInquiry {
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// External business id or system id of the product asked about.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub status: ContactStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewContact {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessEnquiry {
    pub id: DbId,
    pub enquiry_type: EnquiryType,
    pub company_name: String,
    pub contact_name: String,
    pub email: String,
    pub phone: String,
    pub country: String,
    pub message: String,
    pub status: BusinessEnquiryStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBusinessEnquiry {
    pub enquiry_type: EnquiryType,
    pub company_name: String,
    pub contact_name: String,
    pub email: String,
    pub phone: String,
    pub country: String,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct StatusChange<'a> {
    pub status: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct StatusQuery<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<&'a str>,
}

/// Body of a successful delete.
#[derive(Debug, Clone, Deserialize)]
pub struct Deleted {
    pub id: DbId,
}

// ---------------------------------------------------------------------------
// Sales
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
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

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSale {
    pub product_id: DbId,
    pub customer_name: String,
    pub customer_email: String,
    pub quantity: i32,
    pub unit_price: f64,
    pub total_amount: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sale_date: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<SaleStatus>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_id: Option<DbId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sale_date: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<SaleStatus>,
}

/// Date window and status filter for the sales list and stats.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<Timestamp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<SaleStatus>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct MonthlyTotal {
    pub year: i32,
    pub month: i32,
    pub total: f64,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct DailyTotal {
    pub year: i32,
    pub month: i32,
    pub day: i32,
    pub total: f64,
    pub count: i64,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SalesStats {
    pub total_sales: f64,
    pub monthly_sales: Vec<MonthlyTotal>,
    pub daily_sales: Vec<DailyTotal>,
}
