//! Inquiry entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use storefront_core::submission::InquiryStatus;
use storefront_core::types::{DbId, Timestamp};
use storefront_core::validation::{normalize_email, trim_in_place, trim_optional};
use validator::Validate;

use super::product::ProductSummary;

/// An `inquiries` row left-joined with the referenced product's summary columns.
#[derive(Debug, Clone, FromRow)]
pub struct InquiryRow {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: Option<String>,
    pub product_id: Option<DbId>,
    #[sqlx(try_from = "String")]
    pub status: InquiryStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub product_external_id: Option<String>,
    pub product_name: Option<String>,
    pub product_brand: Option<String>,
    pub product_price: Option<f64>,
    pub product_image: Option<String>,
}

/// Inquiry as returned by the API, with the product projection resolved.
#[derive(Debug, Clone, Serialize)]
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

impl From<InquiryRow> for Inquiry {
    fn from(row: InquiryRow) -> Self {
        let product = match (
            row.product_id,
            row.product_external_id,
            row.product_name,
            row.product_brand,
            row.product_price,
            row.product_image,
        ) {
            (Some(id), Some(external_id), Some(name), Some(brand), Some(price), Some(image)) => {
                Some(ProductSummary {
                    id,
                    external_id,
                    name,
                    brand,
                    price,
                    image,
                })
            }
            _ => None,
        };

        Self {
            id: row.id,
            name: row.name,
            email: row.email,
            phone: row.phone,
            message: row.message,
            product_id: row.product_id,
            product,
            status: row.status,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// DTO for the public inquiry form.
///
/// Any `status` sent by the client is ignored: inquiries always start
/// in [`InquiryStatus::Pending`].
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateInquiry {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(custom(function = "storefront_core::validation::validate_email_address"))]
    pub email: String,
    #[validate(length(min = 1, message = "Phone number is required"))]
    pub phone: String,
    pub message: Option<String>,
    /// External business id or system id of the product asked about.
    #[serde(deserialize_with = "super::string_or_number")]
    pub product_id: Option<String>,
}

impl CreateInquiry {
    pub fn normalized(mut self) -> Self {
        trim_in_place(&mut self.name);
        normalize_email(&mut self.email);
        trim_in_place(&mut self.phone);
        self.message = trim_optional(self.message);
        self.product_id = trim_optional(self.product_id);
        self
    }
}
