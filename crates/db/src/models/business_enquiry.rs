//! Business enquiry model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use storefront_core::submission::{BusinessEnquiryStatus, EnquiryType};
use storefront_core::types::{DbId, Timestamp};
use storefront_core::validation::{normalize_email, trim_in_place};
use validator::Validate;

/// A row from the `business_enquiries` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessEnquiry {
    pub id: DbId,
    #[sqlx(try_from = "String")]
    pub enquiry_type: EnquiryType,
    pub company_name: String,
    pub contact_name: String,
    pub email: String,
    pub phone: String,
    pub country: String,
    pub message: String,
    #[sqlx(try_from = "String")]
    pub status: BusinessEnquiryStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for the public business enquiry form.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateBusinessEnquiry {
    #[validate(custom(function = "storefront_core::submission::validate_enquiry_type"))]
    pub enquiry_type: String,
    #[validate(length(min = 1, message = "Company name is required"))]
    pub company_name: String,
    #[validate(length(min = 1, message = "Contact name is required"))]
    pub contact_name: String,
    #[validate(custom(function = "storefront_core::validation::validate_email_address"))]
    pub email: String,
    #[validate(length(min = 1, message = "Phone number is required"))]
    pub phone: String,
    #[validate(length(min = 1, message = "Country is required"))]
    pub country: String,
    #[validate(length(min = 1, message = "Message is required"))]
    pub message: String,
}

impl CreateBusinessEnquiry {
    pub fn normalized(mut self) -> Self {
        trim_in_place(&mut self.enquiry_type);
        trim_in_place(&mut self.company_name);
        trim_in_place(&mut self.contact_name);
        normalize_email(&mut self.email);
        trim_in_place(&mut self.phone);
        trim_in_place(&mut self.country);
        trim_in_place(&mut self.message);
        self
    }
}
