//! Contact message model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use storefront_core::submission::ContactStatus;
use storefront_core::types::{DbId, Timestamp};
use storefront_core::validation::{normalize_email, trim_in_place};
use validator::Validate;

/// A row from the `contacts` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    #[sqlx(try_from = "String")]
    pub status: ContactStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for the public contact form.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct CreateContact {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(custom(function = "storefront_core::validation::validate_email_address"))]
    pub email: String,
    #[validate(length(min = 1, message = "Subject is required"))]
    pub subject: String,
    #[validate(length(min = 1, message = "Message is required"))]
    pub message: String,
}

impl CreateContact {
    pub fn normalized(mut self) -> Self {
        trim_in_place(&mut self.name);
        normalize_email(&mut self.email);
        trim_in_place(&mut self.subject);
        trim_in_place(&mut self.message);
        self
    }
}
