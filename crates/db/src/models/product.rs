//! Product entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use storefront_core::product::{ProductCategory, ProductLifecycle};
use storefront_core::types::{DbId, Timestamp};
use storefront_core::validation::trim_in_place;
use validator::Validate;

/// A row from the `products` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: DbId,
    /// Author-assigned business identifier, unique across the catalog.
    pub external_id: String,
    pub name: String,
    pub brand: String,
    pub price: f64,
    pub year: String,
    pub image: String,
    pub description: String,
    pub features: Vec<String>,
    #[sqlx(try_from = "String")]
    pub category: ProductCategory,
    pub stock: i32,
    #[sqlx(rename = "is_active", try_from = "bool")]
    #[serde(rename = "isActive")]
    pub lifecycle: ProductLifecycle,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Shallow product projection embedded in inquiries and sales.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductSummary {
    pub id: DbId,
    pub external_id: String,
    pub name: String,
    pub brand: String,
    pub price: f64,
    pub image: String,
}

impl From<&Product> for ProductSummary {
    fn from(p: &Product) -> Self {
        Self {
            id: p.id,
            external_id: p.external_id.clone(),
            name: p.name.clone(),
            brand: p.brand.clone(),
            price: p.price,
            image: p.image.clone(),
        }
    }
}

/// DTO for creating a product. Fields are defaulted so that missing values
/// surface as field-level validation errors instead of a decode failure.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateProduct {
    #[serde(alias = "id")]
    #[validate(length(min = 1, message = "Product ID is required"))]
    pub external_id: String,
    #[validate(length(min = 1, message = "Product name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "Brand is required"))]
    pub brand: String,
    #[validate(
        required(message = "Price is required"),
        range(min = 0.0, message = "Price must be a positive number")
    )]
    pub price: Option<f64>,
    #[validate(length(min = 1, message = "Year is required"))]
    pub year: String,
    #[validate(length(min = 1, message = "Image URL is required"))]
    pub image: String,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
    pub features: Vec<String>,
    #[validate(custom(function = "storefront_core::product::validate_category"))]
    pub category: String,
    #[validate(range(min = 0, message = "Stock cannot be negative"))]
    pub stock: Option<i32>,
}

impl CreateProduct {
    /// Trim string fields before validation.
    pub fn normalized(mut self) -> Self {
        for field in [
            &mut self.external_id,
            &mut self.name,
            &mut self.brand,
            &mut self.year,
            &mut self.image,
            &mut self.description,
            &mut self.category,
        ] {
            trim_in_place(field);
        }
        self.features = normalize_features(self.features);
        self
    }
}

/// DTO for a partial product update. Present fields follow the same rules
/// as [`CreateProduct`]; `isActive` retires or restores the product.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct UpdateProduct {
    #[serde(alias = "id")]
    #[validate(length(min = 1, message = "Product ID must not be empty"))]
    pub external_id: Option<String>,
    #[validate(length(min = 1, message = "Product name must not be empty"))]
    pub name: Option<String>,
    #[validate(length(min = 1, message = "Brand must not be empty"))]
    pub brand: Option<String>,
    #[validate(range(min = 0.0, message = "Price must be a positive number"))]
    pub price: Option<f64>,
    #[validate(length(min = 1, message = "Year must not be empty"))]
    pub year: Option<String>,
    #[validate(length(min = 1, message = "Image URL must not be empty"))]
    pub image: Option<String>,
    #[validate(length(min = 1, message = "Description must not be empty"))]
    pub description: Option<String>,
    pub features: Option<Vec<String>>,
    #[validate(custom(function = "storefront_core::product::validate_category"))]
    pub category: Option<String>,
    #[validate(range(min = 0, message = "Stock cannot be negative"))]
    pub stock: Option<i32>,
    pub is_active: Option<bool>,
}

impl UpdateProduct {
    pub fn normalized(mut self) -> Self {
        for field in [
            &mut self.external_id,
            &mut self.name,
            &mut self.brand,
            &mut self.year,
            &mut self.image,
            &mut self.description,
            &mut self.category,
        ]
        .into_iter()
        .flatten()
        {
            trim_in_place(field);
        }
        self.features = self.features.map(normalize_features);
        self
    }

    pub fn lifecycle(&self) -> Option<ProductLifecycle> {
        self.is_active.map(ProductLifecycle::from)
    }
}

fn normalize_features(features: Vec<String>) -> Vec<String> {
    features
        .into_iter()
        .map(|f| f.trim().to_string())
        .filter(|f| !f.is_empty())
        .collect()
}

/// Raw query parameters for `GET /products`.
#[derive(Debug, Default, Deserialize)]
pub struct ProductListParams {
    pub brand: Option<String>,
    pub year: Option<String>,
    pub category: Option<String>,
}
