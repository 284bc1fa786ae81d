//! Product catalog rules: categories, lifecycle and list filters.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use validator::ValidationError;

use crate::error::CoreError;
use crate::types::DbId;
use crate::validation::trim_optional;

// ---------------------------------------------------------------------------
// Category
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProductCategory {
    Premium,
    MidRange,
    Entry,
}

impl ProductCategory {
    pub const ALL: &'static [ProductCategory] = &[
        ProductCategory::Premium,
        ProductCategory::MidRange,
        ProductCategory::Entry,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ProductCategory::Premium => "premium",
            ProductCategory::MidRange => "mid-range",
            ProductCategory::Entry => "entry",
        }
    }
}

impl fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProductCategory {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProductCategory::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| CoreError::invalid_field("category", "Invalid category"))
    }
}

impl TryFrom<String> for ProductCategory {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// `validator` hook for the raw `category` field of a product payload.
pub fn validate_category(value: &str) -> Result<(), ValidationError> {
    value
        .parse::<ProductCategory>()
        .map(|_| ())
        .map_err(|_| ValidationError::new("category").with_message("Invalid category".into()))
}

// ---------------------------------------------------------------------------
// Lifecycle
// ---------------------------------------------------------------------------

/// Visibility state of a product. Deleting a product retires it; the row
/// is never removed.
///
/// Stored as the `is_active` column and exposed on the wire as `isActive`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProductLifecycle {
    #[default]
    Active,
    Retired,
}

impl ProductLifecycle {
    pub fn is_active(self) -> bool {
        matches!(self, ProductLifecycle::Active)
    }
}

impl From<bool> for ProductLifecycle {
    fn from(is_active: bool) -> Self {
        if is_active {
            ProductLifecycle::Active
        } else {
            ProductLifecycle::Retired
        }
    }
}

impl Serialize for ProductLifecycle {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_bool(self.is_active())
    }
}

impl<'de> Deserialize<'de> for ProductLifecycle {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        bool::deserialize(deserializer).map(ProductLifecycle::from)
    }
}

/// Which products a lookup may return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    /// Public catalog: active products only.
    Catalog,
    /// Back office and reference resolution: active and retired products.
    Any,
}

impl Visibility {
    pub fn includes_retired(self) -> bool {
        matches!(self, Visibility::Any)
    }
}

// ---------------------------------------------------------------------------
// Identifier resolution
// ---------------------------------------------------------------------------

/// Interpret a path or payload identifier as a system id when it is numeric.
///
/// Product identifiers arrive either as the system id or as the external
/// business id; callers try both in the order their operation requires.
pub fn as_system_id(raw: &str) -> Option<DbId> {
    raw.trim().parse::<DbId>().ok().filter(|id| *id > 0)
}

// ---------------------------------------------------------------------------
// List filter
// ---------------------------------------------------------------------------

/// Validated public catalog filter. Every present field is an exact match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    pub brand: Option<String>,
    pub year: Option<String>,
    pub category: Option<ProductCategory>,
}

impl ProductFilter {
    /// Build a filter from raw query values. Blank values are ignored; an
    /// unknown category is rejected before any query is built.
    pub fn from_raw(
        brand: Option<String>,
        year: Option<String>,
        category: Option<String>,
    ) -> Result<Self, CoreError> {
        let category = trim_optional(category)
            .map(|c| c.parse::<ProductCategory>())
            .transpose()?;
        Ok(Self {
            brand: trim_optional(brand),
            year: trim_optional(year),
            category,
        })
    }
}
