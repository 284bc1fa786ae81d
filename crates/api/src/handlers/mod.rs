//! HTTP handlers, one module per resource.

pub mod auth;
pub mod business_enquiries;
pub mod contacts;
pub mod health;
pub mod inquiries;
pub mod products;
pub mod sales;

use storefront_core::error::CoreError;
use storefront_core::submission::SubmissionStatus;
use storefront_core::validation::trim_optional;

/// Parse an optional `?status=` list filter against a submission's status set.
pub(crate) fn parse_status_filter<S: SubmissionStatus>(
    raw: Option<String>,
) -> Result<Option<S>, CoreError> {
    trim_optional(raw).map(|s| S::parse(&s)).transpose()
}
