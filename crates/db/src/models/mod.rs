//! Row models and request DTOs, one module per table.

pub mod business_enquiry;
pub mod contact;
pub mod inquiry;
pub mod product;
pub mod sale;
pub mod user;

use serde::{Deserialize, Deserializer};

/// Request body for `PUT /{submission}/{id}/status`. The value is parsed
/// against the entity's status set by the handler so an unknown status is
/// a validation error rather than a decode failure.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UpdateStatus {
    pub status: String,
}

/// Query parameters for admin submission lists.
#[derive(Debug, Default, Deserialize)]
pub struct SubmissionListParams {
    pub status: Option<String>,
}

/// Accept an identifier sent either as a JSON string or a JSON number.
///
/// Public forms post product references in whichever form they have at
/// hand (external business id or numeric system id).
pub(crate) fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(i64),
    }

    Ok(Option::<Raw>::deserialize(deserializer)?.map(|raw| match raw {
        Raw::Text(s) => s,
        Raw::Number(n) => n.to_string(),
    }))
}
