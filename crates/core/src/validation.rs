//! Input normalization and `validator` error flattening.
//!
//! Request DTOs derive [`validator::Validate`]; handlers call
//! [`validate_input`] which turns a failed validation into
//! [`CoreError::InvalidFields`] with one entry per failing field, using the
//! camelCase field names clients send.

use validator::{Validate, ValidateEmail, ValidationError, ValidationErrors};

use crate::error::{CoreError, FieldError};

/// Run `validator` rules on `input`, mapping failures to field-level errors.
pub fn validate_input<T: Validate>(input: &T) -> Result<(), CoreError> {
    input
        .validate()
        .map_err(|errors| CoreError::InvalidFields(collect_field_errors(&errors)))
}

/// Flatten `ValidationErrors` into a stable, field-sorted list.
pub fn collect_field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut out: Vec<FieldError> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            let field = to_camel_case(&field);
            errs.iter().map(move |e| {
                let message = e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Invalid value for {field} ({})", e.code));
                FieldError::new(field.clone(), message)
            })
        })
        .collect();
    out.sort_by(|a, b| a.field.cmp(&b.field));
    out
}

/// Convert a Rust `snake_case` field name to the `camelCase` used on the wire.
pub fn to_camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper_next = false;
    for ch in field.chars() {
        if ch == '_' {
            upper_next = true;
        } else if upper_next {
            out.extend(ch.to_uppercase());
            upper_next = false;
        } else {
            out.push(ch);
        }
    }
    out
}

/// `validator` hook for email fields: the HTML5 address check plus a dotted
/// domain, so `jo@acme` is refused.
pub fn validate_email_address(value: &str) -> Result<(), ValidationError> {
    let dotted_domain = value.rsplit_once('@').is_some_and(|(_, domain)| {
        domain.contains('.') && domain.split('.').all(|label| !label.is_empty())
    });
    if value.validate_email() && dotted_domain {
        Ok(())
    } else {
        Err(ValidationError::new("email").with_message("Please provide a valid email".into()))
    }
}

/// Trim surrounding whitespace in place without reallocating when clean.
pub fn trim_in_place(value: &mut String) {
    let trimmed = value.trim();
    if trimmed.len() != value.len() {
        *value = trimmed.to_string();
    }
}

/// Emails are stored trimmed and lower-cased.
pub fn normalize_email(value: &mut String) {
    trim_in_place(value);
    *value = value.to_lowercase();
}

/// Trim an optional string, collapsing whitespace-only values to `None`.
pub fn trim_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
