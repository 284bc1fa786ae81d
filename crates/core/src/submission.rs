//! Status lifecycles for public submissions (inquiries, contacts and
//! business enquiries).
//!
//! Each submission type has its own closed status set and always starts in
//! `pending`. Transitions are free: an admin may move a submission from any
//! status to any other, including back to `pending`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use validator::ValidationError;

use crate::error::CoreError;

/// Behaviour shared by every submission status enum.
pub trait SubmissionStatus: Copy + Eq + fmt::Debug + Send + Sync + 'static {
    /// Entity name used in error messages and logs.
    const ENTITY: &'static str;
    /// Status assigned at creation, regardless of client input.
    const INITIAL: Self;
    /// Every member of the status set, in display order.
    const ALL: &'static [Self];

    /// Wire and storage representation.
    fn as_str(self) -> &'static str;

    /// Parse a wire value, rejecting anything outside the status set as a
    /// field error on `status`.
    fn parse(value: &str) -> Result<Self, CoreError> {
        Self::ALL
            .iter()
            .copied()
            .find(|s| s.as_str() == value)
            .ok_or_else(|| CoreError::invalid_field("status", "Invalid status"))
    }

    /// Whether `self -> next` is permitted. Every status is reachable from
    /// every other.
    fn can_transition_to(self, _next: Self) -> bool {
        true
    }
}

/// Validate a requested transition for any submission type.
pub fn validate_transition<S: SubmissionStatus>(current: S, next: S) -> Result<(), CoreError> {
    if current.can_transition_to(next) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Cannot transition {} from '{}' to '{}'",
            S::ENTITY,
            current.as_str(),
            next.as_str()
        )))
    }
}

/// Implements `Display`, `FromStr` and `TryFrom<String>` (used by `sqlx`
/// row decoding) in terms of [`SubmissionStatus`].
macro_rules! status_conversions {
    ($ty:ty) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = CoreError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                <$ty as SubmissionStatus>::parse(s)
            }
        }

        impl TryFrom<String> for $ty {
            type Error = CoreError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                value.parse()
            }
        }
    };
}

// ---------------------------------------------------------------------------
// Inquiry
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InquiryStatus {
    Pending,
    Contacted,
    Resolved,
}

impl SubmissionStatus for InquiryStatus {
    const ENTITY: &'static str = "Inquiry";
    const INITIAL: Self = InquiryStatus::Pending;
    const ALL: &'static [Self] = &[
        InquiryStatus::Pending,
        InquiryStatus::Contacted,
        InquiryStatus::Resolved,
    ];

    fn as_str(self) -> &'static str {
        match self {
            InquiryStatus::Pending => "pending",
            InquiryStatus::Contacted => "contacted",
            InquiryStatus::Resolved => "resolved",
        }
    }
}

status_conversions!(InquiryStatus);

// ---------------------------------------------------------------------------
// Contact
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactStatus {
    Pending,
    Replied,
    Resolved,
}

impl SubmissionStatus for ContactStatus {
    const ENTITY: &'static str = "Contact";
    const INITIAL: Self = ContactStatus::Pending;
    const ALL: &'static [Self] = &[
        ContactStatus::Pending,
        ContactStatus::Replied,
        ContactStatus::Resolved,
    ];

    fn as_str(self) -> &'static str {
        match self {
            ContactStatus::Pending => "pending",
            ContactStatus::Replied => "replied",
            ContactStatus::Resolved => "resolved",
        }
    }
}

status_conversions!(ContactStatus);

// ---------------------------------------------------------------------------
// Business enquiry
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BusinessEnquiryStatus {
    Pending,
    Reviewing,
    Contacted,
    Rejected,
    Approved,
}

impl SubmissionStatus for BusinessEnquiryStatus {
    const ENTITY: &'static str = "BusinessEnquiry";
    const INITIAL: Self = BusinessEnquiryStatus::Pending;
    const ALL: &'static [Self] = &[
        BusinessEnquiryStatus::Pending,
        BusinessEnquiryStatus::Reviewing,
        BusinessEnquiryStatus::Contacted,
        BusinessEnquiryStatus::Rejected,
        BusinessEnquiryStatus::Approved,
    ];

    fn as_str(self) -> &'static str {
        match self {
            BusinessEnquiryStatus::Pending => "pending",
            BusinessEnquiryStatus::Reviewing => "reviewing",
            BusinessEnquiryStatus::Contacted => "contacted",
            BusinessEnquiryStatus::Rejected => "rejected",
            BusinessEnquiryStatus::Approved => "approved",
        }
    }
}

status_conversions!(BusinessEnquiryStatus);

/// Kind of partnership a business enquiry is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnquiryType {
    Wholesale,
    Sponsorship,
    Distribution,
    Partnership,
}

impl EnquiryType {
    pub const ALL: &'static [EnquiryType] = &[
        EnquiryType::Wholesale,
        EnquiryType::Sponsorship,
        EnquiryType::Distribution,
        EnquiryType::Partnership,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            EnquiryType::Wholesale => "wholesale",
            EnquiryType::Sponsorship => "sponsorship",
            EnquiryType::Distribution => "distribution",
            EnquiryType::Partnership => "partnership",
        }
    }
}

impl fmt::Display for EnquiryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EnquiryType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EnquiryType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| CoreError::invalid_field("enquiryType", "Invalid enquiry type"))
    }
}

impl TryFrom<String> for EnquiryType {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// `validator` hook for the raw `enquiryType` field of a create payload.
pub fn validate_enquiry_type(value: &str) -> Result<(), ValidationError> {
    value
        .parse::<EnquiryType>()
        .map(|_| ())
        .map_err(|_| {
            ValidationError::new("enquiry_type").with_message("Invalid enquiry type".into())
        })
}
