//! Sale record rules and reporting windows.

use std::fmt;
use std::str::FromStr;

use chrono::{Duration, Months};
use serde::{Deserialize, Serialize};
use validator::ValidationError;

use crate::error::CoreError;
use crate::types::Timestamp;
use crate::validation::trim_optional;

/// Number of trailing months covered by the monthly stats series.
pub const MONTHLY_WINDOW_MONTHS: u32 = 6;

/// Number of trailing days covered by the daily stats series.
pub const DAILY_WINDOW_DAYS: i64 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SaleStatus {
    #[default]
    Completed,
    Pending,
    Cancelled,
}

impl SaleStatus {
    pub const ALL: &'static [SaleStatus] =
        &[SaleStatus::Completed, SaleStatus::Pending, SaleStatus::Cancelled];

    pub fn as_str(self) -> &'static str {
        match self {
            SaleStatus::Completed => "completed",
            SaleStatus::Pending => "pending",
            SaleStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for SaleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SaleStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SaleStatus::ALL
            .iter()
            .copied()
            .find(|st| st.as_str() == s)
            .ok_or_else(|| CoreError::invalid_field("status", "Invalid status"))
    }
}

impl TryFrom<String> for SaleStatus {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// `validator` hook for the raw `status` field of a sale payload.
pub fn validate_sale_status(value: &str) -> Result<(), ValidationError> {
    value
        .parse::<SaleStatus>()
        .map(|_| ())
        .map_err(|_| ValidationError::new("status").with_message("Invalid status".into()))
}

/// Validated sales list / stats filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SaleFilter {
    pub start_date: Option<Timestamp>,
    pub end_date: Option<Timestamp>,
    pub status: Option<SaleStatus>,
}

impl SaleFilter {
    /// Build a filter from raw query values (RFC 3339 dates).
    pub fn from_raw(
        start_date: Option<String>,
        end_date: Option<String>,
        status: Option<String>,
    ) -> Result<Self, CoreError> {
        let start_date = trim_optional(start_date)
            .map(|s| parse_date(&s, "startDate"))
            .transpose()?;
        let end_date = trim_optional(end_date)
            .map(|s| parse_date(&s, "endDate"))
            .transpose()?;
        if let (Some(start), Some(end)) = (start_date, end_date) {
            if start > end {
                return Err(CoreError::invalid_field(
                    "endDate",
                    "endDate must not be before startDate",
                ));
            }
        }
        let status = trim_optional(status)
            .map(|s| s.parse::<SaleStatus>())
            .transpose()?;
        Ok(Self {
            start_date,
            end_date,
            status,
        })
    }
}

/// Accepts a full RFC 3339 timestamp or a bare `YYYY-MM-DD` date (UTC midnight).
fn parse_date(raw: &str, field: &'static str) -> Result<Timestamp, CoreError> {
    if let Ok(ts) = chrono::DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.with_timezone(&chrono::Utc));
    }
    chrono::NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
        .ok_or_else(|| CoreError::invalid_field(field, format!("Invalid {field}")))
}

/// Start of the trailing monthly stats window.
pub fn monthly_window_start(now: Timestamp) -> Timestamp {
    now.checked_sub_months(Months::new(MONTHLY_WINDOW_MONTHS))
        .unwrap_or(now)
}

/// Start of the trailing daily stats window.
pub fn daily_window_start(now: Timestamp) -> Timestamp {
    now - Duration::days(DAILY_WINDOW_DAYS)
}
