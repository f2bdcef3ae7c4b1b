// Field validators for registration and project input
//
// Pure functions. The `validate_*` ones just answer yes/no, the `parse_*`
// ones hand back typed values and an error the console can show.

use crate::error::{CrowdfundError, Result};
use chrono::{Datelike, NaiveDate};
use regex::Regex;
use std::sync::LazyLock;

/// Date format accepted everywhere (YYYY-MM-DD)
pub const DATE_FORMAT: &str = "%Y-%m-%d";

// Mobile numbers: 11 digits, one of the four carrier prefixes
static PHONE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(010|011|012|015)[0-9]{8}$").expect("phone pattern compiles"));

// Format-level only, not RFC 5322
static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9_.+-]+@[a-zA-Z0-9-]+\.[a-zA-Z0-9.-]+$").expect("email pattern compiles")
});

// chrono alone would take "2025-1-5", so pin the shape first
static DATE_SHAPE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("date pattern compiles"));

/// Check a mobile phone number
pub fn validate_phone(phone: &str) -> bool {
    PHONE_REGEX.is_match(phone)
}

/// Check an email address format
pub fn validate_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

/// Check that a string is a real calendar date in YYYY-MM-DD form
pub fn validate_date(date: &str) -> bool {
    parse_date(date).is_ok()
}

/// Parse a YYYY-MM-DD date
///
/// Year 0000 is rejected along with impossible days like 2023-02-29.
pub fn parse_date(date: &str) -> Result<NaiveDate> {
    if !DATE_SHAPE_REGEX.is_match(date) {
        return Err(CrowdfundError::InvalidDate(date.to_string()));
    }

    NaiveDate::parse_from_str(date, DATE_FORMAT)
        .ok()
        .filter(|parsed| parsed.year() >= 1)
        .ok_or_else(|| CrowdfundError::InvalidDate(date.to_string()))
}

/// Parse a target amount
///
/// Any finite decimal is accepted, including zero and negatives.
pub fn parse_amount(raw: &str) -> Result<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|amount| amount.is_finite())
        .ok_or_else(|| CrowdfundError::InvalidAmount(raw.to_string()))
}
