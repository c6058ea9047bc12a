//! Delivery-date formatting contract.
//!
//! Dates arrive as free text from forms and command lines. Anything parseable
//! is normalized to `MM-DD-YYYY`; anything else passes through untouched.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Display format used on documents and inside invoice numbers.
pub const DELIVERY_DATE_FORMAT: &str = "%m-%d-%Y";

const DATE_FORMATS: [&str; 3] = ["%m-%d-%Y", "%m/%d/%Y", "%Y-%m-%d"];
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parse `MM-DD-YYYY`, `MM/DD/YYYY`, `YYYY-MM-DD` or an ISO-8601 timestamp.
pub fn parse_delivery_date(input: &str) -> Option<NaiveDate> {
    let s = input.trim();
    if s.is_empty() {
        return None;
    }

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive()))
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
                .map(|dt| dt.date())
        })
}

/// Normalize to `MM-DD-YYYY`; unparseable input is returned unchanged.
pub fn format_delivery_date(input: &str) -> String {
    match parse_delivery_date(input) {
        Some(date) => date.format(DELIVERY_DATE_FORMAT).to_string(),
        None => input.to_string(),
    }
}
