//! Utility functions and helpers.

pub mod http;

use chrono::NaiveDate;

/// Format a date the way the portal's export form expects (`dd.mm.yyyy`).
pub fn portal_date(date: NaiveDate) -> String {
    date.format("%d.%m.%Y").to_string()
}
