//! Calendar date parsing at the data boundary.
//!
//! Items carry plain calendar dates. Upstream payloads spell them as
//! `2025-01-14`, as RFC 3339 timestamps, or as HTTP dates
//! (`Tue, 14 Jan 2025 00:00:00 GMT`). Timestamps keep the calendar day of
//! their own offset; the time of day is dropped.

use chrono::{DateTime, NaiveDate};

use crate::error::{CoreError, Result};

/// Parse a calendar date from any accepted wire spelling.
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    let s = input.trim();
    if s.is_empty() {
        return Err(CoreError::invalid_date(input));
    }

    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(date);
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(s) {
        return Ok(ts.date_naive());
    }
    if let Ok(ts) = DateTime::parse_from_rfc2822(s) {
        return Ok(ts.date_naive());
    }
    // Naive timestamps without an offset, e.g. `2025-01-14T09:30:00`
    if let Some((day, _)) = s.split_once('T') {
        if let Ok(date) = NaiveDate::parse_from_str(day, "%Y-%m-%d") {
            return Ok(date);
        }
    }

    Err(CoreError::invalid_date(input))
}
