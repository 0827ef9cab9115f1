//! Expiration instant derived from the valid-until date.
//!
//! A pass expires at 23:59:00 of its valid-until day at a fixed UTC+01:00
//! offset, independent of the server's local time zone.

use chrono::{DateTime, FixedOffset, NaiveDate, SecondsFormat};

use crate::error::PassError;

/// Date format of every date field in a pass request.
pub const PASS_DATE_FORMAT: &str = "%d.%m.%Y";

/// Offset of the expiration instant, in seconds east of UTC.
pub const EXPIRATION_UTC_OFFSET_SECS: i32 = 60 * 60;

pub fn parse_pass_date(value: &str) -> Result<NaiveDate, PassError> {
    NaiveDate::parse_from_str(value, PASS_DATE_FORMAT).map_err(|_| PassError::InvalidDate {
        value: value.to_string(),
    })
}

pub fn expiration_instant(date_to: &str) -> Result<DateTime<FixedOffset>, PassError> {
    let invalid = || PassError::InvalidDate {
        value: date_to.to_string(),
    };

    let offset = FixedOffset::east_opt(EXPIRATION_UTC_OFFSET_SECS).ok_or_else(invalid)?;
    parse_pass_date(date_to)?
        .and_hms_opt(23, 59, 0)
        .and_then(|end_of_day| end_of_day.and_local_timezone(offset).single())
        .ok_or_else(invalid)
}

/// W3C date-time with explicit offset, as expected by `expirationDate`.
pub fn format_expiration(instant: &DateTime<FixedOffset>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Secs, false)
}
