//! RFC 5322 date formatting.

use chrono::{DateTime, TimeZone};
use std::fmt::Display;

/// Formats a timestamp for the `Date` header (RFC 5322 section 3.3).
///
/// Produces output such as `Tue, 1 Jul 2003 10:52:37 +0200`.
#[must_use]
pub fn format_rfc5322<Tz>(date: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    date.to_rfc2822()
}
