//! DateTime display utilities.

use std::fmt;

use jiff::{Timestamp, civil::Date, tz::TimeZone};

/// A wrapper around `Timestamp` that formats it in the system time zone.
///
/// # Format
///
/// The display format follows the pattern: `YYYY-MM-DD HH:MM:SS TZ`
/// - Year, month, and day are zero-padded
/// - Time is in 24-hour format with zero-padded components
/// - Timezone abbreviation is included (e.g., UTC, EST, JST)
pub struct LocalDateTime<'a>(pub &'a Timestamp);

impl<'a> fmt::Display for LocalDateTime<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            self.0
                .to_zoned(TimeZone::system())
                .strftime("%Y-%m-%d %H:%M:%S %Z")
        )
    }
}

/// Calendar date with its abbreviated weekday, e.g. `Mon 2024-01-08`.
pub struct ShortDate<'a>(pub &'a Date);

impl fmt::Display for ShortDate<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.strftime("%a %Y-%m-%d"))
    }
}
