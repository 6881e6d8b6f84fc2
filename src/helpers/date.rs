//! Date display helpers

use chrono::NaiveDate;

/// Returned instead of an error when a date cannot be displayed
pub const INVALID_DATE: &str = "Invalid Date";

/// Format a `YYYY-MM-DD` date as e.g. "January 5, 2024"
///
/// The year, month and day are taken as a calendar date with no timezone
/// attached, so the day shown is always the day written. Each component is
/// read up to its first non-digit, which lets stored timestamps such as
/// `2024-01-05T00:00:00.000Z` display as their date. Anything else yields
/// [`INVALID_DATE`].
///
/// # Examples
/// ```
/// use folio::helpers::format_date;
///
/// assert_eq!(format_date("2024-01-05"), "January 5, 2024");
/// assert_eq!(format_date("not-a-date"), "Invalid Date");
/// ```
pub fn format_date(date: &str) -> String {
    calendar_date(date)
        .map(|d| d.format("%B %-d, %Y").to_string())
        .unwrap_or_else(|| INVALID_DATE.to_string())
}

fn calendar_date(date: &str) -> Option<NaiveDate> {
    let parts: Vec<&str> = date.split('-').collect();
    let [year, month, day] = parts.as_slice() else {
        return None;
    };

    let year = i32::try_from(leading_int(year)?).ok()?;
    NaiveDate::from_ymd_opt(year, leading_int(month)?, leading_int(day)?)
}

/// Leading decimal digits of `s`, after optional whitespace
fn leading_int(s: &str) -> Option<u32> {
    let s = s.trim_start();
    let end = s
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map(|(i, _)| i)
        .unwrap_or(s.len());
    s[..end].parse().ok()
}
