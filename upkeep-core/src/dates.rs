//! Date utilities: fail-open parsing and civil-calendar arithmetic.
//!
//! Everything here works on `NaiveDate`. Rows coming out of the store carry
//! plain `YYYY-MM-DD` strings (occasionally full timestamps), and a bad or
//! missing value must never abort a batch, so parsing returns `Option`
//! instead of `Result`.

use chrono::{DateTime, Days, Months, NaiveDate};

/// Parse a date-like string. Empty, missing, and unparseable values all
/// come back as `None`.
///
/// Accepts canonical `YYYY-MM-DD`; an RFC 3339 timestamp is truncated to
/// its date part.
pub fn parse_date(value: Option<&str>) -> Option<NaiveDate> {
    let s = value?.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(d);
    }
    DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive())
}

/// Add whole calendar months. Day-of-month is clamped to the last valid
/// day of the target month (Jan 31 + 1 month = Feb 29 in a leap year).
pub fn add_months(date: NaiveDate, months: u32) -> NaiveDate {
    // chrono clamps rather than rolling into the next month; `None` is only
    // possible at the far end of the representable range.
    date.checked_add_months(Months::new(months)).unwrap_or(date)
}

pub fn add_days(date: NaiveDate, days: i64) -> NaiveDate {
    let out = if days >= 0 {
        date.checked_add_days(Days::new(days as u64))
    } else {
        date.checked_sub_days(Days::new(days.unsigned_abs()))
    };
    out.unwrap_or(date)
}

/// Whole-day difference `later - earlier`. Negative when `later` is
/// before `earlier`.
pub fn diff_in_days(later: NaiveDate, earlier: NaiveDate) -> i64 {
    (later - earlier).num_days()
}

/// Canonical `YYYY-MM-DD`, or `None` for an absent date.
pub fn format_date(date: Option<NaiveDate>) -> Option<String> {
    date.map(|d| d.format("%Y-%m-%d").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn parse_iso_date() {
        assert_eq!(parse_date(Some("2024-06-01")), Some(d("2024-06-01")));
    }

    #[test]
    fn parse_rfc3339_takes_date_part() {
        assert_eq!(
            parse_date(Some("2024-06-01T08:30:00+00:00")),
            Some(d("2024-06-01"))
        );
    }

    #[test]
    fn parse_garbage_is_none() {
        assert_eq!(parse_date(None), None);
        assert_eq!(parse_date(Some("")), None);
        assert_eq!(parse_date(Some("   ")), None);
        assert_eq!(parse_date(Some("not-a-date")), None);
        assert_eq!(parse_date(Some("2024-13-40")), None);
    }

    #[test]
    fn add_months_clamps_end_of_month() {
        // Leap year: Jan 31 + 1 month clamps to Feb 29.
        assert_eq!(add_months(d("2024-01-31"), 1), d("2024-02-29"));
        assert_eq!(add_months(d("2023-01-31"), 1), d("2023-02-28"));
        assert_eq!(add_months(d("2024-01-15"), 6), d("2024-07-15"));
    }

    #[test]
    fn add_days_both_directions() {
        assert_eq!(add_days(d("2024-06-01"), 7), d("2024-06-08"));
        assert_eq!(add_days(d("2024-06-01"), -30), d("2024-05-02"));
    }

    #[test]
    fn diff_in_days_signed() {
        assert_eq!(diff_in_days(d("2024-06-01"), d("2024-05-02")), 30);
        assert_eq!(diff_in_days(d("2024-05-02"), d("2024-06-01")), -30);
        assert_eq!(diff_in_days(d("2024-06-01"), d("2024-06-01")), 0);
    }

    #[test]
    fn format_round_trips_parse() {
        for s in ["2024-06-01", "1999-12-31", "2024-02-29"] {
            assert_eq!(format_date(parse_date(Some(s))), Some(s.to_string()));
        }
        assert_eq!(format_date(None), None);
    }
}
