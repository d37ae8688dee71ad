//! Date and age helpers
//!
//! Everything here is calendar-day arithmetic on `NaiveDate`; no time zones
//! are involved once a date has been parsed.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};

/// Parse a date as the API sends it.
///
/// Accepts `YYYY-MM-DD`, RFC 3339 timestamps and naive `YYYY-MM-DDTHH:MM:SS`
/// timestamps. Timestamps keep the calendar date they were written with.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.date_naive());
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|ts| ts.date())
}

/// Age in whole years at `death`.
///
/// Year difference, minus one when the death's month/day comes before the
/// birthday. A birth date after the death date is treated as unknown.
pub fn age_at_death(birth: Option<NaiveDate>, death: NaiveDate) -> Option<u32> {
    let birth = birth?;
    let mut age = death.year() - birth.year();
    if (death.month(), death.day()) < (birth.month(), birth.day()) {
        age -= 1;
    }
    u32::try_from(age).ok()
}

/// Plain year difference. Negative for death dates after `today`.
pub fn years_ago(death: NaiveDate, today: NaiveDate) -> i32 {
    today.year() - death.year()
}

/// The anniversary of `death` in `year`. Feb 29 falls back to Feb 28 in
/// common years. `None` only outside chrono's representable range.
pub fn anniversary_date(death: NaiveDate, year: i32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, death.month(), death.day())
        .or_else(|| NaiveDate::from_ymd_opt(year, death.month(), 28))
}

pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// "Mar 2024"
pub fn month_label(date: NaiveDate) -> String {
    date.format("%b %Y").to_string()
}

/// Parse a `YYYY-MM` month anchor into the first day of that month.
pub fn parse_month(raw: &str) -> Option<NaiveDate> {
    let (year, month) = raw.trim().split_once('-')?;
    NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, 1)
}
