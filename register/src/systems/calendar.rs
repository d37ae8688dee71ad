//! Memorial Calendar
//!
//! Lays out one month day by day and pins every record whose death
//! anniversary (month and day, any year) lands on that day.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::components::{DeathRecord, ParsedRecords};
use crate::dates;
use crate::systems::anniversary::MemorialTone;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Memorial {
    pub record: DeathRecord,
    /// Grid year minus death year.
    pub years: i32,
    pub tone: MemorialTone,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub day: u32,
    pub is_today: bool,
    pub is_current_month: bool,
    pub memorials: Vec<Memorial>,
}

/// A month grid plus what a Sunday-first layout needs to place it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthView {
    pub year: i32,
    pub month: u32,
    pub label: String,
    /// Empty cells before day 1 in a week starting on Sunday.
    pub leading_blanks: u32,
    pub memorial_count: u32,
    pub days: Vec<CalendarDay>,
}

/// Every day of `month_anchor`'s month with the anniversaries falling on it.
/// Records keep their input order within a day.
pub fn build_month_grid(
    records: &[DeathRecord],
    month_anchor: NaiveDate,
    today: NaiveDate,
) -> Vec<CalendarDay> {
    let first = dates::first_of_month(month_anchor);
    let year = first.year();
    let month = first.month();
    let parsed = ParsedRecords::parse(records);

    let mut days: Vec<CalendarDay> = first
        .iter_days()
        .take(first.num_days_in_month() as usize)
        .map(|date| CalendarDay {
            date,
            day: date.day(),
            is_today: date == today,
            is_current_month: true,
            memorials: Vec::new(),
        })
        .collect();

    for p in parsed.iter() {
        let Some(anniversary) = dates::anniversary_date(p.death, year) else {
            continue;
        };
        if anniversary.month() != month {
            continue;
        }
        if let Some(slot) = days.get_mut(anniversary.day() as usize - 1) {
            let years = dates::years_ago(p.death, anniversary);
            slot.memorials.push(Memorial {
                record: p.record.clone(),
                years,
                tone: MemorialTone::classify(years),
            });
        }
    }

    tracing::debug!(year, month, days = days.len(), "built memorial month grid");
    days
}

pub fn build_month_view(
    records: &[DeathRecord],
    month_anchor: NaiveDate,
    today: NaiveDate,
) -> MonthView {
    let days = build_month_grid(records, month_anchor, today);
    let first = dates::first_of_month(month_anchor);
    MonthView {
        year: first.year(),
        month: first.month(),
        label: dates::month_label(first),
        leading_blanks: first.weekday().num_days_from_sunday(),
        memorial_count: days.iter().map(|d| d.memorials.len() as u32).sum(),
        days,
    }
}
