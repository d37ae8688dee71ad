//! Upcoming anniversaries
//!
//! Ranks the next memorial anniversaries falling within a short window of
//! `today`, counting years against the year each anniversary lands in.

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::components::{DeathRecord, ParsedRecords};
use crate::dates;

pub const DEFAULT_WINDOW_DAYS: u32 = 30;
pub const DEFAULT_LIMIT: usize = 5;

/// Display bucket for how long ago a death was.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MemorialTone {
    Recent,
    Near,
    Mid,
    Distant,
}

impl MemorialTone {
    /// `<= 1` recent, `2..=5` near, `6..=10` mid, above that distant.
    pub fn classify(years_ago: i32) -> Self {
        match years_ago {
            i32::MIN..=1 => MemorialTone::Recent,
            2..=5 => MemorialTone::Near,
            6..=10 => MemorialTone::Mid,
            _ => MemorialTone::Distant,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpcomingAnniversary {
    pub record: DeathRecord,
    pub occurrence: NaiveDate,
    pub days_until: i64,
    /// Occurrence year minus death year.
    pub years_ago: i32,
    pub tone: MemorialTone,
}

/// The first anniversary of `death` on or after `today`.
pub fn next_occurrence(death: NaiveDate, today: NaiveDate) -> Option<NaiveDate> {
    let this_year = dates::anniversary_date(death, today.year())?;
    if this_year >= today {
        return Some(this_year);
    }
    dates::anniversary_date(death, today.year() + 1)
}

/// Anniversaries in `[today, today + window_days]`, soonest first, at most
/// `limit` of them. Ties keep input order.
pub fn upcoming_anniversaries(
    records: &[DeathRecord],
    today: NaiveDate,
    window_days: u32,
    limit: usize,
) -> Vec<UpcomingAnniversary> {
    let Some(horizon) = today.checked_add_days(Days::new(u64::from(window_days))) else {
        return Vec::new();
    };

    let mut upcoming: Vec<UpcomingAnniversary> = ParsedRecords::parse(records)
        .iter()
        .filter_map(|p| {
            let occurrence = next_occurrence(p.death, today)?;
            if occurrence > horizon {
                return None;
            }
            let years_ago = dates::years_ago(p.death, occurrence);
            Some(UpcomingAnniversary {
                record: p.record.clone(),
                occurrence,
                days_until: occurrence.signed_duration_since(today).num_days(),
                years_ago,
                tone: MemorialTone::classify(years_ago),
            })
        })
        .collect();

    upcoming.sort_by_key(|u| u.occurrence);
    upcoming.truncate(limit);

    tracing::debug!(%today, window_days, found = upcoming.len(), "ranked upcoming anniversaries");
    upcoming
}
