//! Filter & Sort
//!
//! Narrows the register to a search term and/or a year, then orders it.

use std::cmp::Ordering;

use chrono::Datelike;
use serde::{Deserialize, Serialize};

use crate::components::{DeathRecord, ParsedRecord, ParsedRecords};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    /// Most recent death first
    #[default]
    DateOfDeath,
    /// Member name, A to Z, ignoring case.
    ///
    /// Ordering is by lowercased code point, not a locale collation: accented
    /// initials such as "Émeka" sort after "Z".
    Name,
    /// Latest funeral first; records without one go last
    FuneralDate,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterCriteria {
    #[serde(default)]
    pub search_term: Option<String>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub sort_key: SortKey,
}

impl FilterCriteria {
    fn needle(&self) -> Option<String> {
        self.search_term
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_lowercase)
    }
}

/// Filter and order `records`. Records without a readable death date are
/// left out; the input slice is never touched.
pub fn filter_and_sort<'a>(
    records: &'a [DeathRecord],
    criteria: &FilterCriteria,
) -> Vec<&'a DeathRecord> {
    let parsed = ParsedRecords::parse(records);
    let needle = criteria.needle();

    let mut kept: Vec<&ParsedRecord<'a>> = parsed
        .iter()
        .filter(|p| criteria.year.map_or(true, |y| p.death.year() == y))
        .filter(|p| {
            needle
                .as_deref()
                .map_or(true, |n| p.record.search_haystack().contains(n))
        })
        .collect();

    // sort_by is stable, so ties keep input order
    match criteria.sort_key {
        SortKey::DateOfDeath => kept.sort_by(|a, b| b.death.cmp(&a.death)),
        SortKey::Name => kept.sort_by(|a, b| compare_names(&a.record.member_name, &b.record.member_name)),
        SortKey::FuneralDate => kept.sort_by(|a, b| match (a.funeral, b.funeral) {
            (Some(x), Some(y)) => y.cmp(&x),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }),
    }

    tracing::debug!(
        input = records.len(),
        kept = kept.len(),
        sort = ?criteria.sort_key,
        "filtered death records"
    );

    kept.into_iter().map(|p| p.record).collect()
}

/// Case-insensitive first, raw text as tie-break.
fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Distinct death years, most recent first.
pub fn available_years(records: &[DeathRecord]) -> Vec<i32> {
    let mut years: Vec<i32> = ParsedRecords::parse(records)
        .iter()
        .map(|p| p.death.year())
        .collect();
    years.sort_unstable_by(|a, b| b.cmp(a));
    years.dedup();
    years
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(id: &str, name: &str, death: &str) -> DeathRecord {
        DeathRecord::new(id, name, death)
    }

    fn ids(list: &[&DeathRecord]) -> Vec<String> {
        list.iter().map(|r| r.id.0.clone()).collect()
    }

    fn sample() -> Vec<DeathRecord> {
        let mut a = rec("a", "Samuel Eze", "2023-05-01");
        a.place_of_death = "General Hospital".into();
        a.funeral_date = Some("2023-05-10".into());
        let mut b = rec("b", "adaeze Okafor", "2024-01-20");
        b.cause_of_death = "Stroke".into();
        let mut c = rec("c", "Bola Ade", "2024-07-04");
        c.funeral_date = Some("2024-07-12".into());
        let d = rec("d", "Chidi Nna", "bad-date");
        vec![a, b, c, d]
    }

    #[test]
    fn test_default_sort_is_most_recent_first() {
        let records = sample();
        let out = filter_and_sort(&records, &FilterCriteria::default());
        assert_eq!(ids(&out), ["c", "b", "a"]);
    }

    #[test]
    fn test_search_is_case_insensitive_across_fields() {
        let records = sample();
        let mut criteria = FilterCriteria {
            search_term: Some("HOSPITAL".into()),
            ..Default::default()
        };
        assert_eq!(ids(&filter_and_sort(&records, &criteria)), ["a"]);

        criteria.search_term = Some("stroke".into());
        assert_eq!(ids(&filter_and_sort(&records, &criteria)), ["b"]);

        criteria.search_term = Some("   ".into());
        assert_eq!(filter_and_sort(&records, &criteria).len(), 3);
    }

    #[test]
    fn test_year_filter() {
        let records = sample();
        let criteria = FilterCriteria {
            year: Some(2024),
            ..Default::default()
        };
        assert_eq!(ids(&filter_and_sort(&records, &criteria)), ["c", "b"]);
    }

    #[test]
    fn test_name_sort_ignores_case() {
        let records = sample();
        let criteria = FilterCriteria {
            sort_key: SortKey::Name,
            ..Default::default()
        };
        assert_eq!(ids(&filter_and_sort(&records, &criteria)), ["b", "c", "a"]);
    }

    #[test]
    fn test_name_sort_orders_by_code_point() {
        let records = vec![
            rec("1", "Émeka Obi", "2024-01-01"),
            rec("2", "Zainab Bello", "2024-01-02"),
            rec("3", "emeka obi", "2024-01-03"),
            rec("4", "Emeka Obi", "2024-01-04"),
        ];
        let criteria = FilterCriteria {
            sort_key: SortKey::Name,
            ..Default::default()
        };
        // Same name in different case falls back to raw order: "E" < "e"
        assert_eq!(ids(&filter_and_sort(&records, &criteria)), ["4", "3", "2", "1"]);
    }

    #[test]
    fn test_funeral_sort_puts_missing_last_and_stable() {
        let mut records = sample();
        records.push(rec("e", "Efe Udo", "2022-02-02"));
        let criteria = FilterCriteria {
            sort_key: SortKey::FuneralDate,
            ..Default::default()
        };
        // b and e have no funeral date and keep their input order
        assert_eq!(ids(&filter_and_sort(&records, &criteria)), ["c", "a", "b", "e"]);
    }

    #[test]
    fn test_input_is_untouched() {
        let records = sample();
        let before = records.clone();
        let _ = filter_and_sort(
            &records,
            &FilterCriteria {
                sort_key: SortKey::Name,
                ..Default::default()
            },
        );
        assert_eq!(records, before);
    }

    #[test]
    fn test_available_years() {
        let records = sample();
        assert_eq!(available_years(&records), [2024, 2023]);
        assert!(available_years(&[]).is_empty());
    }
}
