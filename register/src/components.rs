//! Record model for the death register
//!
//! `DeathRecord` mirrors the shape the API hands us. Dates stay as raw
//! strings there; `ParsedRecord` carries the parsed values every system
//! works from.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::dates;

// ============================================================================
// Identity
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub String);

impl RecordId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// Death Record
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Disposition {
    Burial,
    Cremation,
}

/// One entry of the death register, as supplied by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeathRecord {
    pub id: RecordId,
    #[serde(default)]
    pub member_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,
    /// Missing in the payload decodes as empty, which never parses.
    #[serde(default)]
    pub date_of_death: String,
    #[serde(default)]
    pub place_of_death: String,
    #[serde(default)]
    pub cause_of_death: String,
    #[serde(default)]
    pub burial_or_cremation: Option<Disposition>,
    #[serde(default)]
    pub family_notified: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub funeral_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
}

impl DeathRecord {
    pub fn new(
        id: impl Into<String>,
        member_name: impl Into<String>,
        date_of_death: impl Into<String>,
    ) -> Self {
        Self {
            id: RecordId::new(id),
            member_name: member_name.into(),
            date_of_birth: None,
            date_of_death: date_of_death.into(),
            place_of_death: String::new(),
            cause_of_death: String::new(),
            burial_or_cremation: None,
            family_notified: false,
            funeral_date: None,
            photo_url: None,
        }
    }

    pub fn death_date(&self) -> Option<NaiveDate> {
        dates::parse_date(&self.date_of_death)
    }

    pub fn birth_date(&self) -> Option<NaiveDate> {
        self.date_of_birth.as_deref().and_then(dates::parse_date)
    }

    pub fn funeral(&self) -> Option<NaiveDate> {
        self.funeral_date.as_deref().and_then(dates::parse_date)
    }

    /// Age in whole years, `None` when either date is missing or unusable.
    pub fn age_at_death(&self) -> Option<u32> {
        dates::age_at_death(self.birth_date(), self.death_date()?)
    }

    /// Text the search filter matches against.
    pub fn search_haystack(&self) -> String {
        format!(
            "{} {} {}",
            self.member_name, self.place_of_death, self.cause_of_death
        )
        .to_lowercase()
    }
}

// ============================================================================
// Parsed view
// ============================================================================

/// A record whose death date parsed, with the derived values cached.
#[derive(Debug, Clone, Copy)]
pub struct ParsedRecord<'a> {
    pub record: &'a DeathRecord,
    pub death: NaiveDate,
    pub birth: Option<NaiveDate>,
    pub funeral: Option<NaiveDate>,
    pub age: Option<u32>,
}

impl<'a> ParsedRecord<'a> {
    pub fn parse(record: &'a DeathRecord) -> Option<Self> {
        let death = record.death_date()?;
        let birth = record.birth_date();
        Some(Self {
            record,
            death,
            birth,
            funeral: record.funeral(),
            age: dates::age_at_death(birth, death),
        })
    }
}

/// The outcome of parsing a record list: usable records in input order plus
/// the ids of records whose death date could not be read.
#[derive(Debug, Clone, Default)]
pub struct ParsedRecords<'a> {
    pub accepted: Vec<ParsedRecord<'a>>,
    pub rejected: Vec<RecordId>,
}

impl<'a> ParsedRecords<'a> {
    pub fn parse(records: &'a [DeathRecord]) -> Self {
        let mut parsed = Self::default();
        for record in records {
            match ParsedRecord::parse(record) {
                Some(p) => parsed.accepted.push(p),
                None => parsed.rejected.push(record.id.clone()),
            }
        }
        tracing::debug!(
            accepted = parsed.accepted.len(),
            rejected = parsed.rejected.len(),
            "parsed death records"
        );
        parsed
    }

    pub fn len(&self) -> usize {
        self.accepted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accepted.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ParsedRecord<'a>> {
        self.accepted.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(death: &str, birth: Option<&str>) -> DeathRecord {
        let mut r = DeathRecord::new("r1", "Ada Obi", death);
        r.date_of_birth = birth.map(str::to_string);
        r
    }

    #[test]
    fn test_age_at_death_uses_birthday_rule() {
        let r = record("2024-03-15", Some("1950-03-20"));
        assert_eq!(r.age_at_death(), Some(73));

        let r = record("2024-03-20", Some("1950-03-20"));
        assert_eq!(r.age_at_death(), Some(74));
    }

    #[test]
    fn test_bad_birth_date_only_drops_age() {
        let r = record("2024-03-15", Some("not a date"));
        let parsed = ParsedRecord::parse(&r).unwrap();
        assert_eq!(parsed.age, None);
        assert_eq!(parsed.death, NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
    }

    #[test]
    fn test_unparseable_death_is_rejected() {
        let records = vec![
            record("2024-01-01", None),
            record("31/12/2023", None),
            record("", None),
        ];
        let parsed = ParsedRecords::parse(&records);
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed.rejected.len(), 2);
    }

    #[test]
    fn test_wire_shape_is_camel_case() {
        let json = r#"{
            "id": "d-7",
            "memberName": "Grace Nwosu",
            "dateOfBirth": "1931-06-02",
            "dateOfDeath": "2020-11-09T00:00:00.000Z",
            "placeOfDeath": "St. Luke's Hospital",
            "causeOfDeath": "Pneumonia",
            "burialOrCremation": "CREMATION",
            "familyNotified": true,
            "funeralDate": null,
            "photoUrl": "https://cdn.example.org/p/7.jpg"
        }"#;
        let r: DeathRecord = serde_json::from_str(json).unwrap();
        assert_eq!(r.id.as_str(), "d-7");
        assert_eq!(r.burial_or_cremation, Some(Disposition::Cremation));
        assert_eq!(r.age_at_death(), Some(89));
        assert!(r.funeral_date.is_none());

        let back = serde_json::to_value(&r).unwrap();
        assert_eq!(back["memberName"], "Grace Nwosu");
        assert_eq!(back["burialOrCremation"], "CREMATION");
    }

    #[test]
    fn test_search_haystack_joins_fields() {
        let mut r = record("2024-01-01", None);
        r.place_of_death = "Home".into();
        r.cause_of_death = "Heart Failure".into();
        assert_eq!(r.search_haystack(), "ada obi home heart failure");
    }
}
