//! Report orchestrator
//!
//! Runs every analytic pass for one reporting context. The host owns the
//! context (today, the month on screen, the filter) and hands it in each time.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::components::{DeathRecord, ParsedRecords, RecordId};
use crate::config::RegisterConfig;
use crate::dates;
use crate::error::{RegisterError, RegisterResult};
use crate::systems::{self, FilterCriteria, MonthView, Stats, UpcomingAnniversary};

/// What the host is looking at right now.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRequest {
    pub today: NaiveDate,
    /// Month shown in the calendar; the month of `today` when absent.
    #[serde(default)]
    pub month: Option<NaiveDate>,
    #[serde(default)]
    pub criteria: FilterCriteria,
}

impl ReportRequest {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today,
            month: None,
            criteria: FilterCriteria::default(),
        }
    }

    pub fn month_anchor(&self) -> NaiveDate {
        dates::first_of_month(self.month.unwrap_or(self.today))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterReport {
    pub request: ReportRequest,
    pub records: Vec<DeathRecord>,
    pub available_years: Vec<i32>,
    pub stats: Stats,
    pub calendar: MonthView,
    pub upcoming: Vec<UpcomingAnniversary>,
    pub rejected: Vec<RecordId>,
}

pub fn build_report(
    records: &[DeathRecord],
    request: &ReportRequest,
    config: &RegisterConfig,
) -> RegisterReport {
    let rejected = ParsedRecords::parse(records).rejected;

    let report = RegisterReport {
        request: request.clone(),
        records: systems::filter_and_sort(records, &request.criteria)
            .into_iter()
            .cloned()
            .collect(),
        available_years: systems::available_years(records),
        stats: systems::aggregate_with_window(records, request.today, config.trend_window()),
        calendar: systems::build_month_view(records, request.month_anchor(), request.today),
        upcoming: systems::upcoming_anniversaries(
            records,
            request.today,
            config.anniversary_window_days(),
            config.anniversary_limit(),
        ),
        rejected,
    };

    tracing::debug!(
        listed = report.records.len(),
        upcoming = report.upcoming.len(),
        month = %report.calendar.label,
        "built register report"
    );
    report
}

/// Parse a `YYYY-MM` month selection.
pub fn parse_month_anchor(raw: &str) -> RegisterResult<NaiveDate> {
    dates::parse_month(raw).ok_or_else(|| RegisterError::InvalidMonth(raw.to_string()))
}

/// Parse a `YYYY-MM-DD` reference date.
pub fn parse_reference_date(raw: &str) -> RegisterResult<NaiveDate> {
    dates::parse_date(raw).ok_or_else(|| RegisterError::InvalidDate(raw.to_string()))
}
