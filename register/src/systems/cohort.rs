//! Cohort Aggregator
//!
//! Age bands, a trailing monthly trend, year-over-year change and the
//! burial/cremation split. Every ratio guards its denominator and reports 0
//! when there is nothing to divide by.

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::components::{DeathRecord, Disposition, ParsedRecord, ParsedRecords};
use crate::dates;

// ============================================================================
// Age bands
// ============================================================================

/// Fixed age bands with inclusive upper bounds. 85 itself is in `Senior`,
/// so `Elderly` starts at 86.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AgeBand {
    Youth,
    YoungAdult,
    Adult,
    MiddleAged,
    Senior,
    Elderly,
}

impl AgeBand {
    pub const ALL: [AgeBand; 6] = [
        AgeBand::Youth,
        AgeBand::YoungAdult,
        AgeBand::Adult,
        AgeBand::MiddleAged,
        AgeBand::Senior,
        AgeBand::Elderly,
    ];

    pub fn of(age: u32) -> Self {
        match age {
            0..=18 => AgeBand::Youth,
            19..=30 => AgeBand::YoungAdult,
            31..=50 => AgeBand::Adult,
            51..=70 => AgeBand::MiddleAged,
            71..=85 => AgeBand::Senior,
            _ => AgeBand::Elderly,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AgeBand::Youth => "0-18",
            AgeBand::YoungAdult => "19-30",
            AgeBand::Adult => "31-50",
            AgeBand::MiddleAged => "51-70",
            AgeBand::Senior => "71-85",
            AgeBand::Elderly => "86+",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgeBin {
    pub band: AgeBand,
    pub label: String,
    pub count: u32,
    /// Share of records with a known age, rounded to a whole percent.
    /// Sums to 100 (give or take rounding) whenever any age is known.
    pub percentage: u32,
    /// Share of every dated record, unknown ages included. Falls short of
    /// 100 by the fraction of records whose age is unknown.
    pub share_of_total: u32,
}

// ============================================================================
// Trailing window
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TrendWindow {
    #[serde(rename = "6")]
    SixMonths,
    #[default]
    #[serde(rename = "12")]
    TwelveMonths,
    #[serde(rename = "24")]
    TwentyFourMonths,
}

impl TrendWindow {
    /// Snap any requested length to a supported window: up to 6 (zero and
    /// negatives included) gives 6, 7 through 12 gives 12, anything longer 24.
    pub fn from_months(months: i64) -> Self {
        match months {
            i64::MIN..=6 => TrendWindow::SixMonths,
            7..=12 => TrendWindow::TwelveMonths,
            _ => TrendWindow::TwentyFourMonths,
        }
    }

    pub fn months(self) -> u32 {
        match self {
            TrendWindow::SixMonths => 6,
            TrendWindow::TwelveMonths => 12,
            TrendWindow::TwentyFourMonths => 24,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyTrend {
    pub year: i32,
    pub month: u32,
    pub label: String,
    pub deaths: u32,
    pub burials: u32,
    pub cremations: u32,
    /// Mean of known ages this month, 0 when none are known.
    pub average_age: f64,
    pub notified: u32,
    pub pending: u32,
}

impl MonthlyTrend {
    fn empty(start: NaiveDate) -> Self {
        Self {
            year: start.year(),
            month: start.month(),
            label: dates::month_label(start),
            deaths: 0,
            burials: 0,
            cremations: 0,
            average_age: 0.0,
            notified: 0,
            pending: 0,
        }
    }
}

// ============================================================================
// Stats
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DispositionSplit {
    pub burials: u32,
    pub cremations: u32,
    pub burial_percentage: u32,
    pub cremation_percentage: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub reference_date: NaiveDate,
    /// Records with a readable death date.
    pub total: u32,
    /// Records left out because their death date could not be read.
    pub rejected: u32,
    pub known_age: u32,
    pub average_age: f64,
    pub bins: Vec<AgeBin>,
    pub window_months: u32,
    pub trend: Vec<MonthlyTrend>,
    pub this_month: u32,
    pub this_year: u32,
    pub last_year: u32,
    /// Percent change against last year; 0 when last year had no deaths.
    pub yoy_delta: i64,
    pub disposition: DispositionSplit,
    pub family_notified: u32,
    pub family_pending: u32,
}

/// Whole-number percentage of `part` in `whole`, 0 for an empty whole.
pub fn percentage(part: u32, whole: u32) -> u32 {
    if whole == 0 {
        return 0;
    }
    (f64::from(part) / f64::from(whole) * 100.0).round() as u32
}

/// Year-over-year change in percent. No baseline reads as no change.
pub fn yoy_delta(this_year: u32, last_year: u32) -> i64 {
    if last_year == 0 {
        return 0;
    }
    let change = f64::from(this_year) - f64::from(last_year);
    (change / f64::from(last_year) * 100.0).round() as i64
}

fn mean_age<'r, 'a: 'r>(records: impl Iterator<Item = &'r ParsedRecord<'a>>) -> f64 {
    let (sum, n) = records
        .filter_map(|p| p.age)
        .fold((0u64, 0u32), |(sum, n), age| (sum + u64::from(age), n + 1));
    if n == 0 {
        return 0.0;
    }
    (sum as f64 / f64::from(n) * 10.0).round() / 10.0
}

/// Aggregate with the default twelve-month trend.
pub fn aggregate(records: &[DeathRecord], reference_date: NaiveDate) -> Stats {
    aggregate_with_window(records, reference_date, TrendWindow::default())
}

pub fn aggregate_with_window(
    records: &[DeathRecord],
    reference_date: NaiveDate,
    window: TrendWindow,
) -> Stats {
    let parsed = ParsedRecords::parse(records);

    let bins = age_bins(&parsed);
    let known_age = parsed.iter().filter(|p| p.age.is_some()).count() as u32;

    let year = reference_date.year();
    let this_year = count(&parsed, |p| p.death.year() == year);
    let last_year = count(&parsed, |p| p.death.year() == year - 1);
    let this_month = count(&parsed, |p| {
        p.death.year() == year && p.death.month() == reference_date.month()
    });

    let burials = count(&parsed, |p| {
        p.record.burial_or_cremation == Some(Disposition::Burial)
    });
    let cremations = count(&parsed, |p| {
        p.record.burial_or_cremation == Some(Disposition::Cremation)
    });
    let family_notified = count(&parsed, |p| p.record.family_notified);

    let stats = Stats {
        reference_date,
        total: parsed.len() as u32,
        rejected: parsed.rejected.len() as u32,
        known_age,
        average_age: mean_age(parsed.iter()),
        bins,
        window_months: window.months(),
        trend: monthly_trend(&parsed, reference_date, window),
        this_month,
        this_year,
        last_year,
        yoy_delta: yoy_delta(this_year, last_year),
        disposition: DispositionSplit {
            burials,
            cremations,
            burial_percentage: percentage(burials, burials + cremations),
            cremation_percentage: percentage(cremations, burials + cremations),
        },
        family_notified,
        family_pending: parsed.len() as u32 - family_notified,
    };

    tracing::debug!(
        total = stats.total,
        known_age = stats.known_age,
        window = stats.window_months,
        "aggregated death register"
    );
    stats
}

fn count(parsed: &ParsedRecords<'_>, pred: impl Fn(&ParsedRecord<'_>) -> bool) -> u32 {
    parsed.iter().filter(|p| pred(p)).count() as u32
}

fn age_bins(parsed: &ParsedRecords<'_>) -> Vec<AgeBin> {
    let mut counts = [0u32; 6];
    for age in parsed.iter().filter_map(|p| p.age) {
        counts[AgeBand::of(age) as usize] += 1;
    }
    let known: u32 = counts.iter().sum();
    let total = parsed.len() as u32;

    AgeBand::ALL
        .iter()
        .zip(counts)
        .map(|(band, count)| AgeBin {
            band: *band,
            label: band.label().to_string(),
            count,
            percentage: percentage(count, known),
            share_of_total: percentage(count, total),
        })
        .collect()
}

/// One entry per month, oldest first, ending with the reference month.
fn monthly_trend(
    parsed: &ParsedRecords<'_>,
    reference_date: NaiveDate,
    window: TrendWindow,
) -> Vec<MonthlyTrend> {
    let first = dates::first_of_month(reference_date);
    (0..window.months())
        .rev()
        .filter_map(|back| first.checked_sub_months(Months::new(back)))
        .map(|start| {
            let in_month: Vec<&ParsedRecord<'_>> = parsed
                .iter()
                .filter(|p| p.death.year() == start.year() && p.death.month() == start.month())
                .collect();

            let mut entry = MonthlyTrend::empty(start);
            for p in &in_month {
                entry.deaths += 1;
                match p.record.burial_or_cremation {
                    Some(Disposition::Burial) => entry.burials += 1,
                    Some(Disposition::Cremation) => entry.cremations += 1,
                    None => {}
                }
                if p.record.family_notified {
                    entry.notified += 1;
                } else {
                    entry.pending += 1;
                }
            }
            entry.average_age = mean_age(in_month.into_iter());
            entry
        })
        .collect()
}
