use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::Serialize;

use register::components::ParsedRecords;
use register::register::parse_reference_date;
use register::{DeathRecord, RegisterConfig};

/// Everything a command needs: the loaded register, the effective config and
/// the date the host treats as today.
pub struct AppState {
    pub records: Vec<DeathRecord>,
    pub config: RegisterConfig,
    pub today: NaiveDate,
}

impl AppState {
    pub fn load(records: Option<&Path>, config: Option<&Path>, today: Option<&str>) -> Result<Self> {
        let config = match config {
            Some(path) => RegisterConfig::load(path)
                .with_context(|| format!("loading config from {}", path.display()))?,
            None => RegisterConfig::default(),
        };

        let records = match records {
            Some(path) => register::load_records(path)
                .with_context(|| format!("loading records from {}", path.display()))?,
            None => Vec::new(),
        };

        let today = match today {
            Some(raw) => parse_reference_date(raw)?,
            None => chrono::Local::now().date_naive(),
        };

        let state = Self::new(records, config, today);
        state.report_rejected();
        Ok(state)
    }

    pub fn new(records: Vec<DeathRecord>, config: RegisterConfig, today: NaiveDate) -> Self {
        Self {
            records,
            config,
            today,
        }
    }

    fn report_rejected(&self) {
        let parsed = ParsedRecords::parse(&self.records);
        for id in &parsed.rejected {
            tracing::warn!(record = %id, "skipping record with unreadable date of death");
        }
        tracing::info!(
            loaded = self.records.len(),
            usable = parsed.len(),
            today = %self.today,
            "register loaded"
        );
    }
}

// -- Serializable types returned by commands --

#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecordRow {
    pub id: String,
    pub member_name: String,
    pub date_of_death: String,
    pub age_at_death: Option<u32>,
    pub years_ago: Option<i32>,
    pub funeral_date: Option<String>,
    pub family_notified: bool,
}

#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct RecordList {
    pub count: usize,
    pub available_years: Vec<i32>,
    pub rows: Vec<RecordRow>,
}

#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EffectiveConfig {
    pub trend_months: u32,
    pub anniversary_window_days: u32,
    pub anniversary_limit: usize,
    pub default_sort: register::systems::SortKey,
}
