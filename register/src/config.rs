//! Reporting configuration
//!
//! Every field has a default and out-of-range values are snapped into range
//! by the accessors rather than rejected, so a hand-edited file can never
//! make a report fail.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{RegisterError, RegisterResult};
use crate::systems::anniversary::{DEFAULT_LIMIT, DEFAULT_WINDOW_DAYS};
use crate::systems::{SortKey, TrendWindow};

/// Longest anniversary look-ahead honoured, one leap year.
pub const MAX_WINDOW_DAYS: u32 = 366;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RegisterConfig {
    pub trend_months: i64,
    pub anniversary_window_days: i64,
    pub anniversary_limit: i64,
    pub default_sort: SortKey,
}

impl Default for RegisterConfig {
    fn default() -> Self {
        Self {
            trend_months: 12,
            anniversary_window_days: i64::from(DEFAULT_WINDOW_DAYS),
            anniversary_limit: DEFAULT_LIMIT as i64,
            default_sort: SortKey::DateOfDeath,
        }
    }
}

impl RegisterConfig {
    pub fn from_json(json: &str) -> RegisterResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> RegisterResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|source| RegisterError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&raw)
    }

    pub fn trend_window(&self) -> TrendWindow {
        TrendWindow::from_months(self.trend_months)
    }

    /// Clamped to `0..=MAX_WINDOW_DAYS`.
    pub fn anniversary_window_days(&self) -> u32 {
        self.anniversary_window_days
            .clamp(0, i64::from(MAX_WINDOW_DAYS)) as u32
    }

    /// Negative limits give an empty feed.
    pub fn anniversary_limit(&self) -> usize {
        usize::try_from(self.anniversary_limit).unwrap_or(0)
    }
}
