use register::systems::{self, Stats, TrendWindow};

use crate::state::AppState;

/// Cohort statistics as of today; `window` overrides the configured trend.
pub fn get_statistics(state: &AppState, window: Option<i64>) -> Stats {
    let window = window
        .map(TrendWindow::from_months)
        .unwrap_or_else(|| state.config.trend_window());
    systems::aggregate_with_window(&state.records, state.today, window)
}
