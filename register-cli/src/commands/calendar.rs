use anyhow::Result;

use register::register::parse_month_anchor;
use register::systems::{self, MonthView, UpcomingAnniversary};

use crate::state::AppState;

/// Memorial calendar for `month` (`YYYY-MM`), or the current month.
pub fn get_month(state: &AppState, month: Option<&str>) -> Result<MonthView> {
    let anchor = match month {
        Some(raw) => parse_month_anchor(raw)?,
        None => state.today,
    };
    Ok(systems::build_month_view(&state.records, anchor, state.today))
}

/// Upcoming anniversaries; flags override the config and are clamped the
/// same way.
pub fn get_upcoming(
    state: &AppState,
    days: Option<i64>,
    limit: Option<i64>,
) -> Vec<UpcomingAnniversary> {
    let mut config = state.config.clone();
    if let Some(days) = days {
        config.anniversary_window_days = days;
    }
    if let Some(limit) = limit {
        config.anniversary_limit = limit;
    }
    systems::upcoming_anniversaries(
        &state.records,
        state.today,
        config.anniversary_window_days(),
        config.anniversary_limit(),
    )
}
