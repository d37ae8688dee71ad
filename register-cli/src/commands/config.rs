use crate::state::{AppState, EffectiveConfig};

/// The configuration after clamping, as the engine will apply it.
pub fn get_config(state: &AppState) -> EffectiveConfig {
    let config = &state.config;
    EffectiveConfig {
        trend_months: config.trend_window().months(),
        anniversary_window_days: config.anniversary_window_days(),
        anniversary_limit: config.anniversary_limit(),
        default_sort: config.default_sort,
    }
}
