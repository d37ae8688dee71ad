use std::path::Path;

use anyhow::{Context, Result};

use register::register::parse_month_anchor;
use register::systems::FilterCriteria;
use register::{build_report, export_report, ReportRequest};

use crate::state::AppState;

/// Build the full report and serialize it with its schema version.
pub fn render_report(state: &AppState, month: Option<&str>, criteria: FilterCriteria) -> Result<String> {
    let request = ReportRequest {
        today: state.today,
        month: month.map(parse_month_anchor).transpose()?,
        criteria,
    };
    let report = build_report(&state.records, &request, &state.config);
    Ok(export_report(&report)?)
}

pub fn write_report(json: &str, out: &Path) -> Result<()> {
    std::fs::write(out, json).with_context(|| format!("writing report to {}", out.display()))?;
    tracing::info!(path = %out.display(), bytes = json.len(), "report written");
    Ok(())
}
