//! Import of API payloads and export of finished reports
//!
//! Records arrive as JSON from the register API, either as a bare list or
//! wrapped the way a GraphQL response wraps them. Reports go out with a
//! schema version so older readers can refuse what they do not understand.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::components::DeathRecord;
use crate::error::{RegisterError, RegisterResult};
use crate::register::RegisterReport;

pub const REPORT_VERSION: u8 = 1;

// ============================================================================
// Record import
// ============================================================================

#[derive(Debug, Deserialize)]
struct RecordList {
    #[serde(rename = "deathRecords")]
    death_records: Vec<DeathRecord>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RecordPayload {
    Bare(Vec<DeathRecord>),
    Envelope { data: RecordList },
    Wrapped(RecordList),
}

/// Decode records from any of the accepted payload shapes.
pub fn import_records(json: &str) -> RegisterResult<Vec<DeathRecord>> {
    let records = match serde_json::from_str(json)? {
        RecordPayload::Bare(records) => records,
        RecordPayload::Envelope { data } => data.death_records,
        RecordPayload::Wrapped(list) => list.death_records,
    };
    tracing::debug!(count = records.len(), "imported death records");
    Ok(records)
}

pub fn load_records(path: &Path) -> RegisterResult<Vec<DeathRecord>> {
    let raw = std::fs::read_to_string(path).map_err(|source| RegisterError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    import_records(&raw)
}

// ============================================================================
// Report export
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportExport {
    pub version: u8,
    pub report: RegisterReport,
}

pub fn export_report(report: &RegisterReport) -> RegisterResult<String> {
    let export = ReportExport {
        version: REPORT_VERSION,
        report: report.clone(),
    };
    Ok(serde_json::to_string_pretty(&export)?)
}

pub fn import_report(json: &str) -> RegisterResult<RegisterReport> {
    let export: ReportExport = serde_json::from_str(json)?;
    if export.version != REPORT_VERSION {
        return Err(RegisterError::UnsupportedVersion(export.version));
    }
    Ok(export.report)
}
