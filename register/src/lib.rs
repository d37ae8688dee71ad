//! Memorial Register Engine
//!
//! Derived analytics for a church death register: filtered listings, cohort
//! and trend statistics, a memorial calendar and an upcoming-anniversary feed.
//! Every entry point is a pure function of the records and the reporting
//! context passed in.

pub mod components;
pub mod config;
pub mod dates;
pub mod error;
pub mod persistence;
pub mod register;
pub mod systems;

pub use components::*;
pub use config::RegisterConfig;
pub use error::{RegisterError, RegisterResult};
pub use persistence::{export_report, import_records, import_report, load_records, ReportExport};
pub use register::{build_report, RegisterReport, ReportRequest};
