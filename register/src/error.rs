//! Errors surfaced by the I/O-facing parts of the register.
//!
//! The analytic systems never fail on bad data; they drop what they cannot
//! read. Only decoding payloads, reading files and parsing host input can.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RegisterError {
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to read `{}`: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported report version: {0}")]
    UnsupportedVersion(u8),

    #[error("invalid month `{0}`, expected YYYY-MM")]
    InvalidMonth(String),

    #[error("invalid date `{0}`, expected YYYY-MM-DD")]
    InvalidDate(String),
}

pub type RegisterResult<T> = Result<T, RegisterError>;
