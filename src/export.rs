//! Renderings of a finished report for sharing: JSON, a flat CSV table and plain text

pub mod csv;
pub mod json;
pub mod text;

/// Shown wherever a tag field wasn't reported
pub const NOT_AVAILABLE: &str = "N/A";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, uniffi::Error)]
#[uniffi(flat_error)]
pub enum ExportError {
    #[error("failed to serialize report to json: {0}")]
    Json(String),

    #[error("failed to write csv row: {0}")]
    WriteCsvRow(String),

    #[error("failed to finalize csv: {0}")]
    FinalizeCsv(String),

    #[error("csv output is not valid utf-8: {0}")]
    InvalidUtf8(String),

    #[error("no report to export, scan a tag first")]
    NoReport,
}

pub type Error = ExportError;
type Result<T, E = Error> = std::result::Result<T, E>;

fn yes_no(value: bool) -> &'static str {
    if value { "Yes" } else { "No" }
}

fn or_na(value: Option<impl ToString>) -> String {
    value
        .map(|value| value.to_string())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}
