use ndef_util::result_ext::ResultExt as _;

use super::{ExportError, Result};
use crate::report::TagReport;

/// Pretty printed JSON, absent optional fields are left out
pub fn to_json(report: &TagReport) -> Result<String> {
    serde_json::to_string_pretty(report).map_err_str(ExportError::Json)
}
