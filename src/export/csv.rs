use csv::WriterBuilder;
use ndef_util::result_ext::ResultExt as _;

use super::{ExportError, Result, or_na, yes_no};
use crate::report::{DecodedRecord, TagReport};

pub const HEADER: [&str; 2] = ["Field", "Value"];

/// One `Field,Value` row per report attribute
pub type Row = (String, String);

/// Flat `Field,Value` table, records are numbered from 1
pub fn to_csv(report: &TagReport) -> Result<String> {
    let mut csv = WriterBuilder::new()
        .has_headers(false)
        .from_writer(vec![]);

    csv.write_record(HEADER)
        .map_err_str(ExportError::WriteCsvRow)?;

    for (field, value) in rows(report) {
        csv.write_record([field, value])
            .map_err_str(ExportError::WriteCsvRow)?;
    }

    let bytes = csv.into_inner().map_err_str(ExportError::FinalizeCsv)?;
    String::from_utf8(bytes).map_err_str(ExportError::InvalidUtf8)
}

pub fn rows(report: &TagReport) -> Vec<Row> {
    let scan = &report.scan_info;
    let tag = &report.tag_technical;
    let message = &report.ndef_message;

    let technologies = (!tag.technologies.is_empty())
        .then(|| tag.technologies.join(", "));

    let mut rows = vec![
        row("Scan Timestamp", &scan.timestamp),
        row("Unix Timestamp", scan.unix_timestamp),
        row("Scanner Version", &scan.scanner_version),
        row("Tag Detected", yes_no(tag.detected)),
        row("Serial Number", or_na(tag.serial_number.as_ref())),
        row("Tag Type", &tag.tag_type_label),
        row("Technologies", or_na(technologies)),
        row("Memory", or_na(tag.memory_info.as_ref())),
        row("ATQA", or_na(tag.atqa.as_ref())),
        row("SAK", or_na(tag.sak.as_ref())),
        row("Max Size (bytes)", or_na(tag.max_size)),
        row("Writable", or_na(tag.is_writable.map(yes_no))),
        row(
            "Can Make Read Only",
            or_na(tag.can_make_read_only.map(yes_no)),
        ),
        row("Has NDEF Message", yes_no(message.has_message)),
        row("Record Count", message.record_count),
    ];

    for (index, record) in message.records.iter().enumerate() {
        rows.extend(record_rows(index + 1, record));
    }

    rows
}

fn record_rows(number: usize, record: &DecodedRecord) -> Vec<Row> {
    let field = |name: &str| format!("Record {number} {name}");

    let mut rows = vec![
        (field("Type"), record.record_type.clone()),
        (field("TNF"), record.type_name_format.to_string()),
    ];

    let optional = [
        ("Media Type", record.media_type.clone()),
        ("ID", record.id.clone()),
    ];

    rows.extend(present(optional, field));
    rows.push(row(&field("Data Length"), record.data_length));

    let Some(parsed) = &record.parsed_content else {
        return rows;
    };

    let metadata = &parsed.metadata;
    let details = [
        ("Hex", record.hex.clone()),
        ("ASCII", record.ascii.clone()),
        ("Content", parsed.content.clone()),
        ("Language", metadata.language.clone()),
        ("Encoding", metadata.encoding.map(|encoding| encoding.to_string())),
        ("URI Prefix", metadata.prefix.clone().filter(|prefix| !prefix.is_empty())),
        ("Subtype", metadata.subtype.clone()),
        ("Parsing Error", record.parsing_error.clone()),
    ];

    rows.extend(present(details, field));
    rows
}

/// Rows for the fields that have a value, absent ones are left out
fn present<const N: usize>(
    fields: [(&str, Option<String>); N],
    field: impl Fn(&str) -> String,
) -> impl Iterator<Item = Row> {
    fields
        .into_iter()
        .filter_map(move |(name, value)| Some((field(name), value?)))
}

fn row(field: &str, value: impl ToString) -> Row {
    (field.to_string(), value.to_string())
}
