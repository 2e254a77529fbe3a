use super::{or_na, yes_no};
use crate::report::{DecodedRecord, TagReport};

/// Plain text for copying to the clipboard
pub fn to_text(report: &TagReport) -> String {
    let scan = &report.scan_info;
    let tag = &report.tag_technical;
    let message = &report.ndef_message;

    let mut lines = vec![
        "NFC Tag Report".to_string(),
        format!("Scanned: {}", scan.timestamp),
        format!("Scanner: {}", scan.scanner_version),
        String::new(),
        "Tag".to_string(),
        format!("  Type: {}", tag.tag_type_label),
        format!("  Serial Number: {}", or_na(tag.serial_number.as_ref())),
    ];

    if !tag.technologies.is_empty() {
        let technologies = tag.technologies.join(", ");
        lines.push(format!("  Technologies: {technologies}"));
    }

    if let Some(memory_info) = &tag.memory_info {
        lines.push(format!("  Memory: {memory_info}"));
    }

    if let Some(atqa) = &tag.atqa {
        lines.push(format!("  ATQA: {atqa}"));
    }

    if let Some(sak) = &tag.sak {
        lines.push(format!("  SAK: {sak}"));
    }

    if let Some(is_writable) = tag.is_writable {
        lines.push(format!("  Writable: {}", yes_no(is_writable)));
    }

    lines.push(String::new());
    lines.push(format!("NDEF Message: {} records", message.record_count));

    for (index, record) in message.records.iter().enumerate() {
        lines.push(String::new());
        lines.extend(record_lines(index + 1, record));
    }

    lines.join("\n")
}

fn record_lines(number: usize, record: &DecodedRecord) -> Vec<String> {
    let mut lines = vec![format!("Record {number}: {}", record.record_type)];

    if let Some(media_type) = &record.media_type {
        lines.push(format!("  Media Type: {media_type}"));
    }

    if let Some(id) = &record.id {
        lines.push(format!("  ID: {id}"));
    }

    lines.push(format!("  Length: {} bytes", record.data_length));

    let language = record
        .parsed_content
        .as_ref()
        .and_then(|parsed| parsed.metadata.language.as_ref());

    if let Some(language) = language {
        lines.push(format!("  Language: {language}"));
    }

    if let Some(content) = record.content() {
        // multi line content (pretty JSON, raw dumps) stays indented under the record
        let content = content.lines().collect::<Vec<_>>().join("\n    ");
        lines.push(format!("  Content: {content}"));
    }

    if let Some(error) = &record.parsing_error {
        lines.push(format!("  Error: {error}"));
    }

    lines
}
