//! Tag report building, one report per successful read

use jiff::Timestamp;
use ndef_decode::{ParsedContent, RawRecord, RecordKind};
use serde::Serialize;
use tracing::{debug, warn};

use crate::{event::ReadingEvent, tag};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, uniffi::Error)]
pub enum ReportError {
    #[error("No NDEF message found, the tag appears to be empty or unformatted")]
    NoMessage,

    #[error("No readable data found on the tag")]
    NoRecords,

    #[error("The tag's NDEF message is malformed, its records are not a list")]
    RecordsNotASequence,

    #[error("Invalid reading event: {0}")]
    InvalidEvent(String),
}

pub type Error = ReportError;
type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, uniffi::Record)]
#[serde(rename_all = "camelCase")]
pub struct TagReport {
    pub scan_info: ScanInfo,
    pub tag_technical: tag::TagTechnicalInfo,
    pub ndef_message: NdefMessageReport,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, uniffi::Record)]
#[serde(rename_all = "camelCase")]
pub struct ScanInfo {
    /// ISO-8601, millisecond precision, UTC
    pub timestamp: String,
    pub unix_timestamp: i64,
    pub scanner_version: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, uniffi::Record)]
#[serde(rename_all = "camelCase")]
pub struct NdefMessageReport {
    pub has_message: bool,
    pub record_count: u32,
    pub records: Vec<DecodedRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, uniffi::Record)]
#[serde(rename_all = "camelCase")]
pub struct DecodedRecord {
    /// Position in the message, wire order
    pub index: u32,
    pub record_type: String,
    pub type_name_format: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub data_length: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hex: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ascii: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parsed_content: Option<ParsedContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parsing_error: Option<String>,
}

/// Build the report for a reading event, stamped with the current time
pub fn build_report(event: &ReadingEvent, scanner_version: &str) -> Result<TagReport> {
    build_report_at(event, scanner_version, Timestamp::now())
}

/// Build the report for a reading event, stamped with `scanned_at`
///
/// Fails only when the event has no message or no records, a record that can't be decoded
/// is reported on that record instead
pub fn build_report_at(
    event: &ReadingEvent,
    scanner_version: &str,
    scanned_at: Timestamp,
) -> Result<TagReport> {
    let records = event.records()?;

    let scan_info = ScanInfo {
        timestamp: format!("{scanned_at:.3}"),
        unix_timestamp: scanned_at.as_second(),
        scanner_version: scanner_version.to_string(),
    };

    let mut tag_meta = event.tag.clone().unwrap_or_default();
    if event.serial_number.is_some() {
        tag_meta.serial_number = event.serial_number.clone();
    }

    let tag_technical = tag::inspect(&tag_meta);

    let records: Vec<DecodedRecord> = records
        .iter()
        .enumerate()
        .map(|(index, record)| decode_record(index, record))
        .collect();

    debug!("built report with {} records", records.len());

    Ok(TagReport {
        scan_info,
        tag_technical,
        ndef_message: NdefMessageReport {
            has_message: true,
            record_count: records.len() as u32,
            records,
        },
    })
}

/// Raw renderings and decoded content are produced independently, one never hides the other
pub fn decode_record(index: usize, record: &RawRecord) -> DecodedRecord {
    let payload = record.payload.as_slice();

    let (hex, ascii) = if payload.is_empty() {
        (None, None)
    } else {
        (Some(ndef_util::to_hex(payload)), Some(ndef_util::to_ascii(payload)))
    };

    let (parsed_content, parsing_error) = match ndef_decode::try_decode(record) {
        Ok(content) => (Some(content), None),
        Err(error) => {
            warn!(
                "record {index} ({}) could not be decoded: {error}",
                record.record_type
            );

            let kind = RecordKind::classify(record);
            let fallback = ParsedContent::fallback(kind, payload, &error);
            (Some(fallback), Some(error.to_string()))
        }
    };

    DecodedRecord {
        index: index as u32,
        record_type: record.record_type.clone(),
        type_name_format: record.type_name_format,
        media_type: record.media_type.clone(),
        id: record.id.clone(),
        data_length: payload.len() as u32,
        hex,
        ascii,
        parsed_content,
        parsing_error,
    }
}

impl TagReport {
    pub fn records(&self) -> &[DecodedRecord] {
        &self.ndef_message.records
    }
}

impl DecodedRecord {
    pub fn content(&self) -> Option<&str> {
        self.parsed_content
            .as_ref()
            .and_then(|parsed| parsed.content.as_deref())
    }
}
