//! Reading events delivered by the platform NFC reader

use ndef_decode::RawRecord;
use ndef_util::result_ext::ResultExt as _;
use serde::{Deserialize, Serialize};

use crate::{
    report::ReportError,
    tag::{SerialNumber, TagMeta},
};

/// One successful tag read
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, uniffi::Record)]
#[serde(rename_all = "camelCase", default)]
pub struct ReadingEvent {
    pub serial_number: Option<SerialNumber>,
    pub tag: Option<TagMeta>,
    pub message: Option<NdefMessage>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, uniffi::Record)]
#[serde(default)]
pub struct NdefMessage {
    pub records: Option<Vec<RawRecord>>,
}

impl ReadingEvent {
    /// An event carrying a message with `records`
    pub fn from_records(records: Vec<RawRecord>) -> Self {
        Self {
            message: Some(NdefMessage {
                records: Some(records),
            }),
            ..Default::default()
        }
    }

    /// Parse the JSON shape the platform layer emits
    pub fn from_json(json: &str) -> Result<Self, ReportError> {
        let value: serde_json::Value =
            serde_json::from_str(json).map_err_str(ReportError::InvalidEvent)?;

        // checked before deserializing so a bad records value gets its own error
        if let Some(records) = value.pointer("/message/records") {
            if !records.is_array() && !records.is_null() {
                return Err(ReportError::RecordsNotASequence);
            }
        }

        serde_json::from_value(value).map_err_str(ReportError::InvalidEvent)
    }

    pub fn with_serial_number(mut self, serial_number: impl Into<SerialNumber>) -> Self {
        self.serial_number = Some(serial_number.into());
        self
    }

    pub fn with_tag(mut self, tag: TagMeta) -> Self {
        self.tag = Some(tag);
        self
    }

    /// Records of the message, or why there aren't any to look at
    pub fn records(&self) -> Result<&[RawRecord], ReportError> {
        let message = self.message.as_ref().ok_or(ReportError::NoMessage)?;
        let records = message.records.as_ref().ok_or(ReportError::NoRecords)?;

        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_json_full_event() {
        let json = r#"{
            "serialNumber": "04:a2:1b:3c",
            "tag": { "technologies": ["NfcA", "Ndef"], "atqa": 68, "sak": 0, "maxSize": 868 },
            "message": {
                "records": [
                    { "typeNameFormat": 1, "recordType": "text", "data": [2, 101, 110, 72, 105] }
                ]
            }
        }"#;

        let event = ReadingEvent::from_json(json).unwrap();
        assert_eq!(
            event.serial_number,
            Some(SerialNumber::Text("04:a2:1b:3c".into()))
        );
        assert_eq!(event.tag.as_ref().and_then(|tag| tag.max_size), Some(868));

        let records = event.records().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].payload, b"\x02enHi");
    }

    #[test]
    fn from_json_android_atqa_bytes() {
        let json = r#"{
            "tag": { "technologies": ["NfcA"], "atqa": [68, 0], "sak": 0 },
            "message": { "records": [] }
        }"#;

        let event = ReadingEvent::from_json(json).unwrap();
        assert_eq!(event.tag.and_then(|tag| tag.atqa), Some(0x0044));
    }

    #[test]
    fn from_json_records_not_a_list() {
        let json = r#"{ "message": { "records": { "0": {} } } }"#;
        assert_eq!(
            ReadingEvent::from_json(json),
            Err(ReportError::RecordsNotASequence)
        );

        let json = r#"{ "message": { "records": "none" } }"#;
        assert_eq!(
            ReadingEvent::from_json(json),
            Err(ReportError::RecordsNotASequence)
        );
    }

    #[test]
    fn from_json_missing_pieces() {
        let no_message = ReadingEvent::from_json("{}").unwrap();
        assert_eq!(no_message.records(), Err(ReportError::NoMessage));

        let no_records = ReadingEvent::from_json(r#"{ "message": {} }"#).unwrap();
        assert_eq!(no_records.records(), Err(ReportError::NoRecords));

        let json = r#"{ "message": { "records": null } }"#;
        let null_records = ReadingEvent::from_json(json).unwrap();
        assert_eq!(null_records.records(), Err(ReportError::NoRecords));
    }

    #[test]
    fn from_json_invalid() {
        assert!(matches!(
            ReadingEvent::from_json("{"),
            Err(ReportError::InvalidEvent(_))
        ));
    }

    #[test]
    fn zero_records_is_still_a_message() {
        let event = ReadingEvent::from_records(vec![]);
        assert_eq!(event.records().unwrap().len(), 0);
    }
}
