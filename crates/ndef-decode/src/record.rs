use serde::{Deserialize, Serialize};

use crate::{header::NdefHeader, tnf::TypeNameFormat};

/// One record as delivered by the platform reader
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, uniffi::Record)]
#[serde(rename_all = "camelCase")]
pub struct RawRecord {
    /// 0-7, see [`TypeNameFormat`]
    pub type_name_format: u8,
    /// Platform record type name, `text`, `url`, `mime`, ... or a custom well-known type
    pub record_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, alias = "data")]
    pub payload: Vec<u8>,
}

impl RawRecord {
    /// A record whose type name format is the one the platform uses for `record_type`
    pub fn new(record_type: impl Into<String>, payload: impl Into<Vec<u8>>) -> Self {
        let record_type = record_type.into();
        let type_name_format = TypeNameFormat::for_record_type(&record_type).bits();

        Self {
            type_name_format,
            record_type,
            media_type: None,
            id: None,
            payload: payload.into(),
        }
    }

    pub fn with_media_type(mut self, media_type: impl Into<String>) -> Self {
        self.media_type = Some(media_type.into());
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_type_name_format(mut self, tnf: TypeNameFormat) -> Self {
        self.type_name_format = tnf.bits();
        self
    }

    pub fn tnf(&self) -> TypeNameFormat {
        TypeNameFormat::from_bits(self.type_name_format)
    }
}

/// A record exactly as it was laid out on the wire
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NdefRecord {
    pub header: NdefHeader,
    pub type_: Vec<u8>,
    pub id: Option<Vec<u8>>,
    pub payload: Vec<u8>,
}

impl From<NdefRecord> for RawRecord {
    /// Names the record the way a platform reader would
    fn from(record: NdefRecord) -> Self {
        let NdefRecord {
            header,
            type_,
            id,
            payload,
        } = record;
        let tnf = header.type_name_format;
        let type_string = String::from_utf8_lossy(&type_).into_owned();

        let (record_type, media_type, payload) = match tnf {
            TypeNameFormat::Empty => ("empty".to_string(), None, payload),
            TypeNameFormat::WellKnown => {
                let record_type = match type_.as_slice() {
                    b"T" => "text".to_string(),
                    b"U" => "url".to_string(),
                    b"Sp" => "smart-poster".to_string(),
                    _ => type_string,
                };

                (record_type, None, payload)
            }
            TypeNameFormat::Mime => ("mime".to_string(), Some(type_string), payload),
            // the uri lives in the type field, the payload is unspecified
            TypeNameFormat::AbsoluteUri => ("absolute-uri".to_string(), None, type_),
            TypeNameFormat::External => ("external".to_string(), Some(type_string), payload),
            TypeNameFormat::Unchanged => ("unchanged".to_string(), None, payload),
            TypeNameFormat::Unknown | TypeNameFormat::Reserved => {
                ("unknown".to_string(), None, payload)
            }
        };

        Self {
            type_name_format: tnf.bits(),
            record_type,
            media_type,
            id: id.map(|id| String::from_utf8_lossy(&id).into_owned()),
            payload,
        }
    }
}
