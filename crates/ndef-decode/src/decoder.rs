//! Turns one [`RawRecord`] into [`ParsedContent`]
//!
//! [`try_decode`] reports why a payload couldn't be decoded, [`decode`] never fails and swaps
//! in the raw hex/ASCII rendering instead

use tracing::{debug, warn};
use winnow::Parser as _;

use crate::{
    content::{ContentMetadata, ParsedContent},
    kind::{RecordKind, WellKnownMedia},
    parser,
    payload::{TextEncoding, TextPayload, UriPayload, uri_prefix},
    record::RawRecord,
};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("invalid UTF-8 text: {0}")]
    InvalidUtf8(String),

    #[error("invalid UTF-16 text: {0}")]
    InvalidUtf16(String),

    #[error("UTF-16 text has an odd number of bytes ({0})")]
    OddUtf16Length(usize),

    #[error("language code needs {language_length} bytes, only {available} follow the status byte")]
    TruncatedText {
        language_length: usize,
        available: usize,
    },

    #[error("malformed payload: {0}")]
    Malformed(String),
}

pub type Error = DecodeError;
type Result<T, E = Error> = std::result::Result<T, E>;

/// Decode a record, falling back to the raw payload rendering when decoding fails
pub fn decode(record: &RawRecord) -> ParsedContent {
    match try_decode(record) {
        Ok(content) => content,
        Err(error) => {
            warn!(
                "unable to decode {} record, using raw bytes: {error}",
                record.record_type
            );
            ParsedContent::fallback(RecordKind::classify(record), &record.payload, error)
        }
    }
}

/// Decode a record, or say why its payload isn't what its type claims
pub fn try_decode(record: &RawRecord) -> Result<ParsedContent> {
    let kind = RecordKind::classify(record);
    let payload = record.payload.as_slice();

    debug!("decoding {kind} record, {} bytes", payload.len());

    if payload.is_empty() {
        return Ok(empty_payload(kind));
    }

    let parsed = match kind {
        RecordKind::Empty => ParsedContent::new(kind),

        RecordKind::Text => {
            let text = text_payload(payload)?;
            let metadata = ContentMetadata {
                language: Some(text.language),
                encoding: Some(text.encoding),
                ..Default::default()
            };

            ParsedContent::new(kind)
                .with_content(text.text)
                .with_metadata(metadata)
        }

        RecordKind::Url => {
            let uri = uri_payload(payload)?;
            let metadata = ContentMetadata {
                prefix_code: Some(uri.prefix_code),
                prefix: Some(uri.prefix().to_string()),
                ..Default::default()
            };

            ParsedContent::new(kind)
                .with_content(uri.uri)
                .with_metadata(metadata)
        }

        RecordKind::Mime => {
            let text = utf8(payload)?;
            let media_type = record.media_type.clone();

            let content = match &media_type {
                Some(media_type) if media_type.contains("json") => pretty_json(text),
                _ => text,
            };

            let metadata = ContentMetadata {
                media_type,
                ..Default::default()
            };

            ParsedContent::new(kind)
                .with_content(content)
                .with_metadata(metadata)
        }

        // nested records are not expanded, see `message::parse_message` for that
        RecordKind::SmartPoster => {
            ParsedContent::new(kind)
                .with_content(ndef_util::format_raw(payload))
        }

        RecordKind::AbsoluteUri | RecordKind::External | RecordKind::Unrecognized { .. } => {
            let text = utf8(payload)?;
            let metadata = ContentMetadata {
                media_type: record.media_type.clone(),
                ..Default::default()
            };

            ParsedContent::new(kind)
                .with_content(text)
                .with_metadata(metadata)
        }

        // binary sub formats (WSC, Bluetooth OOB, ...) are only shown as text
        RecordKind::WellKnown { media, .. } => {
            let text = utf8(payload)?;
            let metadata = ContentMetadata {
                media_type: record.media_type.clone(),
                subtype: (media != WellKnownMedia::Other).then(|| media.to_string()),
                ..Default::default()
            };

            ParsedContent::new(kind)
                .with_content(text)
                .with_metadata(metadata)
        }
    };

    Ok(parsed)
}

// private
fn empty_payload(kind: RecordKind) -> ParsedContent {
    match kind {
        RecordKind::Text => ParsedContent::new(kind).with_content(""),
        kind => ParsedContent::new(kind),
    }
}

fn text_payload(payload: &[u8]) -> Result<TextPayload> {
    let mut input = payload;
    let parts = parser::text_payload.parse_next(&mut input).map_err(|_| {
        Error::TruncatedText {
            language_length: (payload[0] & 0x3F) as usize,
            available: payload.len() - 1,
        }
    })?;

    let text = match parts.encoding {
        TextEncoding::Utf8 => utf8(parts.text)?,
        TextEncoding::Utf16 => utf16(parts.text)?,
    };

    Ok(TextPayload {
        encoding: parts.encoding,
        language: String::from_utf8_lossy(parts.language).into_owned(),
        text,
    })
}

fn uri_payload(payload: &[u8]) -> Result<UriPayload> {
    let mut input = payload;

    let (prefix_code, remainder) = parser::uri_payload
        .parse_next(&mut input)
        .map_err(|error| Error::Malformed(error.to_string()))?;

    let uri = format!("{}{}", uri_prefix(prefix_code), utf8(remainder)?);
    Ok(UriPayload { prefix_code, uri })
}

fn utf8(bytes: &[u8]) -> Result<String> {
    std::str::from_utf8(bytes)
        .map(str::to_string)
        .map_err(|error| Error::InvalidUtf8(error.to_string()))
}

/// Byte order mark wins, big endian without one
fn utf16(bytes: &[u8]) -> Result<String> {
    if bytes.len() % 2 != 0 {
        return Err(Error::OddUtf16Length(bytes.len()));
    }

    let (bytes, little_endian) = match bytes {
        [0xFF, 0xFE, rest @ ..] => (rest, true),
        [0xFE, 0xFF, rest @ ..] => (rest, false),
        _ => (bytes, false),
    };

    let units = bytes
        .chunks_exact(2)
        .map(|chunk| {
            if little_endian {
                u16::from_le_bytes([chunk[0], chunk[1]])
            } else {
                u16::from_be_bytes([chunk[0], chunk[1]])
            }
        })
        .collect::<Vec<u16>>();

    String::from_utf16(&units)
        .map_err(|error| Error::InvalidUtf16(error.to_string()))
}

/// Re-indent JSON with two spaces, text that isn't JSON is returned untouched
fn pretty_json(text: String) -> String {
    serde_json::from_str::<serde_json::Value>(&text)
        .and_then(|value| serde_json::to_string_pretty(&value))
        .unwrap_or(text)
}
