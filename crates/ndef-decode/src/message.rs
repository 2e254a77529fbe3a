//! Raw NDEF messages, as found in tag dumps, split into [`RawRecord`]s

use ndef_util::result_ext::ResultExt as _;
use tracing::debug;
use winnow::Parser as _;

use crate::{parser, record::RawRecord};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, uniffi::Error)]
#[uniffi(flat_error)]
pub enum WireError {
    #[error("malformed NDEF message: {0}")]
    Malformed(String),

    #[error("record {index} is chunked, chunked records are not supported")]
    ChunkedUnsupported { index: usize },

    #[error("no NDEF message TLV found")]
    MissingNdefTlv,
}

pub type Error = WireError;
type Result<T, E = Error> = std::result::Result<T, E>;

/// Split a bare NDEF message into records, in wire order
///
/// Zero bytes is an empty message, bytes after the record flagged as last are ignored
pub fn parse_message(data: &[u8]) -> Result<Vec<RawRecord>> {
    if data.is_empty() {
        return Ok(Vec::new());
    }

    let mut input = data;
    let records = parser::ndef_records
        .parse_next(&mut input)
        .map_err(|error| {
            let message = truncated_record(data).unwrap_or_else(|| error.to_string());
            Error::Malformed(message)
        })?;

    if !input.is_empty() {
        debug!("ignoring {} bytes after the last record", input.len());
    }

    if let Some(index) = records.iter().position(|record| record.header.chunked) {
        return Err(Error::ChunkedUnsupported { index });
    }

    Ok(records.into_iter().map(RawRecord::from).collect())
}

/// Find the NDEF message TLV in a Type 2 tag memory dump and split it into records
pub fn parse_tlv_message(data: &[u8]) -> Result<Vec<RawRecord>> {
    let mut input = data;
    let message = parser::ndef_tlv
        .parse_next(&mut input)
        .map_err_str(Error::Malformed)?
        .ok_or(Error::MissingNdefTlv)?;

    parse_message(message)
}

/// The first record whose header claims more bytes than are left
fn truncated_record(data: &[u8]) -> Option<String> {
    let mut input = data;
    let mut index = 0;

    loop {
        let available = input.len();
        let header = parser::ndef_header.parse_next(&mut input).ok()?;
        let needed = header.record_length();

        if needed > available {
            return Some(format!(
                "record {index} needs {needed} bytes, only {available} left"
            ));
        }

        if header.message_end {
            return None;
        }

        input = input.get(needed - header.encoded_length()..)?;
        index += 1;
    }
}
