//! Decoding of NDEF records into typed, displayable content
//!
//! Records normally arrive already split by the platform reader ([`RawRecord`]), raw tag
//! dumps can be split with [`message::parse_message`] first

pub mod content;
pub mod decoder;
pub mod header;
pub mod kind;
pub mod message;
pub mod parser;
pub mod payload;
pub mod record;
pub mod tnf;

pub use content::{ContentMetadata, ParsedContent};
pub use decoder::{DecodeError, decode, try_decode};
pub use kind::{RecordKind, WellKnownMedia};
pub use message::{WireError, parse_message, parse_tlv_message};
pub use record::RawRecord;
pub use tnf::TypeNameFormat;

uniffi::setup_scaffolding!();

mod ffi {
    use super::*;

    #[uniffi::export]
    fn decode_record(record: RawRecord) -> ParsedContent {
        decode(&record)
    }

    #[uniffi::export]
    fn parse_ndef_message(data: Vec<u8>) -> Result<Vec<RawRecord>, WireError> {
        parse_message(&data)
    }

    #[uniffi::export]
    fn parse_ndef_tlv_message(data: Vec<u8>) -> Result<Vec<RawRecord>, WireError> {
        parse_tlv_message(&data)
    }
}
