//! winnow parsers for the NDEF wire format and the well-known payload layouts
//!
//! Input is always complete, a tag dump or a payload handed over by the platform

use winnow::{
    ModalResult, Parser,
    binary::{
        be_u8, be_u16, be_u32,
        bits::{bits, bool as take_bool, take as take_bits},
    },
    error::{ContextError, ErrMode},
    token::{rest, take},
};

use crate::{header::NdefHeader, payload::TextEncoding, record::NdefRecord, tnf::TypeNameFormat};

pub const TLV_NULL: u8 = 0x00;
pub const TLV_NDEF_MESSAGE: u8 = 0x03;
pub const TLV_TERMINATOR: u8 = 0xFE;

/// Slices of a text record payload, still undecoded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextParts<'i> {
    pub encoding: TextEncoding,
    pub language: &'i [u8],
    pub text: &'i [u8],
}

/// Status byte, language code, then the text
///
/// Status byte: bit 7 UTF-16 flag, bit 6 reserved, bits 0-5 language code length
pub fn text_payload<'i>(input: &mut &'i [u8]) -> ModalResult<TextParts<'i>> {
    let (is_utf16, _reserved, language_length): (bool, bool, u8) =
        bits::<_, _, ErrMode<ContextError>, _, _>((take_bool, take_bool, take_bits(6_u8)))
            .parse_next(input)?;

    let language = take(language_length as usize).parse_next(input)?;
    let text = rest.parse_next(input)?;

    let encoding = if is_utf16 {
        TextEncoding::Utf16
    } else {
        TextEncoding::Utf8
    };

    Ok(TextParts {
        encoding,
        language,
        text,
    })
}

/// Prefix code, then the rest of the uri
pub fn uri_payload<'i>(input: &mut &'i [u8]) -> ModalResult<(u8, &'i [u8])> {
    let prefix_code = be_u8.parse_next(input)?;
    let remainder = rest.parse_next(input)?;

    Ok((prefix_code, remainder))
}

/// Records until one has the message end flag set, or the input runs out
pub fn ndef_records(input: &mut &[u8]) -> ModalResult<Vec<NdefRecord>> {
    let mut records = Vec::new();

    loop {
        let record = ndef_record.parse_next(input)?;
        let message_end = record.header.message_end;
        records.push(record);

        if message_end || input.is_empty() {
            break;
        }
    }

    Ok(records)
}

pub fn ndef_record(input: &mut &[u8]) -> ModalResult<NdefRecord> {
    let header = ndef_header.parse_next(input)?;
    let type_ = take(header.type_length as usize).parse_next(input)?.to_vec();

    let id = match header.id_length {
        Some(id_length) => Some(take(id_length as usize).parse_next(input)?.to_vec()),
        None => None,
    };

    let payload = take(header.payload_length as usize)
        .parse_next(input)?
        .to_vec();

    Ok(NdefRecord {
        header,
        type_,
        id,
        payload,
    })
}

pub fn ndef_header(input: &mut &[u8]) -> ModalResult<NdefHeader> {
    let (message_begin, message_end, chunked, short_record, has_id_length, type_name_format) =
        header_flags(input)?;

    let type_length = be_u8.parse_next(input)?;

    let payload_length = if short_record {
        be_u8.map(|length: u8| length as u32).parse_next(input)?
    } else {
        be_u32.parse_next(input)?
    };

    let id_length = if has_id_length {
        Some(be_u8.parse_next(input)?)
    } else {
        None
    };

    Ok(NdefHeader {
        message_begin,
        message_end,
        chunked,
        short_record,
        has_id_length,
        type_name_format: TypeNameFormat::from_bits(type_name_format),
        type_length,
        payload_length,
        id_length,
    })
}

/// The value of the first NDEF message TLV, `None` if a terminator TLV comes first
///
/// NULL TLVs are skipped, any other TLV (lock/memory control, proprietary) is stepped over
pub fn ndef_tlv<'i>(input: &mut &'i [u8]) -> ModalResult<Option<&'i [u8]>> {
    loop {
        let tag = be_u8.parse_next(input)?;

        match tag {
            TLV_NULL => continue,
            TLV_TERMINATOR => return Ok(None),
            _ => {}
        }

        let length = tlv_length.parse_next(input)?;
        let value = take(length as usize).parse_next(input)?;

        if tag == TLV_NDEF_MESSAGE {
            return Ok(Some(value));
        }
    }
}

// private
fn header_flags(input: &mut &[u8]) -> ModalResult<(bool, bool, bool, bool, bool, u8)> {
    bits::<_, _, ErrMode<ContextError>, _, _>((
        take_bool,
        take_bool,
        take_bool,
        take_bool,
        take_bool,
        take_bits(3_u8),
    ))
    .parse_next(input)
}

/// One byte, or `0xFF` followed by a big endian u16
fn tlv_length(input: &mut &[u8]) -> ModalResult<u16> {
    let length_indicator = be_u8.parse_next(input)?;

    if length_indicator == 0xFF {
        be_u16.parse_next(input)
    } else {
        Ok(length_indicator as u16)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_header_parse() {
        let mut header_bytes: &[u8] = &[0xD1, 0x01, 0x0D, 0x55, 0x02];
        let header = ndef_header(&mut header_bytes).unwrap();

        assert!(header.message_begin);
        assert!(header.message_end);
        assert!(!header.chunked);
        assert!(header.short_record);
        assert!(!header.has_id_length);
        assert_eq!(header.type_name_format, TypeNameFormat::WellKnown);
        assert_eq!(header.type_length, 1);
        assert_eq!(header.payload_length, 13);
        assert_eq!(header.encoded_length(), 3);

        // only the header was consumed
        assert_eq!(header_bytes, &[0x55, 0x02]);
    }

    #[test]
    fn long_record_header_with_id() {
        // MB ME IL, mime, 4 byte payload length
        let mut input: &[u8] = &[0xCA, 0x0A, 0x00, 0x00, 0x01, 0x00, 0x02];
        let header = ndef_header(&mut input).unwrap();

        assert!(!header.short_record);
        assert!(header.has_id_length);
        assert_eq!(header.type_name_format, TypeNameFormat::Mime);
        assert_eq!(header.payload_length, 256);
        assert_eq!(header.id_length, Some(2));
        assert_eq!(header.record_length(), 7 + 10 + 2 + 256);
    }

    #[test]
    fn text_payload_parts() {
        let mut input: &[u8] = b"\x02enHi";
        let parts = text_payload(&mut input).unwrap();

        assert_eq!(parts.encoding, TextEncoding::Utf8);
        assert_eq!(parts.language, b"en");
        assert_eq!(parts.text, b"Hi");
        assert!(input.is_empty());
    }

    #[test]
    fn text_payload_utf16_flag_and_reserved_bit() {
        // utf-16 flag and the reserved bit set, language length 5
        let mut input: &[u8] = b"\xC5en-US\x00H";
        let parts = text_payload(&mut input).unwrap();

        assert_eq!(parts.encoding, TextEncoding::Utf16);
        assert_eq!(parts.language, b"en-US");
        assert_eq!(parts.text, b"\x00H");
    }

    #[test]
    fn text_payload_truncated_language() {
        let mut input: &[u8] = b"\x05en";
        assert!(text_payload(&mut input).is_err());
    }

    #[test]
    fn uri_payload_parts() {
        let mut input: &[u8] = b"\x04example.com";
        let (code, remainder) = uri_payload(&mut input).unwrap();

        assert_eq!(code, 4);
        assert_eq!(remainder, b"example.com");
    }

    #[test]
    fn two_record_message() {
        let mut input: &[u8] = &[
            0x91, 0x01, 0x05, b'T', 0x02, b'e', b'n', b'H', b'i', // text, MB
            0x51, 0x01, 0x04, b'U', 0x03, b'a', b'.', b'b', // url, ME
        ];

        let records = ndef_records(&mut input).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].type_, b"T");
        assert_eq!(records[0].payload, b"\x02enHi");
        assert_eq!(records[1].type_, b"U");
        assert!(records[1].header.message_end);
        assert!(input.is_empty());
    }

    #[test]
    fn stops_at_message_end() {
        let mut input: &[u8] = &[0xD1, 0x01, 0x01, b'U', 0x00, 0x00, 0x00];
        let records = ndef_records(&mut input).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(input, &[0x00, 0x00]);
    }

    #[test]
    fn record_with_id() {
        let mut input: &[u8] = &[0xD9, 0x01, 0x02, 0x01, b'U', b'#', 0x00, b'x'];
        let record = ndef_record(&mut input).unwrap();

        assert_eq!(record.id.as_deref(), Some(&b"#"[..]));
        assert_eq!(record.payload, b"\x00x");
    }

    #[test]
    fn truncated_payload_errors() {
        let mut input: &[u8] = &[0xD1, 0x01, 0x10, b'T', 0x02, b'e'];
        assert!(ndef_record(&mut input).is_err());
    }

    #[test]
    fn tlv_skips_null_and_lock_control() {
        let mut input: &[u8] = &[
            0x00, // null
            0x01, 0x03, 0xA0, 0x0C, 0x34, // lock control
            0x03, 0x03, 0xD0, 0x00, 0x00, // ndef message
            0xFE,
        ];

        let value = ndef_tlv(&mut input).unwrap();
        assert_eq!(value, Some(&[0xD0, 0x00, 0x00][..]));
    }

    #[test]
    fn tlv_three_byte_length() {
        let mut data = vec![0x03, 0xFF, 0x01, 0x00];
        data.extend(std::iter::repeat_n(0xAB, 256));
        data.push(0xFE);

        let mut input = data.as_slice();
        let value = ndef_tlv(&mut input).unwrap().unwrap();
        assert_eq!(value.len(), 256);
    }

    #[test]
    fn tlv_terminator_before_message() {
        let mut input: &[u8] = &[0x00, 0xFE, 0x03, 0x00];
        assert_eq!(ndef_tlv(&mut input).unwrap(), None);
    }
}
