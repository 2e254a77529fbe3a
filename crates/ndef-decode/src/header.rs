use crate::tnf::TypeNameFormat;

/// The flags and lengths at the start of every record on the wire
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NdefHeader {
    /// MB, first record of the message
    pub message_begin: bool,
    /// ME, last record of the message
    pub message_end: bool,
    /// CF, payload continues in the next record
    pub chunked: bool,
    /// SR, payload length fits in a single byte
    pub short_record: bool,
    /// IL, an id length byte follows
    pub has_id_length: bool,
    pub type_name_format: TypeNameFormat,
    pub type_length: u8,
    pub payload_length: u32,
    pub id_length: Option<u8>,
}

impl NdefHeader {
    /// Bytes taken by the header itself, before the type field
    pub fn encoded_length(&self) -> usize {
        let payload_length_bytes = if self.short_record { 1 } else { 4 };
        let id_length_bytes = usize::from(self.has_id_length);

        2 + payload_length_bytes + id_length_bytes
    }

    /// Bytes taken by the whole record, header included
    pub fn record_length(&self) -> usize {
        self.encoded_length()
            + self.type_length as usize
            + self.id_length.unwrap_or(0) as usize
            + self.payload_length as usize
    }
}
