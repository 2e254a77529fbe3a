use serde::{Deserialize, Serialize};

/// URI prefix codes from the NFC Forum URI record type definition
pub const URI_PREFIXES: &[&str] = &[
    "",                           // 0x00 - no prepending
    "http://www.",                // 0x01
    "https://www.",               // 0x02
    "http://",                    // 0x03
    "https://",                   // 0x04
    "tel:",                       // 0x05
    "mailto:",                    // 0x06
    "ftp://anonymous:anonymous@", // 0x07
    "ftp://ftp.",                 // 0x08
    "ftps://",                    // 0x09
    "sftp://",                    // 0x0A
    "smb://",                     // 0x0B
    "nfs://",                     // 0x0C
    "ftp://",                     // 0x0D
    "dav://",                     // 0x0E
    "news:",                      // 0x0F
    "telnet://",                  // 0x10
    "imap:",                      // 0x11
    "rtsp://",                    // 0x12
    "urn:",                       // 0x13
    "pop:",                       // 0x14
    "sip:",                       // 0x15
    "sips:",                      // 0x16
    "tftp:",                      // 0x17
    "btspp://",                   // 0x18
    "btl2cap://",                 // 0x19
    "btgoep://",                  // 0x1A
    "tcpobex://",                 // 0x1B
    "irdaobex://",                // 0x1C
    "file://",                    // 0x1D
    "urn:epc:id:",                // 0x1E
    "urn:epc:tag:",               // 0x1F
    "urn:epc:pat:",               // 0x20
    "urn:epc:raw:",               // 0x21
    "urn:epc:",                   // 0x22
    "urn:nfc:",                   // 0x23
];

/// Prefix for a URI record's first byte, codes past the table resolve to no prefix
pub fn uri_prefix(code: u8) -> &'static str {
    URI_PREFIXES.get(code as usize).copied().unwrap_or("")
}

/// Encoding named by bit 7 of a text record's status byte
#[derive(
    Debug,
    Copy,
    Clone,
    PartialEq,
    Eq,
    Hash,
    derive_more::Display,
    Serialize,
    Deserialize,
    uniffi::Enum,
)]
pub enum TextEncoding {
    #[display("UTF-8")]
    #[serde(rename = "UTF-8")]
    Utf8,
    #[display("UTF-16")]
    #[serde(rename = "UTF-16")]
    Utf16,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextPayload {
    pub encoding: TextEncoding,
    pub language: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UriPayload {
    pub prefix_code: u8,
    pub uri: String,
}

impl UriPayload {
    pub fn prefix(&self) -> &'static str {
        uri_prefix(self.prefix_code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_has_every_standard_code() {
        assert_eq!(URI_PREFIXES.len(), 36);
        assert_eq!(uri_prefix(0x00), "");
        assert_eq!(uri_prefix(0x01), "http://www.");
        assert_eq!(uri_prefix(0x06), "mailto:");
        assert_eq!(uri_prefix(0x23), "urn:nfc:");
    }

    #[test]
    fn out_of_range_code_has_no_prefix() {
        assert_eq!(uri_prefix(0x24), "");
        assert_eq!(uri_prefix(0xFF), "");
    }

    #[test]
    fn encoding_names() {
        assert_eq!(TextEncoding::Utf8.to_string(), "UTF-8");
        assert_eq!(
            serde_json::to_string(&TextEncoding::Utf16).unwrap(),
            "\"UTF-16\""
        );
    }
}
