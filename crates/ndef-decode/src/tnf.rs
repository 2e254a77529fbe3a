use serde::{Deserialize, Serialize};

/// Type Name Format, the 3 bit field saying how a record's type string is interpreted
#[derive(
    Debug,
    Copy,
    Clone,
    Hash,
    PartialEq,
    Eq,
    derive_more::Display,
    Serialize,
    Deserialize,
    uniffi::Enum,
)]
pub enum TypeNameFormat {
    #[display("Empty")]
    Empty,
    #[display("NFC Forum well-known type")]
    WellKnown,
    #[display("Media type (RFC 2046)")]
    Mime,
    #[display("Absolute URI (RFC 3986)")]
    AbsoluteUri,
    #[display("NFC Forum external type")]
    External,
    #[display("Unknown")]
    Unknown,
    #[display("Unchanged")]
    Unchanged,
    #[display("Reserved")]
    Reserved,
}

impl TypeNameFormat {
    /// Only the low 3 bits are looked at
    pub fn from_bits(bits: u8) -> Self {
        match bits & 0b111 {
            0 => Self::Empty,
            1 => Self::WellKnown,
            2 => Self::Mime,
            3 => Self::AbsoluteUri,
            4 => Self::External,
            5 => Self::Unknown,
            6 => Self::Unchanged,
            _ => Self::Reserved,
        }
    }

    pub fn bits(self) -> u8 {
        match self {
            Self::Empty => 0,
            Self::WellKnown => 1,
            Self::Mime => 2,
            Self::AbsoluteUri => 3,
            Self::External => 4,
            Self::Unknown => 5,
            Self::Unchanged => 6,
            Self::Reserved => 7,
        }
    }

    /// The format a platform reader reports for one of its record type names
    pub fn for_record_type(record_type: &str) -> Self {
        match record_type {
            "empty" => Self::Empty,
            "mime" => Self::Mime,
            "absolute-uri" | "absolute-url" => Self::AbsoluteUri,
            "external" => Self::External,
            "unknown" => Self::Unknown,
            "unchanged" => Self::Unchanged,
            _ => Self::WellKnown,
        }
    }
}

impl From<u8> for TypeNameFormat {
    fn from(bits: u8) -> Self {
        Self::from_bits(bits)
    }
}

impl From<TypeNameFormat> for u8 {
    fn from(tnf: TypeNameFormat) -> Self {
        tnf.bits()
    }
}
