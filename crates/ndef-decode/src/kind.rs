use strum::IntoEnumIterator as _;

use crate::{record::RawRecord, tnf::TypeNameFormat};

/// What a record holds, decided from its record type and, for custom well-known types, its
/// media type
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, uniffi::Enum)]
#[serde(into = "String")]
pub enum RecordKind {
    Empty,
    Text,
    Url,
    Mime,
    SmartPoster,
    AbsoluteUri,
    External,
    /// A custom well-known type, told apart by its media type
    WellKnown {
        record_type: String,
        media: WellKnownMedia,
    },
    Unrecognized { record_type: String },
}

/// Media types found on custom well-known records
#[derive(
    Debug,
    Copy,
    Clone,
    PartialEq,
    Eq,
    Hash,
    derive_more::Display,
    strum::EnumIter,
    serde::Serialize,
    uniffi::Enum,
)]
pub enum WellKnownMedia {
    #[display("Wi-Fi configuration")]
    WifiConfig,
    #[display("Bluetooth configuration")]
    BluetoothConfig,
    #[display("vCard")]
    VCard,
    #[display("Android application record")]
    AndroidApp,
    #[display("Unrecognized well-known record")]
    Other,
}

impl RecordKind {
    pub fn classify(record: &RawRecord) -> Self {
        match record.record_type.as_str() {
            "empty" => Self::Empty,
            "text" => Self::Text,
            "url" => Self::Url,
            "mime" => Self::Mime,
            "smart-poster" => Self::SmartPoster,
            "absolute-uri" | "absolute-url" => Self::AbsoluteUri,
            "external" => Self::External,
            other if record.tnf() == TypeNameFormat::WellKnown => Self::WellKnown {
                record_type: other.to_string(),
                media: WellKnownMedia::from_media_type(record.media_type.as_deref()),
            },
            other => Self::Unrecognized {
                record_type: other.to_string(),
            },
        }
    }

    /// The record type string this kind was classified from
    pub fn as_str(&self) -> &str {
        match self {
            Self::Empty => "empty",
            Self::Text => "text",
            Self::Url => "url",
            Self::Mime => "mime",
            Self::SmartPoster => "smart-poster",
            Self::AbsoluteUri => "absolute-uri",
            Self::External => "external",
            Self::WellKnown { record_type, .. } => record_type,
            Self::Unrecognized { record_type } => record_type,
        }
    }
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<RecordKind> for String {
    fn from(kind: RecordKind) -> Self {
        kind.as_str().to_string()
    }
}

impl WellKnownMedia {
    pub fn from_media_type(media_type: Option<&str>) -> Self {
        let Some(media_type) = media_type.map(str::trim) else {
            return Self::Other;
        };

        Self::iter()
            .find(|media| {
                media
                    .media_type()
                    .is_some_and(|known| known.eq_ignore_ascii_case(media_type))
            })
            .unwrap_or(Self::Other)
    }

    pub fn media_type(self) -> Option<&'static str> {
        match self {
            Self::WifiConfig => Some("application/vnd.wfa.wsc"),
            Self::BluetoothConfig => Some("application/vnd.bluetooth.ep.oob"),
            Self::VCard => Some("text/vcard"),
            Self::AndroidApp => Some("application/vnd.google.android.package"),
            Self::Other => None,
        }
    }
}
