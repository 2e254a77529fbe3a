use serde::Serialize;

use crate::{kind::RecordKind, payload::TextEncoding};

/// The decoded view of one record's payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, uniffi::Record)]
#[serde(rename_all = "camelCase")]
pub struct ParsedContent {
    pub kind: RecordKind,
    /// Decoded text, or the raw hex/ASCII rendering when decoding failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    pub metadata: ContentMetadata,
    /// Set when decoding failed, `content` is then only the raw fallback
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Kind specific details, only the keys a kind sets are serialized
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, uniffi::Record)]
#[serde(rename_all = "camelCase")]
pub struct ContentMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encoding: Option<TextEncoding>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix_code: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtype: Option<String>,
}

impl ParsedContent {
    pub fn new(kind: RecordKind) -> Self {
        Self {
            kind,
            content: None,
            metadata: ContentMetadata::default(),
            error: None,
        }
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn with_metadata(mut self, metadata: ContentMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    /// Raw hex/ASCII content plus a description of why decoding failed
    pub fn fallback(kind: RecordKind, payload: &[u8], error: impl ToString) -> Self {
        Self {
            kind,
            content: Some(ndef_util::format_raw(payload)),
            metadata: ContentMetadata::default(),
            error: Some(error.to_string()),
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.error.is_some()
    }
}

impl ContentMetadata {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}
