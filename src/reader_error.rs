//! Errors the platform reader reports instead of a reading

use derive_more::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, strum::EnumIter, uniffi::Enum)]
pub enum ReaderErrorKind {
    #[display("NotAllowed")]
    NotAllowed,
    #[display("NotSupported")]
    NotSupported,
    #[display("NotReadable")]
    NotReadable,
    #[display("Other")]
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, uniffi::Error)]
pub enum ReaderError {
    #[error("NFC permission was denied: {message}")]
    NotAllowed { message: String },

    #[error("NFC is not supported on this device: {message}")]
    NotSupported { message: String },

    #[error("NFC reader is unavailable or the tag could not be read: {message}")]
    NotReadable { message: String },

    #[error("NFC reader error: {message}")]
    Other { message: String },
}

impl ReaderError {
    /// Classify an error notification from the platform reader
    ///
    /// The platform error name decides, `NotAllowedError` and friends, the message is only
    /// looked at when the name doesn't say anything
    pub fn from_notification(name: Option<&str>, message: impl Into<String>) -> Self {
        let message = message.into();

        let kind = name
            .and_then(kind_from_name)
            .or_else(|| kind_from_message(&message))
            .unwrap_or(ReaderErrorKind::Other);

        Self::new(kind, message)
    }

    pub fn new(kind: ReaderErrorKind, message: impl Into<String>) -> Self {
        let message = message.into();

        match kind {
            ReaderErrorKind::NotAllowed => Self::NotAllowed { message },
            ReaderErrorKind::NotSupported => Self::NotSupported { message },
            ReaderErrorKind::NotReadable => Self::NotReadable { message },
            ReaderErrorKind::Other => Self::Other { message },
        }
    }

    pub fn kind(&self) -> ReaderErrorKind {
        match self {
            Self::NotAllowed { .. } => ReaderErrorKind::NotAllowed,
            Self::NotSupported { .. } => ReaderErrorKind::NotSupported,
            Self::NotReadable { .. } => ReaderErrorKind::NotReadable,
            Self::Other { .. } => ReaderErrorKind::Other,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::NotAllowed { message }
            | Self::NotSupported { message }
            | Self::NotReadable { message }
            | Self::Other { message } => message,
        }
    }
}

fn kind_from_name(name: &str) -> Option<ReaderErrorKind> {
    let name = name.trim();
    let name = name.strip_suffix("Error").unwrap_or(name);

    match name {
        "NotAllowed" | "Security" => Some(ReaderErrorKind::NotAllowed),
        "NotSupported" => Some(ReaderErrorKind::NotSupported),
        "NotReadable" | "Network" | "InvalidState" => Some(ReaderErrorKind::NotReadable),
        _ => None,
    }
}

fn kind_from_message(message: &str) -> Option<ReaderErrorKind> {
    let message = message.to_ascii_lowercase();

    if message.contains("permission") || message.contains("not allowed") {
        return Some(ReaderErrorKind::NotAllowed);
    }

    if message.contains("not supported") || message.contains("unsupported") {
        return Some(ReaderErrorKind::NotSupported);
    }

    if message.contains("not readable") || message.contains("unavailable") {
        return Some(ReaderErrorKind::NotReadable);
    }

    None
}
