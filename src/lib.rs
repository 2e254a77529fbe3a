//! Structured reports for NFC tag reads
//!
//! A [`ReadingEvent`] from the platform reader goes through [`report::build_report`] (or a
//! [`Scanner`], which also keeps the latest report) and comes out as a [`TagReport`]: scan
//! metadata, the tag's technical details and every NDEF record decoded

pub mod config;
pub mod event;
pub mod export;
pub mod ffi;
pub mod logging;
pub mod reader_error;
pub mod report;
pub mod scanner;
pub mod tag;

pub use config::ScannerConfig;
pub use event::{NdefMessage, ReadingEvent};
pub use reader_error::{ReaderError, ReaderErrorKind};
pub use report::{DecodedRecord, NdefMessageReport, ReportError, ScanInfo, TagReport};
pub use scanner::Scanner;
pub use tag::{SerialNumber, TagMeta, TagTechnicalInfo};

pub use ndef_decode::{ParsedContent, RawRecord};

uniffi::setup_scaffolding!();
