use std::sync::Arc;

use derive_more::{Deref, From};
use ndef_macros::impl_default_for;

use crate::{
    config::ScannerConfig,
    event::ReadingEvent,
    export::{self, ExportError},
    logging,
    report::{ReportError, TagReport},
    scanner::Scanner,
};

/// Scanner handle for the mobile apps, keeps the latest report between calls
#[derive(Debug, Clone, Deref, From, uniffi::Object)]
pub struct FfiTagScanner(Arc<Scanner>);

impl_default_for!(FfiTagScanner);

#[uniffi::export]
impl FfiTagScanner {
    #[uniffi::constructor]
    pub fn new() -> Self {
        let config = ScannerConfig::from_env();
        logging::init(&config.log_filter);

        Self(Arc::new(Scanner::new(config)))
    }

    #[uniffi::constructor]
    pub fn with_scanner_version(scanner_version: String) -> Self {
        let config = ScannerConfig::from_env()
            .with_scanner_version(scanner_version);
        logging::init(&config.log_filter);

        Self(Arc::new(Scanner::new(config)))
    }

    pub fn on_reading(&self, event: ReadingEvent) -> Result<TagReport, ReportError> {
        let report = self.0.on_reading(&event)?;
        Ok(TagReport::clone(&report))
    }

    /// Same as `on_reading`, for platforms that hand the event over as JSON
    pub fn on_reading_json(&self, json: String) -> Result<TagReport, ReportError> {
        let event = ReadingEvent::from_json(&json)?;
        self.on_reading(event)
    }

    /// User facing message for a reader error notification
    pub fn on_error(&self, name: Option<String>, message: String) -> String {
        self.0.on_error(name.as_deref(), &message).to_string()
    }

    pub fn current_report(&self) -> Option<TagReport> {
        self.0
            .current_report()
            .map(|report| TagReport::clone(&report))
    }

    pub fn clear(&self) {
        self.0.clear();
    }

    pub fn export_json(&self) -> Result<String, ExportError> {
        export::json::to_json(&*self.report()?)
    }

    pub fn export_csv(&self) -> Result<String, ExportError> {
        export::csv::to_csv(&*self.report()?)
    }

    pub fn export_text(&self) -> Result<String, ExportError> {
        Ok(export::text::to_text(&*self.report()?))
    }
}

impl FfiTagScanner {
    fn report(&self) -> Result<Arc<TagReport>, ExportError> {
        self.0.current_report().ok_or(ExportError::NoReport)
    }
}
