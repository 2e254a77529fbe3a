//! Event handling for the platform reader, keeps the latest report

use std::sync::Arc;

use arc_swap::ArcSwapOption;
use tracing::{debug, info, warn};

use crate::{
    config::ScannerConfig,
    event::ReadingEvent,
    reader_error::ReaderError,
    report::{self, ReportError, TagReport},
};

/// Builds a report for every reading and holds on to the most recent one
///
/// The slot is replaced in one store, readers never see a half built report, last write wins
#[derive(Debug)]
pub struct Scanner {
    config: ScannerConfig,
    current: ArcSwapOption<TagReport>,
}

impl Scanner {
    pub fn new(config: ScannerConfig) -> Self {
        Self {
            config,
            current: ArcSwapOption::empty(),
        }
    }

    pub fn config(&self) -> &ScannerConfig {
        &self.config
    }

    /// Build and store the report for a reading
    ///
    /// On error the previous report stays current
    pub fn on_reading(&self, event: &ReadingEvent) -> Result<Arc<TagReport>, ReportError> {
        let report = match report::build_report(event, &self.config.scanner_version) {
            Ok(report) => Arc::new(report),
            Err(error) => {
                warn!("unable to build report: {error}");
                return Err(error);
            }
        };

        info!(
            "tag read, {} records, {}",
            report.ndef_message.record_count, report.tag_technical.tag_type_label
        );

        self.current.store(Some(report.clone()));
        Ok(report)
    }

    /// Classify an error notification from the reader, the current report is left alone
    pub fn on_error(&self, name: Option<&str>, message: &str) -> ReaderError {
        let error = ReaderError::from_notification(name, message);
        warn!("reader error ({}): {message}", error.kind());

        error
    }

    pub fn current_report(&self) -> Option<Arc<TagReport>> {
        self.current.load_full()
    }

    pub fn clear(&self) {
        debug!("clearing current report");
        self.current.store(None);
    }
}

impl Default for Scanner {
    fn default() -> Self {
        Self::new(ScannerConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use ndef_decode::RawRecord;

    use super::*;
    use crate::reader_error::ReaderErrorKind;

    fn text_event(text: &str) -> ReadingEvent {
        let mut payload = b"\x02en".to_vec();
        payload.extend_from_slice(text.as_bytes());

        ReadingEvent::from_records(vec![RawRecord::new("text", payload)])
    }

    fn content(report: &TagReport) -> Option<&str> {
        report.records()[0].content()
    }

    #[test]
    fn starts_empty() {
        assert!(Scanner::default().current_report().is_none());
    }

    #[test]
    fn last_reading_wins() {
        let scanner = Scanner::default();

        scanner.on_reading(&text_event("first")).unwrap();
        let second = scanner.on_reading(&text_event("second")).unwrap();

        let current = scanner.current_report().unwrap();
        assert_eq!(content(&current), Some("second"));
        assert!(Arc::ptr_eq(&current, &second));
    }

    #[test]
    fn failed_reading_keeps_previous_report() {
        let scanner = Scanner::default();
        scanner.on_reading(&text_event("kept")).unwrap();

        let result = scanner.on_reading(&ReadingEvent::default());
        assert_eq!(result.unwrap_err(), ReportError::NoMessage);

        let current = scanner.current_report().unwrap();
        assert_eq!(content(&current), Some("kept"));
    }

    #[test]
    fn clear_resets_the_slot() {
        let scanner = Scanner::default();
        scanner.on_reading(&text_event("gone")).unwrap();
        scanner.clear();

        assert!(scanner.current_report().is_none());
    }

    #[test]
    fn scanner_version_comes_from_config() {
        let config = ScannerConfig::new()
            .with_scanner_version("Bench Reader 1.0");
        let scanner = Scanner::new(config);

        let report = scanner.on_reading(&text_event("hi")).unwrap();
        assert_eq!(report.scan_info.scanner_version, "Bench Reader 1.0");
    }

    #[test]
    fn errors_leave_report_in_place() {
        let scanner = Scanner::default();
        scanner.on_reading(&text_event("still here")).unwrap();

        let error = scanner.on_error(Some("NotAllowedError"), "permission denied");
        assert_eq!(error.kind(), ReaderErrorKind::NotAllowed);
        assert!(scanner.current_report().is_some());
    }
}
