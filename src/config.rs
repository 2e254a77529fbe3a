use ndef_macros::impl_default_for;

/// Stamped into every report's scan info unless overridden
pub const DEFAULT_SCANNER_VERSION: &str = concat!("NDEF Scanner v", env!("CARGO_PKG_VERSION"));

pub const DEFAULT_LOG_FILTER: &str = "info";

/// Overrides [`ScannerConfig::scanner_version`]
pub const SCANNER_VERSION_ENV: &str = "NDEF_SCANNER_VERSION";

/// Overrides [`ScannerConfig::log_filter`]
pub const LOG_FILTER_ENV: &str = "RUST_LOG";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannerConfig {
    pub scanner_version: String,
    pub log_filter: String,
}

impl_default_for!(ScannerConfig);
impl ScannerConfig {
    pub fn new() -> Self {
        Self {
            scanner_version: DEFAULT_SCANNER_VERSION.to_string(),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }

    /// Defaults, overridden by any non empty environment variable
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn with_scanner_version(mut self, scanner_version: impl Into<String>) -> Self {
        self.scanner_version = scanner_version.into();
        self
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let defaults = Self::new();

        Self {
            scanner_version: non_empty(SCANNER_VERSION_ENV).unwrap_or(defaults.scanner_version),
            log_filter: non_empty(LOG_FILTER_ENV).unwrap_or(defaults.log_filter),
        }
    }
}
