use std::fmt::Display;

pub trait ResultExt<T, InitialError> {
    /// Map an error into a variant that only carries its message
    ///
    /// Handy when a foreign error type can't cross the FFI boundary but its message should
    ///
    /// # Example
    /// ```rust
    /// use ndef_util::result_ext::ResultExt;
    ///
    /// #[derive(Debug, thiserror::Error)]
    /// enum ExportError {
    ///     #[error("not hex: {0}")]
    ///     NotHex(String),
    /// }
    ///
    /// fn serial(input: &str) -> Result<Vec<u8>, ExportError> {
    ///     ndef_util::hex_to_bytes(input).map_err_str(ExportError::NotHex)
    /// }
    ///
    /// assert!(serial("04:a2").is_ok());
    /// assert!(matches!(serial("nope"), Err(ExportError::NotHex(_))));
    /// ```
    fn map_err_str<FinalError, F>(self, f: F) -> Result<T, FinalError>
    where
        InitialError: Display,
        F: FnOnce(String) -> FinalError;
}

impl<Type, InitialError> ResultExt<Type, InitialError> for Result<Type, InitialError> {
    fn map_err_str<FinalError, F>(self, f: F) -> Result<Type, FinalError>
    where
        InitialError: Display,
        F: FnOnce(String) -> FinalError,
    {
        self.map_err(|e| f(e.to_string()))
    }
}
