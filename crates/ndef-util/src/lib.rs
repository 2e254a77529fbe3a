pub mod bytes;
pub mod result_ext;

pub use bytes::{format_raw, hex_to_bytes, to_ascii, to_hex};

uniffi::setup_scaffolding!();

mod ffi {
    #[uniffi::export]
    fn bytes_to_hex(bytes: Vec<u8>) -> String {
        super::to_hex(&bytes)
    }

    #[uniffi::export]
    fn bytes_to_ascii(bytes: Vec<u8>) -> String {
        super::to_ascii(&bytes)
    }

    #[uniffi::export]
    fn bytes_format_raw(bytes: Vec<u8>) -> String {
        super::format_raw(&bytes)
    }

    #[uniffi::export]
    fn hex_string_to_bytes(hex: &str) -> Option<Vec<u8>> {
        super::hex_to_bytes(hex).ok()
    }
}
