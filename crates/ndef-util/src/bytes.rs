//! Raw byte renderings, used wherever a payload can't be decoded into something structured

use itertools::Itertools as _;

/// Placeholder rendered for a missing or zero length payload
pub const EMPTY: &str = "Empty";

/// Lowercase two digit hex groups separated by a single space, `[0x0a, 0xff]` -> `"0a ff"`
pub fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|byte| format!("{byte:02x}")).join(" ")
}

/// Printable ASCII (0x20..=0x7E) verbatim, everything else as `.`
///
/// The output always has exactly one char per input byte
pub fn to_ascii(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|&byte| {
            if (0x20..=0x7E).contains(&byte) {
                byte as char
            } else {
                '.'
            }
        })
        .collect()
}

/// Both renderings on two lines, or [`EMPTY`] when there is nothing to show
pub fn format_raw(bytes: &[u8]) -> String {
    if bytes.is_empty() {
        return EMPTY.to_string();
    }

    format!("Hex: {}\nASCII: {}", to_hex(bytes), to_ascii(bytes))
}

/// Parse hex text back into bytes
///
/// Accepts an optional `0x` prefix and ignores whitespace, `:` and `-` separators,
/// so the output of [`to_hex`] and colon separated serial numbers both parse
pub fn hex_to_bytes(hex: &str) -> Result<Vec<u8>, hex::FromHexError> {
    let hex = hex.trim();
    let hex = hex
        .strip_prefix("0x")
        .or_else(|| hex.strip_prefix("0X"))
        .unwrap_or(hex);

    let digits: String = hex
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ':' && *c != '-')
        .collect();

    hex::decode(digits)
}
