use crate::extract::normalize::normalize_section;

/// Decodes a plain-text upload. Invalid UTF-8 is replaced with U+FFFD rather
/// than rejected, and a leading byte-order mark is dropped.
pub fn extract_plain_text(bytes: &[u8]) -> String {
    let decoded = String::from_utf8_lossy(bytes);
    let decoded = decoded.strip_prefix('\u{FEFF}').unwrap_or(&decoded);
    normalize_section(decoded)
}
