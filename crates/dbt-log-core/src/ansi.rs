//! Terminal escape sequence removal.

use once_cell::sync::Lazy;
use regex::bytes::Regex as BytesRegex;
use regex::Regex;

/// 7-bit `ESC` introducer or an 8-bit C1 control, then parameter bytes,
/// intermediate bytes and a final byte.
static ANSI_ESCAPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:\x1B[@-_]|[\x{80}-\x{9F}])[0-?]*[ -/]*[@-~]")
        .expect("ANSI escape pattern is valid")
});

/// Same sequences matched on raw bytes, where an 8-bit C1 control is a
/// single byte in `0x80..=0x9F` rather than a UTF-8 encoded code point.
static ANSI_ESCAPE_BYTES: Lazy<BytesRegex> = Lazy::new(|| {
    BytesRegex::new(r"(?-u:(?:\x1B[@-_]|[\x80-\x9F])[0-?]*[ -/]*[@-~])")
        .expect("byte ANSI escape pattern is valid")
});

/// Remove colour and cursor escape sequences from a line of console output.
pub fn strip_ansi(line: &str) -> String {
    ANSI_ESCAPE.replace_all(line, "").into_owned()
}

/// Remove escape sequences from a raw line that is not valid UTF-8.
///
/// Only use this on lines that failed UTF-8 decoding: on valid UTF-8 the
/// `0x80..=0x9F` range also covers continuation bytes.
pub fn strip_ansi_bytes(line: &[u8]) -> Vec<u8> {
    ANSI_ESCAPE_BYTES.replace_all(line, &b""[..]).into_owned()
}
