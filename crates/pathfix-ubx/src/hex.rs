//! Line-oriented hex front end.

use crate::error::DecodeError;

/// Parses a line of whitespace-separated hex bytes, e.g. `"b5 62 0x01 02"`.
///
/// Each token is one or two hex digits with an optional `0x`/`0X` prefix.
/// An empty or blank line yields an empty buffer.
pub fn parse_hex_line(line: &str) -> Result<Vec<u8>, DecodeError> {
    line.split_whitespace().map(parse_token).collect()
}

fn parse_token(token: &str) -> Result<u8, DecodeError> {
    let digits = token
        .strip_prefix("0x")
        .or_else(|| token.strip_prefix("0X"))
        .unwrap_or(token);

    let well_formed = (1..=2).contains(&digits.len()) && digits.bytes().all(|b| b.is_ascii_hexdigit());
    if !well_formed {
        return Err(DecodeError::InvalidHex(token.to_string()));
    }
    u8::from_str_radix(digits, 16).map_err(|_| DecodeError::InvalidHex(token.to_string()))
}

/// Formats bytes as lowercase, space-separated hex pairs.
pub fn format_hex_line(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect::<Vec<_>>()
        .join(" ")
}
