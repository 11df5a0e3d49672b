//! MIME encoding and decoding utilities.
//!
//! Supports Base64, Quoted-Printable, and RFC 2047 header encoding.

use crate::error::{Error, Result};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use std::fmt::Write as _;

/// Maximum line length for encoded body lines (RFC 2045).
const MAX_LINE_LENGTH: usize = 76;

/// Maximum length of an RFC 2047 encoded word, delimiters included (section 2).
const MAX_ENCODED_WORD: usize = 75;

/// Characters an encoded word spends outside its payload: `=?`, `?B?` and `?=`.
const ENCODED_WORD_OVERHEAD: usize = 7;

/// Raw bytes that fit in one B-encoded word for `charset`, or `None` when
/// the charset name leaves no room for a 4-byte UTF-8 sequence.
const fn encoded_word_budget(charset: &str) -> Option<usize> {
    let Some(available) = MAX_ENCODED_WORD.checked_sub(ENCODED_WORD_OVERHEAD + charset.len())
    else {
        return None;
    };
    let bytes = available / 4 * 3;
    if bytes < 4 { None } else { Some(bytes) }
}

/// Encodes data as Base64.
#[must_use]
pub fn encode_base64(data: &[u8]) -> String {
    STANDARD.encode(data)
}

/// Decodes Base64 data.
///
/// # Errors
///
/// Returns an error if the input is not valid Base64.
pub fn decode_base64(data: &str) -> Result<Vec<u8>> {
    STANDARD.decode(data).map_err(Into::into)
}

/// Splits Base64 text into CRLF-terminated lines of at most 76 characters.
#[must_use]
pub fn fold_base64(encoded: &str) -> String {
    let mut out = String::with_capacity(encoded.len() + encoded.len() / MAX_LINE_LENGTH * 2 + 2);
    let bytes = encoded.as_bytes();
    for chunk in bytes.chunks(MAX_LINE_LENGTH) {
        // Base64 output is ASCII, so every chunk is valid UTF-8.
        out.push_str(&String::from_utf8_lossy(chunk));
        out.push_str("\r\n");
    }
    out
}

/// Encodes text using Quoted-Printable encoding (RFC 2045).
///
/// Line breaks in the input (`\n` or `\r\n`) are kept as hard CRLF breaks;
/// everything else that is not printable ASCII is escaped.
#[must_use]
pub fn encode_quoted_printable(text: &str) -> String {
    let mut result = String::new();

    for (index, line) in text.split('\n').enumerate() {
        if index > 0 {
            result.push_str("\r\n");
        }
        let line = line.strip_suffix('\r').unwrap_or(line);
        encode_quoted_printable_line(line.as_bytes(), &mut result);
    }

    result
}

fn encode_quoted_printable_line(bytes: &[u8], result: &mut String) {
    let mut line_length = 0;

    for (i, byte) in bytes.iter().enumerate() {
        // Check if we need soft line break
        if line_length >= MAX_LINE_LENGTH - 3 {
            result.push_str("=\r\n");
            line_length = 0;
        }

        let at_end = i + 1 == bytes.len();
        match byte {
            // Printable ASCII except '='
            b'!'..=b'<' | b'>'..=b'~' => {
                result.push(char::from(*byte));
                line_length += 1;
            }
            // Trailing whitespace would be stripped in transit
            b' ' | b'\t' if !at_end => {
                result.push(char::from(*byte));
                line_length += 1;
            }
            // Everything else gets encoded
            _ => {
                let _ = write!(result, "={byte:02X}");
                line_length += 3;
            }
        }
    }
}

/// Decodes Quoted-Printable text (RFC 2045).
///
/// # Errors
///
/// Returns an error if the input contains invalid escape sequences.
pub fn decode_quoted_printable(text: &str) -> Result<String> {
    let mut result = Vec::with_capacity(text.len());
    let bytes = text.as_bytes();
    let mut i = 0;

    while i < bytes.len() {
        let byte = bytes[i];
        if byte != b'=' {
            result.push(byte);
            i += 1;
            continue;
        }

        // Soft line break
        match bytes.get(i + 1..) {
            Some([b'\r', b'\n', ..]) => {
                i += 3;
                continue;
            }
            Some([b'\n', ..]) => {
                i += 2;
                continue;
            }
            _ => {}
        }

        // Hex encoded byte
        let hex = bytes
            .get(i + 1..i + 3)
            .ok_or_else(|| Error::InvalidEncoding("Incomplete escape sequence".to_string()))?;
        let hex = std::str::from_utf8(hex)
            .map_err(|e| Error::InvalidEncoding(format!("Invalid hex: {e}")))?;
        let decoded = u8::from_str_radix(hex, 16)
            .map_err(|e| Error::InvalidEncoding(format!("Invalid hex: {e}")))?;
        result.push(decoded);
        i += 3;
    }

    String::from_utf8(result).map_err(Into::into)
}

/// Returns true if the text can appear in a header without encoding.
fn is_header_safe(text: &str) -> bool {
    text.chars().all(|c| c == ' ' || c == '\t' || c.is_ascii_graphic()) && !text.contains("=?")
}

/// Encodes a header value using RFC 2047 encoding.
///
/// Format: `=?charset?B?encoded-text?=`
///
/// Printable ASCII passes through unchanged. Anything else is split into
/// as many encoded words as needed, separated by a single space, each one
/// within the RFC 2047 length limit.
///
/// # Arguments
///
/// * `text` - Text to encode
/// * `charset` - Character set (e.g., "utf-8")
///
/// # Errors
///
/// Returns [`Error::InvalidHeader`] if the text contains a line break and
/// [`Error::InvalidEncoding`] if the charset is empty or too long to leave
/// room for any payload.
pub fn encode_rfc2047(text: &str, charset: &str) -> Result<String> {
    if text.contains(['\r', '\n']) {
        return Err(Error::InvalidHeader(
            "Header text cannot contain line breaks".to_string(),
        ));
    }

    if charset.trim().is_empty() {
        return Err(Error::InvalidEncoding("Missing charset".to_string()));
    }

    // Only encode if necessary
    if is_header_safe(text) {
        return Ok(text.to_string());
    }

    let Some(budget) = encoded_word_budget(charset) else {
        return Err(Error::InvalidEncoding(format!(
            "Charset name too long for an encoded word: {charset}"
        )));
    };

    let mut words = Vec::new();
    let mut start = 0;
    let mut end = 0;
    for (index, ch) in text.char_indices() {
        let next = index + ch.len_utf8();
        if next - start > budget && end > start {
            words.push(&text[start..end]);
            start = end;
        }
        end = next;
    }
    if end > start {
        words.push(&text[start..end]);
    }

    let encoded = words
        .into_iter()
        .map(|word| format!("=?{charset}?B?{}?=", encode_base64(word.as_bytes())))
        .collect::<Vec<_>>()
        .join(" ");

    Ok(encoded)
}

/// Decodes a single RFC 2047 encoded word.
fn decode_encoded_word(word: &str) -> Result<String> {
    let inner = &word[2..word.len() - 2];
    let parts: Vec<&str> = inner.split('?').collect();

    if parts.len() != 3 {
        return Err(Error::InvalidEncoding(
            "Invalid RFC 2047 format".to_string(),
        ));
    }

    let encoding = parts[1].to_uppercase();
    let encoded_text = parts[2];

    match encoding.as_str() {
        "B" => {
            let decoded = decode_base64(encoded_text)?;
            String::from_utf8(decoded).map_err(Into::into)
        }
        "Q" => {
            // Quoted-Printable (with underscore for space)
            let text_with_spaces = encoded_text.replace('_', " ");
            decode_quoted_printable(&text_with_spaces)
        }
        _ => Err(Error::InvalidEncoding(format!(
            "Unknown encoding: {encoding}"
        ))),
    }
}

fn is_encoded_word(token: &str) -> bool {
    token.len() > 4 && token.starts_with("=?") && token.ends_with("?=")
}

/// Decodes an RFC 2047 encoded header value.
///
/// Whitespace between adjacent encoded words is dropped, as RFC 2047
/// section 6.2 requires; plain tokens are kept verbatim.
///
/// # Errors
///
/// Returns an error if an encoded word is malformed.
pub fn decode_rfc2047(text: &str) -> Result<String> {
    if !text.contains("=?") {
        return Ok(text.to_string());
    }

    let mut result = String::with_capacity(text.len());
    let mut previous_encoded = false;

    for (index, token) in text.split(' ').enumerate() {
        let encoded = is_encoded_word(token);
        if index > 0 && !(encoded && previous_encoded) {
            result.push(' ');
        }
        if encoded {
            result.push_str(&decode_encoded_word(token)?);
        } else {
            result.push_str(token);
        }
        previous_encoded = encoded;
    }

    Ok(result)
}
