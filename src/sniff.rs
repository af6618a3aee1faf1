//! Content-type detection from leading body bytes.
//!
//! Implements the subset of the WHATWG MIME sniffing algorithm that a
//! response cache actually encounters: markup tags, byte-order marks, a
//! handful of binary magic numbers, and the text/binary fallback. Only the
//! first [`SNIFF_LEN`] bytes are considered.
//!
//! Used by [`CaptureSink`](crate::sink::CaptureSink) to fill in a
//! `Content-Type` when the downstream handler never set one.

/// Maximum number of leading bytes considered when sniffing.
pub const SNIFF_LEN: usize = 512;

/// Markup signatures matched case-insensitively after leading whitespace.
/// Each must be followed by a tag-terminating byte (space or `>`).
const HTML_SIGS: &[&str] = &[
    "<!DOCTYPE HTML",
    "<HTML",
    "<HEAD",
    "<SCRIPT",
    "<IFRAME",
    "<H1",
    "<DIV",
    "<FONT",
    "<TABLE",
    "<A",
    "<STYLE",
    "<TITLE",
    "<B",
    "<BODY",
    "<BR",
    "<P",
    "<!--",
];

/// Exact-prefix binary signatures.
const MAGIC_SIGS: &[(&[u8], &str)] = &[
    (b"%PDF-", "application/pdf"),
    (b"GIF87a", "image/gif"),
    (b"GIF89a", "image/gif"),
    (b"\x89PNG\r\n\x1a\n", "image/png"),
    (b"\xff\xd8\xff", "image/jpeg"),
    (b"PK\x03\x04", "application/zip"),
    (b"\x1f\x8b\x08", "application/x-gzip"),
    (b"%!PS-Adobe-", "application/postscript"),
];

/// Detect the content type of `body` from its leading bytes.
///
/// Always returns a valid MIME type: falls back to
/// `text/plain; charset=utf-8` for textual data and
/// `application/octet-stream` when a binary control byte is present.
pub fn detect_content_type(body: &[u8]) -> &'static str {
    let data = &body[..body.len().min(SNIFF_LEN)];

    // BOMs identify text encodings outright.
    if data.starts_with(&[0xEF, 0xBB, 0xBF]) {
        return "text/plain; charset=utf-8";
    }
    if data.starts_with(&[0xFE, 0xFF]) {
        return "text/plain; charset=utf-16be";
    }
    if data.starts_with(&[0xFF, 0xFE]) {
        return "text/plain; charset=utf-16le";
    }

    for (magic, mime) in MAGIC_SIGS {
        if data.starts_with(magic) {
            return mime;
        }
    }

    // Markup sniffing ignores leading whitespace.
    let trimmed = skip_whitespace(data);
    if trimmed.starts_with(b"<?xml") {
        return "text/xml; charset=utf-8";
    }
    for sig in HTML_SIGS {
        if matches_tag(trimmed, sig.as_bytes()) {
            return "text/html; charset=utf-8";
        }
    }

    if data.iter().any(|&b| is_binary_byte(b)) {
        return "application/octet-stream";
    }
    "text/plain; charset=utf-8"
}

fn skip_whitespace(data: &[u8]) -> &[u8] {
    let start = data
        .iter()
        .position(|b| !matches!(b, b'\t' | b'\n' | b'\x0c' | b'\r' | b' '))
        .unwrap_or(data.len());
    &data[start..]
}

/// Case-insensitive tag match. Signatures other than comments must be
/// terminated by a space or `>` so that `<b>` matches but `<base>` does
/// not match the `<b` signature alone.
fn matches_tag(data: &[u8], sig: &[u8]) -> bool {
    if data.len() < sig.len() {
        return false;
    }
    if !data[..sig.len()].eq_ignore_ascii_case(sig) {
        return false;
    }
    if sig == b"<!--" {
        return true;
    }
    matches!(data.get(sig.len()), Some(&b' ') | Some(&b'>'))
}

/// Control bytes that never appear in plain text per the WHATWG
/// algorithm (tab, newline, form feed, carriage return, and escape are
/// exempt).
fn is_binary_byte(b: u8) -> bool {
    matches!(b, 0x00..=0x08 | 0x0B | 0x0E..=0x1A | 0x1C..=0x1F)
}
