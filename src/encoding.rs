//! Character encoding detection for upstream response bodies.
//!
//! The upstream hands back the results page as raw bytes. The charset is taken
//! from a byte-order mark, then the `Content-Type` response header, then the
//! document's own `<meta>` declarations, defaulting to UTF-8.

use encoding_rs::{Encoding, UTF_8};
use regex::Regex;
use std::sync::LazyLock;

/// Only this many leading bytes are searched for `<meta>` declarations.
const META_SCAN_LIMIT: usize = 2048;

/// Match `<meta charset="...">` tag
#[allow(clippy::expect_used)]
static CHARSET_META_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]+charset\s*=\s*["']?([^"'\s>;]+)"#).expect("valid regex")
});

/// Match `charset=...` inside a Content-Type value
#[allow(clippy::expect_used)]
static HEADER_CHARSET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i);\s*charset\s*=\s*["']?([^"'\s;]+)"#).expect("valid regex")
});

/// Read the charset label out of a `Content-Type` header value.
#[must_use]
pub fn charset_from_content_type(content_type: &str) -> Option<&'static Encoding> {
    HEADER_CHARSET_RE
        .captures(content_type)
        .and_then(|c| c.get(1))
        .and_then(|m| Encoding::for_label(m.as_str().as_bytes()))
}

/// Read the charset label out of the document head.
///
/// Covers both `<meta charset>` and the `http-equiv` Content-Type form, since
/// the latter also carries a `charset=` token inside the tag.
fn charset_from_meta(body: &[u8]) -> Option<&'static Encoding> {
    let head = String::from_utf8_lossy(&body[..body.len().min(META_SCAN_LIMIT)]);
    CHARSET_META_RE
        .captures(&head)
        .and_then(|c| c.get(1))
        .and_then(|m| Encoding::for_label(m.as_str().as_bytes()))
}

/// Pick the encoding for an upstream body.
#[must_use]
pub fn detect_encoding(body: &[u8], content_type: Option<&str>) -> &'static Encoding {
    if let Some((encoding, _)) = Encoding::for_bom(body) {
        return encoding;
    }
    content_type
        .and_then(charset_from_content_type)
        .or_else(|| charset_from_meta(body))
        .unwrap_or(UTF_8)
}

/// Decode an upstream body to a UTF-8 string.
///
/// Invalid sequences become U+FFFD rather than errors; a garbled character
/// in a snippet is better than losing the whole page.
///
/// # Examples
///
/// ```
/// use serp_proxy::encoding::decode_body;
///
/// let body = b"<html><body>Caf\xE9</body></html>";
/// let text = decode_body(body, Some("text/html; charset=ISO-8859-1"));
/// assert!(text.contains("Café"));
/// ```
#[must_use]
pub fn decode_body(body: &[u8], content_type: Option<&str>) -> String {
    let encoding = detect_encoding(body, content_type);
    let (decoded, _used, had_errors) = encoding.decode(body);
    if had_errors {
        tracing::debug!(encoding = encoding.name(), "upstream body had undecodable bytes");
    }
    decoded.into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_charset_wins_over_meta() {
        let body = br#"<html><head><meta charset="utf-8"></head><body>x</body></html>"#;
        let encoding = detect_encoding(body, Some("text/html; charset=windows-1252"));
        assert_eq!(encoding.name(), "windows-1252");
    }

    #[test]
    fn meta_charset_used_without_header_charset() {
        let body = br#"<html><head><meta charset="ISO-8859-1"></head><body>x</body></html>"#;
        // encoding_rs maps ISO-8859-1 to windows-1252 per WHATWG
        assert_eq!(detect_encoding(body, Some("text/html")).name(), "windows-1252");
        assert_eq!(detect_encoding(body, None).name(), "windows-1252");
    }

    #[test]
    fn http_equiv_meta_is_recognised() {
        let body = br#"<meta http-equiv="Content-Type" content="text/html; charset=ISO-8859-1">"#;
        assert_eq!(detect_encoding(body, None).name(), "windows-1252");
    }

    #[test]
    fn bom_wins_over_everything() {
        let body = b"\xEF\xBB\xBF<html><body>x</body></html>";
        assert_eq!(detect_encoding(body, Some("text/html; charset=windows-1252")), UTF_8);
    }

    #[test]
    fn default_to_utf8() {
        assert_eq!(detect_encoding(b"<html></html>", None), UTF_8);
        assert_eq!(detect_encoding(b"<html></html>", Some("text/html; charset=bogus")), UTF_8);
    }

    #[test]
    fn charset_from_content_type_variants() {
        assert_eq!(
            charset_from_content_type("text/html; charset=\"UTF-8\""),
            Some(UTF_8)
        );
        assert_eq!(charset_from_content_type("text/html"), None);
    }

    #[test]
    fn decode_windows1252_smart_quotes() {
        let body = b"<html><head><meta charset=\"windows-1252\"></head><body>\x93Rust\x94</body></html>";
        assert!(decode_body(body, None).contains("\u{201C}Rust\u{201D}"));
    }

    #[test]
    fn decode_invalid_utf8_gracefully() {
        let body = b"<html><body>Test \xFF\xFE Invalid</body></html>";
        let text = decode_body(body, None);
        assert!(text.contains("Test"));
        assert!(text.contains("Invalid"));
        assert!(text.contains('\u{FFFD}'));
    }
}
