//! Inline links, images and autolinks.
//!
//! - Automatic links: `<http://example.com>` and `<user@example.com>`
//! - Inline links: `[text](url)` and `[text](url "title")`
//! - Inline images: `![alt](url)` and `![alt](url "title")`
//!
//! Reference-style links are not recognized; their brackets stay text.

use std::sync::LazyLock;

use regex::Regex;

use super::code_spans::try_parse_code_span;

static URI_AUTOLINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^<[A-Za-z][A-Za-z0-9+.-]{1,31}:[^\x00-\x20<>]*>").unwrap());

static EMAIL_AUTOLINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^<[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?",
        r"(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)*>",
    ))
    .unwrap()
});

/// Try to parse an autolink at the start of `text`. Returns its byte length,
/// angle brackets included.
pub(crate) fn try_parse_autolink(text: &str) -> Option<usize> {
    URI_AUTOLINK_RE
        .find(text)
        .or_else(|| EMAIL_AUTOLINK_RE.find(text))
        .map(|m| m.end())
}

/// Byte ranges of an inline link or image, absolute into the parsed text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct LinkParts {
    /// Position of `[` or `![`.
    pub(crate) start: usize,
    pub(crate) text_start: usize,
    /// Position of the closing `]`, immediately followed by `(`.
    pub(crate) text_end: usize,
    pub(crate) destination: Option<(usize, usize)>,
    pub(crate) title: Option<(usize, usize)>,
    /// Position after the closing `)`.
    pub(crate) end: usize,
}

/// Try to parse `[text](dest "title")` (or the image form) starting at
/// `text[start]`, without reading past `end`.
pub(crate) fn try_parse_inline_link(
    text: &str,
    start: usize,
    end: usize,
    is_image: bool,
) -> Option<LinkParts> {
    let text_start = start + if is_image { 2 } else { 1 };
    let text_end = find_label_end(text, text_start, end)?;
    let bytes = text.as_bytes();
    if bytes.get(text_end + 1) != Some(&b'(') || text_end + 1 >= end {
        return None;
    }

    let mut pos = skip_space(text, text_end + 2, end);
    let mut destination = None;
    if let Some(dest_end) = scan_destination(text, pos, end) {
        destination = Some((pos, dest_end));
        pos = dest_end;
    }

    let mut title = None;
    let after_dest = skip_space(text, pos, end);
    if after_dest > pos || destination.is_none() {
        if let Some(title_end) = scan_title(text, after_dest, end) {
            title = Some((after_dest, title_end));
            pos = skip_space(text, title_end, end);
        } else {
            pos = after_dest;
        }
    }

    if bytes.get(pos) != Some(&b')') || pos >= end {
        return None;
    }

    Some(LinkParts {
        start,
        text_start,
        text_end,
        destination,
        title,
        end: pos + 1,
    })
}

/// Find the `]` closing a link label. Brackets nest; backslash escapes and
/// code spans hide brackets.
fn find_label_end(text: &str, start: usize, end: usize) -> Option<usize> {
    let bytes = text.as_bytes();
    let mut depth = 0usize;
    let mut pos = start;

    while pos < end {
        match bytes[pos] {
            b'\\' if pos + 1 < end && bytes[pos + 1].is_ascii_punctuation() => pos += 2,
            b'`' => {
                pos = match try_parse_code_span(text, pos, end) {
                    Some(span) => span.end(),
                    None => pos + bytes[pos..end].iter().take_while(|&&b| b == b'`').count(),
                };
            }
            b'[' => {
                depth += 1;
                pos += 1;
            }
            b']' if depth == 0 => return Some(pos),
            b']' => {
                depth -= 1;
                pos += 1;
            }
            _ => pos += 1,
        }
    }
    None
}

/// Skip spaces, tabs and up to one line ending.
fn skip_space(text: &str, start: usize, end: usize) -> usize {
    let bytes = text.as_bytes();
    let mut pos = start;
    let mut newline_seen = false;
    while pos < end {
        match bytes[pos] {
            b' ' | b'\t' => pos += 1,
            b'\r' if bytes.get(pos + 1) == Some(&b'\n') && !newline_seen => {
                newline_seen = true;
                pos += 2;
            }
            b'\n' if !newline_seen => {
                newline_seen = true;
                pos += 1;
            }
            _ => break,
        }
    }
    pos
}

/// Scan a link destination, returning its end. Either `<...>` without line
/// endings or unescaped angle brackets, or a non-empty run without spaces or
/// control characters whose parentheses balance.
fn scan_destination(text: &str, start: usize, end: usize) -> Option<usize> {
    let bytes = text.as_bytes();
    if start >= end {
        return None;
    }

    if bytes[start] == b'<' {
        let mut pos = start + 1;
        while pos < end {
            match bytes[pos] {
                b'\\' if pos + 1 < end && bytes[pos + 1].is_ascii_punctuation() => pos += 2,
                b'>' => return Some(pos + 1),
                b'<' | b'\n' | b'\r' => return None,
                _ => pos += 1,
            }
        }
        return None;
    }

    let mut depth = 0usize;
    let mut pos = start;
    while pos < end {
        match bytes[pos] {
            b'\\' if pos + 1 < end && bytes[pos + 1].is_ascii_punctuation() => pos += 2,
            b'(' => {
                depth += 1;
                pos += 1;
            }
            b')' if depth == 0 => break,
            b')' => {
                depth -= 1;
                pos += 1;
            }
            b if b <= b' ' || b == 0x7f => break,
            _ => pos += 1,
        }
    }

    (pos > start && depth == 0).then_some(pos)
}

/// Scan a link title in `"`, `'` or `(` delimiters, returning its end.
/// Titles may span lines but not blank lines.
fn scan_title(text: &str, start: usize, end: usize) -> Option<usize> {
    let bytes = text.as_bytes();
    let close = match bytes.get(start)? {
        b'"' => b'"',
        b'\'' => b'\'',
        b'(' => b')',
        _ => return None,
    };

    let mut pos = start + 1;
    while pos < end {
        match bytes[pos] {
            b'\\' if pos + 1 < end && bytes[pos + 1].is_ascii_punctuation() => pos += 2,
            b if b == close => return Some(pos + 1),
            b'(' if close == b')' => return None,
            b'\n' if is_blank_line_after(&bytes[pos + 1..end]) => return None,
            _ => pos += 1,
        }
    }
    None
}

fn is_blank_line_after(bytes: &[u8]) -> bool {
    let rest = bytes
        .iter()
        .position(|&b| b != b' ' && b != b'\t')
        .map_or(&[][..], |idx| &bytes[idx..]);
    matches!(rest, [] | [b'\n', ..] | [b'\r', b'\n', ..])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link(text: &str) -> Option<LinkParts> {
        let is_image = text.starts_with("![");
        try_parse_inline_link(text, 0, text.len(), is_image)
    }

    fn slice(text: &str, range: Option<(usize, usize)>) -> Option<&str> {
        range.map(|(start, end)| &text[start..end])
    }

    #[test]
    fn autolinks() {
        assert_eq!(try_parse_autolink("<https://example.com> x"), Some(21));
        assert_eq!(try_parse_autolink("<me@example.com>"), Some(16));
        assert_eq!(try_parse_autolink("<not a link>"), None);
        assert_eq!(try_parse_autolink("<a:b>"), None);
    }

    #[test]
    fn link_with_title() {
        let text = r#"[x](http://a "t")"#;
        let parts = link(text).unwrap();
        assert_eq!(&text[parts.text_start..parts.text_end], "x");
        assert_eq!(slice(text, parts.destination), Some("http://a"));
        assert_eq!(slice(text, parts.title), Some("\"t\""));
        assert_eq!(parts.end, text.len());
    }

    #[test]
    fn image_and_empty_destination() {
        let text = "![alt](pic.png)";
        assert_eq!(slice(text, link(text).unwrap().destination), Some("pic.png"));

        let parts = link("[a]()").unwrap();
        assert_eq!(parts.destination, None);
        assert_eq!(parts.end, 5);
    }

    #[test]
    fn destinations() {
        let text = "[a](<my url>)";
        assert_eq!(slice(text, link(text).unwrap().destination), Some("<my url>"));

        let text = "[a](foo(bar))";
        assert_eq!(slice(text, link(text).unwrap().destination), Some("foo(bar)"));

        assert!(link("[a](foo bar)").is_none());
        assert!(link("[a](foo(bar)").is_none());
    }

    #[test]
    fn nested_brackets_and_code_in_label() {
        let text = "[a [b] `]`](u)";
        let parts = link(text).unwrap();
        assert_eq!(&text[parts.text_start..parts.text_end], "a [b] `]`");
    }

    #[test]
    fn not_inline_links() {
        assert!(link("[a] (u)").is_none());
        assert!(link("[a][ref]").is_none());
        assert!(link("[a").is_none());
    }
}
