//! Inline raw HTML: tags, comments, processing instructions, declarations
//! and CDATA sections. The matched source is kept verbatim as `RAW_HTML`.

use std::sync::LazyLock;

use regex::Regex;

static RAW_HTML_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r#"^(?:"#,
        // open tag
        r#"<[A-Za-z][A-Za-z0-9-]*(?:\s+[A-Za-z_:][A-Za-z0-9_.:-]*(?:\s*=\s*(?:[^\s"'=<>`]+|'[^']*'|"[^"]*"))?)*\s*/?>"#,
        // closing tag
        r#"|</[A-Za-z][A-Za-z0-9-]*\s*>"#,
        // comment
        r#"|<!-->|<!--->|(?s:<!--.*?-->)"#,
        // processing instruction
        r#"|(?s:<\?.*?\?>)"#,
        // declaration
        r#"|(?s:<![A-Za-z][^>]*>)"#,
        // CDATA
        r#"|(?s:<!\[CDATA\[.*?\]\]>)"#,
        r#")"#,
    ))
    .unwrap()
});

/// Try to parse raw HTML at the start of `text`, returning its byte length.
pub(crate) fn try_parse_raw_html(text: &str) -> Option<usize> {
    if !text.starts_with('<') {
        return None;
    }
    RAW_HTML_RE.find(text).map(|m| m.end())
}
