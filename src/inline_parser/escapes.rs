//! Backslash escapes.
//!
//! Any ASCII punctuation character may be escaped. A backslash at the end of
//! a line is a hard line break. Everything else leaves the backslash as a
//! literal character.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum EscapeType {
    /// `\*`, `\[`, ...
    Literal,
    /// Backslash followed by a line ending.
    HardLineBreak,
}

/// Try to parse a backslash escape at the start of `text`.
/// Returns the byte length and the escape type.
pub(crate) fn try_parse_escape(text: &str) -> Option<(usize, EscapeType)> {
    let rest = text.strip_prefix('\\')?;
    let next = rest.chars().next()?;

    match next {
        '\n' => Some((2, EscapeType::HardLineBreak)),
        '\r' if rest[1..].starts_with('\n') => Some((3, EscapeType::HardLineBreak)),
        c if c.is_ascii_punctuation() => Some((2, EscapeType::Literal)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escaped_punctuation() {
        assert_eq!(try_parse_escape(r"\*x"), Some((2, EscapeType::Literal)));
        assert_eq!(try_parse_escape(r"\\"), Some((2, EscapeType::Literal)));
        assert_eq!(try_parse_escape(r"\`"), Some((2, EscapeType::Literal)));
    }

    #[test]
    fn backslash_newline_is_a_hard_break() {
        assert_eq!(try_parse_escape("\\\nb"), Some((2, EscapeType::HardLineBreak)));
        assert_eq!(
            try_parse_escape("\\\r\nb"),
            Some((3, EscapeType::HardLineBreak))
        );
    }

    #[test]
    fn letters_and_trailing_backslash_are_literal() {
        assert_eq!(try_parse_escape(r"\a"), None);
        assert_eq!(try_parse_escape("\\"), None);
        assert_eq!(try_parse_escape("\\é"), None);
    }
}
