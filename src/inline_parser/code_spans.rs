//! Code spans: text between backtick runs of equal length.

use crate::syntax::SyntaxKind;

use super::Inline;

/// Try to parse a code span whose opening run starts at `text[start]`.
///
/// The closing run must have exactly the same length. When the content both
/// begins and ends with a space (or line ending) and is not all spaces, one
/// of each is split off as `WHITESPACE`.
pub(crate) fn try_parse_code_span(text: &str, start: usize, end: usize) -> Option<Inline> {
    let bytes = text.as_bytes();
    let ticks = bytes[start..end].iter().take_while(|&&b| b == b'`').count();
    if ticks == 0 {
        return None;
    }

    let content_start = start + ticks;
    let mut pos = content_start;
    let content_end = loop {
        let offset = bytes[pos..end].iter().position(|&b| b == b'`')?;
        let run_start = pos + offset;
        let run = bytes[run_start..end]
            .iter()
            .take_while(|&&b| b == b'`')
            .count();
        if run == ticks {
            break run_start;
        }
        pos = run_start + run;
    };

    let mut inner_start = content_start;
    let mut inner_end = content_end;
    let content = &text[content_start..content_end];
    if !content.chars().all(|c| c == ' ') {
        let lead = line_space_len(content);
        let trail = trailing_line_space_len(content);
        if lead > 0 && trail > 0 {
            inner_start += lead;
            inner_end -= trail;
        }
    }

    let mut children = vec![Inline::token(
        SyntaxKind::CODE_SPAN_MARKER,
        start,
        content_start,
    )];
    if inner_start > content_start {
        children.push(Inline::token(
            SyntaxKind::WHITESPACE,
            content_start,
            inner_start,
        ));
    }
    if inner_end > inner_start {
        children.push(Inline::token(
            SyntaxKind::CODE_CONTENT,
            inner_start,
            inner_end,
        ));
    }
    if content_end > inner_end {
        children.push(Inline::token(SyntaxKind::WHITESPACE, inner_end, content_end));
    }
    children.push(Inline::token(
        SyntaxKind::CODE_SPAN_MARKER,
        content_end,
        content_end + ticks,
    ));

    Some(Inline::Node {
        kind: SyntaxKind::CODE_SPAN,
        start,
        end: content_end + ticks,
        children,
    })
}

/// Byte length of a leading space or line ending.
fn line_space_len(s: &str) -> usize {
    if s.starts_with("\r\n") {
        2
    } else if s.starts_with([' ', '\n']) {
        1
    } else {
        0
    }
}

fn trailing_line_space_len(s: &str) -> usize {
    if s.ends_with("\r\n") {
        2
    } else if s.ends_with([' ', '\n']) {
        1
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(text: &str) -> Vec<(SyntaxKind, &str)> {
        match try_parse_code_span(text, 0, text.len()) {
            Some(Inline::Node { children, .. }) => children
                .iter()
                .map(|child| match child {
                    Inline::Token { kind, start, end } => (*kind, &text[*start..*end]),
                    other => panic!("unexpected {other:?}"),
                })
                .collect(),
            other => panic!("no code span: {other:?}"),
        }
    }

    #[test]
    fn simple_code_span() {
        assert_eq!(
            kinds("`code`"),
            vec![
                (SyntaxKind::CODE_SPAN_MARKER, "`"),
                (SyntaxKind::CODE_CONTENT, "code"),
                (SyntaxKind::CODE_SPAN_MARKER, "`"),
            ]
        );
    }

    #[test]
    fn strips_one_space_each_side() {
        assert_eq!(
            kinds("`` `a` ``"),
            vec![
                (SyntaxKind::CODE_SPAN_MARKER, "``"),
                (SyntaxKind::WHITESPACE, " "),
                (SyntaxKind::CODE_CONTENT, "`a`"),
                (SyntaxKind::WHITESPACE, " "),
                (SyntaxKind::CODE_SPAN_MARKER, "``"),
            ]
        );
    }

    #[test]
    fn all_space_content_is_kept() {
        assert_eq!(kinds("`  `")[1], (SyntaxKind::CODE_CONTENT, "  "));
    }

    #[test]
    fn closing_run_must_match_length() {
        assert!(try_parse_code_span("`a``", 0, 4).is_none());
        assert!(try_parse_code_span("``a`b``", 0, 7).is_some());
        assert!(try_parse_code_span("`no close", 0, 9).is_none());
    }

    #[test]
    fn end_bounds_the_search() {
        assert!(try_parse_code_span("`a` ", 0, 2).is_none());
    }
}
