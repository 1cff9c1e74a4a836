//! Shared utilities for block parsing.

use crate::syntax::SyntaxKind;
use rowan::GreenNodeBuilder;

use super::line::{Piece, SourceLine};

/// Emits a token, skipping empty text.
pub(crate) fn emit_token(builder: &mut GreenNodeBuilder<'static>, kind: SyntaxKind, text: &str) {
    if !text.is_empty() {
        builder.token(kind.into(), text);
    }
}

/// Emits container prefix tokens (`>` markers, list indentation).
pub(crate) fn emit_prefix(builder: &mut GreenNodeBuilder<'static>, prefix: &[Piece<'_>]) {
    for (kind, text) in prefix {
        emit_token(builder, *kind, text);
    }
}

/// Emits a blank line inside a leaf: prefix, then the rest of the line and
/// its ending as one `BLANK_LINE` token.
pub(crate) fn emit_blank_line(builder: &mut GreenNodeBuilder<'static>, line: &SourceLine<'_>) {
    emit_prefix(builder, &line.prefix);
    let mut blank = String::with_capacity(line.content.len() + line.newline.len());
    blank.push_str(line.content);
    blank.push_str(line.newline);
    emit_token(builder, SyntaxKind::BLANK_LINE, &blank);
}

/// Splits leading spaces and tabs off `text`.
pub(crate) fn split_leading_whitespace(text: &str) -> (&str, &str) {
    let rest = text.trim_start_matches([' ', '\t']);
    text.split_at(text.len() - rest.len())
}

/// Splits trailing spaces and tabs off `text`.
pub(crate) fn split_trailing_whitespace(text: &str) -> (&str, &str) {
    let body = text.trim_end_matches([' ', '\t']);
    text.split_at(body.len())
}

/// Emits the lines of a paragraph-like block.
///
/// Each line becomes prefix tokens, leading `WHITESPACE`, then `TEXT`. The
/// last line keeps its trailing whitespace as a separate token so the inline
/// pass never sees it; inner lines keep it inside `TEXT` so hard line breaks
/// can be recognized.
///
/// With `final_newline` unset, the ending of the last line is left to the
/// caller (setext headings close their content node before it).
pub(crate) fn emit_text_lines(
    builder: &mut GreenNodeBuilder<'static>,
    lines: &[SourceLine<'_>],
    final_newline: bool,
) {
    let last = lines.len().saturating_sub(1);
    for (idx, line) in lines.iter().enumerate() {
        emit_prefix(builder, &line.prefix);
        let (indent, text) = split_leading_whitespace(line.content);
        emit_token(builder, SyntaxKind::WHITESPACE, indent);
        if idx == last {
            let (text, trailing) = split_trailing_whitespace(text);
            emit_token(builder, SyntaxKind::TEXT, text);
            emit_token(builder, SyntaxKind::WHITESPACE, trailing);
            if final_newline {
                emit_token(builder, SyntaxKind::NEWLINE, line.newline);
            }
        } else {
            emit_token(builder, SyntaxKind::TEXT, text);
            emit_token(builder, SyntaxKind::NEWLINE, line.newline);
        }
    }
}
