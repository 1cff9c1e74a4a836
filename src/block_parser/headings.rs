//! ATX and setext heading rules.

use rowan::{GreenNode, GreenNodeBuilder};

use crate::syntax::SyntaxKind;

use super::line::{Line, SourceLine, whitespace_columns};
use super::utils::{
    emit_prefix, emit_text_lines, emit_token, split_leading_whitespace, split_trailing_whitespace,
};
use super::{Block, BlockData, BlockRule, OpenContext, State};

/// The pieces of an ATX heading line, in source order.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct AtxParts<'a> {
    pub(crate) indent: &'a str,
    pub(crate) marker: &'a str,
    pub(crate) after_marker: &'a str,
    pub(crate) content: &'a str,
    pub(crate) before_closing: &'a str,
    pub(crate) closing: &'a str,
    pub(crate) trailing: &'a str,
}

/// Try to split an ATX heading line, returns `None` if the line is not one.
pub(crate) fn try_parse_atx_heading(line: &str) -> Option<AtxParts<'_>> {
    let (indent, rest) = split_leading_whitespace(line);
    if whitespace_columns(indent, 0).0 > 3 {
        return None;
    }

    // Must start with 1-6 # characters
    let hash_count = rest.bytes().take_while(|&b| b == b'#').count();
    if hash_count == 0 || hash_count > 6 {
        return None;
    }

    // After hashes, must be end of line, space, or tab
    let after_hashes = &rest[hash_count..];
    if !after_hashes.is_empty() && !after_hashes.starts_with([' ', '\t']) {
        return None;
    }

    let (after_marker, body) = split_leading_whitespace(after_hashes);
    let (body, trailing) = split_trailing_whitespace(body);

    // An optional closing sequence must be preceded by whitespace
    let without_hashes = body.trim_end_matches('#');
    let has_closing = without_hashes.len() < body.len()
        && (without_hashes.is_empty() || without_hashes.ends_with([' ', '\t']));

    let (content, before_closing, closing) = if has_closing {
        let (content, gap) = split_trailing_whitespace(without_hashes);
        (content, gap, &body[without_hashes.len()..])
    } else {
        (body, "", "")
    };

    Some(AtxParts {
        indent,
        marker: &rest[..hash_count],
        after_marker,
        content,
        before_closing,
        closing,
        trailing,
    })
}

/// Emit an ATX heading node to the builder.
pub(crate) fn emit_atx_heading(
    builder: &mut GreenNodeBuilder<'static>,
    line: &SourceLine<'_>,
    parts: &AtxParts<'_>,
) {
    builder.start_node(SyntaxKind::HEADING.into());
    emit_prefix(builder, &line.prefix);
    emit_token(builder, SyntaxKind::WHITESPACE, parts.indent);
    emit_token(builder, SyntaxKind::ATX_HEADING_MARKER, parts.marker);
    emit_token(builder, SyntaxKind::WHITESPACE, parts.after_marker);

    if !parts.content.is_empty() {
        builder.start_node(SyntaxKind::HEADING_CONTENT.into());
        builder.token(SyntaxKind::TEXT.into(), parts.content);
        builder.finish_node();
    }

    emit_token(builder, SyntaxKind::WHITESPACE, parts.before_closing);
    emit_token(builder, SyntaxKind::ATX_HEADING_MARKER, parts.closing);
    emit_token(builder, SyntaxKind::WHITESPACE, parts.trailing);
    emit_token(builder, SyntaxKind::NEWLINE, line.newline);
    builder.finish_node(); // HEADING
}

pub(crate) struct AtxHeadingRule;

impl BlockRule for AtxHeadingRule {
    fn name(&self) -> &'static str {
        "atx-heading"
    }

    fn trigger(&self) -> Option<&'static [u8]> {
        Some(b"#")
    }

    fn open<'a>(
        &self,
        _parent: &mut Block<'a>,
        line: &mut Line<'a>,
        _ctx: &mut OpenContext<'_, 'a>,
    ) -> Option<(Block<'a>, State)> {
        if line.indent() >= 4 {
            return None;
        }
        try_parse_atx_heading(line.rest())?;
        let block = Block::leaf(SyntaxKind::HEADING, BlockData::None, line.take_source());
        Some((block, State::Close))
    }

    fn continue_block<'a>(
        &self,
        _block: &mut Block<'a>,
        _child: Option<&Block<'a>>,
        _line: &mut Line<'a>,
    ) -> State {
        State::Close
    }

    fn close(&self, block: Block<'_>) -> Option<GreenNode> {
        let line = block.lines.first()?;
        let parts = try_parse_atx_heading(line.content)?;
        let mut builder = GreenNodeBuilder::new();
        emit_atx_heading(&mut builder, line, &parts);
        Some(builder.finish())
    }

    fn can_interrupt_paragraph(&self) -> bool {
        true
    }
}

/// Returns the underline character when `text` is a setext underline: a run
/// of `=` or `-` with optional surrounding whitespace.
pub(crate) fn try_parse_setext_underline(text: &str) -> Option<char> {
    let trimmed = text.trim_matches([' ', '\t']);
    let first = trimmed.chars().next()?;
    if (first == '=' || first == '-') && trimmed.chars().all(|c| c == first) {
        Some(first)
    } else {
        None
    }
}

/// Emit a setext heading: the paragraph lines as content, then the
/// underline line.
pub(crate) fn emit_setext_heading(
    builder: &mut GreenNodeBuilder<'static>,
    content: &[SourceLine<'_>],
    underline: &SourceLine<'_>,
) {
    builder.start_node(SyntaxKind::HEADING.into());

    builder.start_node(SyntaxKind::HEADING_CONTENT.into());
    emit_text_lines(builder, content, false);
    builder.finish_node();
    if let Some(last) = content.last() {
        emit_token(builder, SyntaxKind::NEWLINE, last.newline);
    }

    emit_prefix(builder, &underline.prefix);
    let (indent, rest) = split_leading_whitespace(underline.content);
    let (marker, trailing) = split_trailing_whitespace(rest);
    emit_token(builder, SyntaxKind::WHITESPACE, indent);
    emit_token(builder, SyntaxKind::SETEXT_HEADING_UNDERLINE, marker);
    emit_token(builder, SyntaxKind::WHITESPACE, trailing);
    emit_token(builder, SyntaxKind::NEWLINE, underline.newline);

    builder.finish_node(); // HEADING
}

/// Turns the open paragraph into a heading when the line is an underline.
pub(crate) struct SetextHeadingRule;

impl BlockRule for SetextHeadingRule {
    fn name(&self) -> &'static str {
        "setext-heading"
    }

    fn trigger(&self) -> Option<&'static [u8]> {
        Some(b"=-")
    }

    fn open<'a>(
        &self,
        _parent: &mut Block<'a>,
        line: &mut Line<'a>,
        ctx: &mut OpenContext<'_, 'a>,
    ) -> Option<(Block<'a>, State)> {
        if line.indent() >= 4 {
            return None;
        }
        try_parse_setext_underline(line.rest())?;
        let paragraph = ctx.paragraph.as_deref_mut()?;
        if paragraph.lines.is_empty() {
            return None;
        }

        let mut block = Block::new(SyntaxKind::HEADING);
        block.lines = std::mem::take(&mut paragraph.lines);
        block.lines.push(line.take_source());
        Some((block, State::Close))
    }

    fn continue_block<'a>(
        &self,
        _block: &mut Block<'a>,
        _child: Option<&Block<'a>>,
        _line: &mut Line<'a>,
    ) -> State {
        State::Close
    }

    fn close(&self, mut block: Block<'_>) -> Option<GreenNode> {
        let underline = block.lines.pop()?;
        let mut builder = GreenNodeBuilder::new();
        emit_setext_heading(&mut builder, &block.lines, &underline);
        Some(builder.finish())
    }

    fn can_interrupt_paragraph(&self) -> bool {
        true
    }
}
