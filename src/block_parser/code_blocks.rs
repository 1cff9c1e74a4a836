//! Fenced code block rule.

use rowan::{GreenNode, GreenNodeBuilder};

use crate::syntax::SyntaxKind;

use super::line::{Line, SourceLine, byte_index_at_column, whitespace_columns};
use super::utils::{emit_prefix, emit_token, split_leading_whitespace, split_trailing_whitespace};
use super::{Block, BlockData, BlockRule, OpenContext, State};

/// An opening code fence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FenceInfo {
    pub(crate) ch: u8,
    pub(crate) len: usize,
    /// Columns of indentation before the fence.
    pub(crate) indent: usize,
}

/// Try to detect an opening fence: three or more backticks or tildes.
/// Backtick fences may not carry a backtick in their info string.
pub(crate) fn try_parse_fence_open(line: &str) -> Option<FenceInfo> {
    let (indent, rest) = split_leading_whitespace(line);
    let indent = whitespace_columns(indent, 0).0;
    if indent > 3 {
        return None;
    }

    let ch = *rest.as_bytes().first()?;
    if ch != b'`' && ch != b'~' {
        return None;
    }

    let len = rest.bytes().take_while(|&b| b == ch).count();
    if len < 3 {
        return None;
    }

    if ch == b'`' && rest[len..].contains('`') {
        return None;
    }

    Some(FenceInfo { ch, len, indent })
}

/// A closing fence uses the same character, is at least as long as the
/// opening one, and carries nothing but whitespace after it.
pub(crate) fn is_closing_fence(line: &str, ch: u8, len: usize) -> bool {
    let (indent, rest) = split_leading_whitespace(line);
    if whitespace_columns(indent, 0).0 > 3 {
        return false;
    }
    let run = rest.bytes().take_while(|&b| b == ch).count();
    run >= len && rest[run..].trim_matches([' ', '\t']).is_empty()
}

fn emit_fence_line(
    builder: &mut GreenNodeBuilder<'static>,
    kind: SyntaxKind,
    line: &SourceLine<'_>,
    ch: u8,
) {
    builder.start_node(kind.into());
    emit_prefix(builder, &line.prefix);

    let (indent, rest) = split_leading_whitespace(line.content);
    let run = rest.bytes().take_while(|&b| b == ch).count();
    let (gap, info) = split_leading_whitespace(&rest[run..]);
    let (info, trailing) = split_trailing_whitespace(info);

    emit_token(builder, SyntaxKind::WHITESPACE, indent);
    emit_token(builder, SyntaxKind::CODE_FENCE_MARKER, &rest[..run]);
    emit_token(builder, SyntaxKind::WHITESPACE, gap);
    emit_token(builder, SyntaxKind::CODE_INFO, info);
    emit_token(builder, SyntaxKind::WHITESPACE, trailing);
    emit_token(builder, SyntaxKind::NEWLINE, line.newline);
    builder.finish_node();
}

/// Emit a fenced code block. Content lines lose up to `indent` columns of
/// leading whitespace, matching the indentation of the opening fence.
pub(crate) fn emit_fenced_code_block(
    builder: &mut GreenNodeBuilder<'static>,
    lines: &[SourceLine<'_>],
    fence: FenceInfo,
    closed: bool,
) {
    let Some((open, rest)) = lines.split_first() else {
        return;
    };
    let (content, close) = match rest.split_last() {
        Some((last, content)) if closed => (content, Some(last)),
        _ => (rest, None),
    };

    builder.start_node(SyntaxKind::FENCED_CODE_BLOCK.into());
    emit_fence_line(builder, SyntaxKind::CODE_FENCE_OPEN, open, fence.ch);

    for line in content {
        emit_prefix(builder, &line.prefix);
        let strip = byte_index_at_column(line.content, fence.indent);
        emit_token(builder, SyntaxKind::WHITESPACE, &line.content[..strip]);
        emit_token(builder, SyntaxKind::CODE_CONTENT, &line.content[strip..]);
        emit_token(builder, SyntaxKind::NEWLINE, line.newline);
    }

    if let Some(close) = close {
        emit_fence_line(builder, SyntaxKind::CODE_FENCE_CLOSE, close, fence.ch);
    }

    builder.finish_node(); // FENCED_CODE_BLOCK
}

pub(crate) struct FencedCodeRule;

impl BlockRule for FencedCodeRule {
    fn name(&self) -> &'static str {
        "fenced-code"
    }

    fn trigger(&self) -> Option<&'static [u8]> {
        Some(b"`~")
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
        let fence = try_parse_fence_open(line.rest())?;
        log::trace!("Fence of {} {:?}", fence.len, fence.ch as char);

        let data = BlockData::Fence {
            ch: fence.ch,
            len: fence.len,
            indent: fence.indent,
            closed: false,
        };
        let block = Block::leaf(SyntaxKind::FENCED_CODE_BLOCK, data, line.take_source());
        Some((block, State::Continue))
    }

    fn continue_block<'a>(
        &self,
        _block: &mut Block<'a>,
        _child: Option<&Block<'a>>,
        _line: &mut Line<'a>,
    ) -> State {
        State::Continue
    }

    fn add_line<'a>(&self, block: &mut Block<'a>, line: &mut Line<'a>) -> bool {
        let BlockData::Fence {
            ch,
            len,
            indent,
            closed: false,
        } = block.data
        else {
            return true;
        };

        let closing = is_closing_fence(line.rest(), ch, len);
        block.lines.push(line.take_source());
        if closing {
            block.data = BlockData::Fence {
                ch,
                len,
                indent,
                closed: true,
            };
        }
        closing
    }

    fn close(&self, block: Block<'_>) -> Option<GreenNode> {
        let BlockData::Fence {
            ch,
            len,
            indent,
            closed,
        } = block.data
        else {
            return None;
        };

        let mut builder = GreenNodeBuilder::new();
        emit_fenced_code_block(
            &mut builder,
            &block.lines,
            FenceInfo { ch, len, indent },
            closed,
        );
        Some(builder.finish())
    }

    fn can_interrupt_paragraph(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_fences() {
        assert_eq!(
            try_parse_fence_open("```rust"),
            Some(FenceInfo {
                ch: b'`',
                len: 3,
                indent: 0
            })
        );
        assert_eq!(try_parse_fence_open("  ~~~~").map(|f| f.len), Some(4));
        assert!(try_parse_fence_open("``").is_none());
        assert!(try_parse_fence_open("``` a`b").is_none());
        assert!(try_parse_fence_open("~~~ a`b").is_some());
    }

    #[test]
    fn closing_fences() {
        assert!(is_closing_fence("```", b'`', 3));
        assert!(is_closing_fence("`````  ", b'`', 3));
        assert!(!is_closing_fence("``", b'`', 3));
        assert!(!is_closing_fence("``` x", b'`', 3));
        assert!(!is_closing_fence("~~~", b'`', 3));
    }
}
