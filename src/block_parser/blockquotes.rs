//! Blockquote container rule.

use crate::syntax::SyntaxKind;

use super::line::Line;
use super::{Block, BlockRule, OpenContext, State};

pub(crate) struct BlockquoteRule;

/// Consumes `>` and one optional following space or tab when the line starts
/// a blockquote marker (at most three columns of indentation).
pub(crate) fn try_consume_blockquote_marker(line: &mut Line<'_>) -> bool {
    if line.indent() >= 4 || line.peek_byte() != Some(b'>') {
        return false;
    }

    line.consume_indent();
    line.consume(SyntaxKind::BLOCKQUOTE_MARKER, 1);
    if matches!(line.rest().as_bytes().first(), Some(b' ' | b'\t')) {
        line.consume(SyntaxKind::WHITESPACE, 1);
    }
    true
}

impl BlockRule for BlockquoteRule {
    fn name(&self) -> &'static str {
        "blockquote"
    }

    fn trigger(&self) -> Option<&'static [u8]> {
        Some(b">")
    }

    fn open<'a>(
        &self,
        _parent: &mut Block<'a>,
        line: &mut Line<'a>,
        _ctx: &mut OpenContext<'_, 'a>,
    ) -> Option<(Block<'a>, State)> {
        if !try_consume_blockquote_marker(line) {
            return None;
        }
        Some((Block::new(SyntaxKind::BLOCKQUOTE), State::ContinueWithChildren))
    }

    fn continue_block<'a>(
        &self,
        _block: &mut Block<'a>,
        _child: Option<&Block<'a>>,
        line: &mut Line<'a>,
    ) -> State {
        if try_consume_blockquote_marker(line) {
            State::ContinueWithChildren
        } else {
            State::Close
        }
    }

    fn can_interrupt_paragraph(&self) -> bool {
        true
    }
}
