//! Indented code block rule.
//!
//! Four columns of indentation start a code block (unless a paragraph is
//! open). Blank lines inside the block are kept; trailing blank lines stay
//! in the node as `BLANK_LINE` tokens so the tree remains lossless.

use rowan::{GreenNode, GreenNodeBuilder};

use crate::syntax::SyntaxKind;

use super::line::{Line, SourceLine, byte_index_at_column};
use super::utils::{emit_blank_line, emit_prefix, emit_token};
use super::{Block, BlockData, BlockRule, OpenContext, State};

const CODE_INDENT: usize = 4;

pub(crate) fn emit_indented_code_block(
    builder: &mut GreenNodeBuilder<'static>,
    lines: &[SourceLine<'_>],
) {
    let code_len = lines
        .iter()
        .rposition(|line| !line.is_blank())
        .map_or(0, |idx| idx + 1);

    builder.start_node(SyntaxKind::CODE_BLOCK.into());
    for line in &lines[..code_len] {
        emit_prefix(builder, &line.prefix);
        let strip = byte_index_at_column(line.content, CODE_INDENT);
        emit_token(builder, SyntaxKind::WHITESPACE, &line.content[..strip]);
        emit_token(builder, SyntaxKind::CODE_CONTENT, &line.content[strip..]);
        emit_token(builder, SyntaxKind::NEWLINE, line.newline);
    }
    for line in &lines[code_len..] {
        emit_blank_line(builder, line);
    }
    builder.finish_node(); // CODE_BLOCK
}

pub(crate) struct IndentedCodeRule;

impl BlockRule for IndentedCodeRule {
    fn name(&self) -> &'static str {
        "indented-code"
    }

    fn open<'a>(
        &self,
        _parent: &mut Block<'a>,
        line: &mut Line<'a>,
        _ctx: &mut OpenContext<'_, 'a>,
    ) -> Option<(Block<'a>, State)> {
        if line.indent() < CODE_INDENT || line.is_blank() {
            return None;
        }
        let block = Block::leaf(SyntaxKind::CODE_BLOCK, BlockData::None, line.take_source());
        Some((block, State::Continue))
    }

    fn continue_block<'a>(
        &self,
        _block: &mut Block<'a>,
        _child: Option<&Block<'a>>,
        line: &mut Line<'a>,
    ) -> State {
        if line.is_blank() || line.indent() >= CODE_INDENT {
            State::Continue
        } else {
            State::Close
        }
    }

    fn close(&self, block: Block<'_>) -> Option<GreenNode> {
        let mut builder = GreenNodeBuilder::new();
        emit_indented_code_block(&mut builder, &block.lines);
        Some(builder.finish())
    }

    fn can_accept_indented_line(&self) -> bool {
        true
    }
}
