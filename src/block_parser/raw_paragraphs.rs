//! Raw paragraph rule, used when paragraphs are configured as `raw`.
//!
//! Every run of non-blank lines becomes one paragraph whose lines are kept
//! verbatim. No other block construct is recognized and the inline pass
//! leaves these paragraphs alone.

use rowan::{GreenNode, GreenNodeBuilder};

use crate::syntax::SyntaxKind;

use super::line::{Line, SourceLine};
use super::utils::{emit_prefix, emit_token};
use super::{Block, BlockData, BlockRule, OpenContext, State};

pub(crate) fn emit_raw_paragraph(
    builder: &mut GreenNodeBuilder<'static>,
    lines: &[SourceLine<'_>],
) {
    builder.start_node(SyntaxKind::PARAGRAPH.into());
    let last = lines.len().saturating_sub(1);
    for (idx, line) in lines.iter().enumerate() {
        emit_prefix(builder, &line.prefix);
        emit_token(builder, SyntaxKind::TEXT, line.content);
        let kind = if idx == last {
            SyntaxKind::NEWLINE
        } else {
            SyntaxKind::SOFT_LINE_BREAK
        };
        emit_token(builder, kind, line.newline);
    }
    builder.finish_node(); // PARAGRAPH
}

pub(crate) struct RawParagraphRule;

impl BlockRule for RawParagraphRule {
    fn name(&self) -> &'static str {
        "raw-paragraph"
    }

    fn open<'a>(
        &self,
        _parent: &mut Block<'a>,
        line: &mut Line<'a>,
        _ctx: &mut OpenContext<'_, 'a>,
    ) -> Option<(Block<'a>, State)> {
        if line.is_blank() {
            return None;
        }
        let block = Block::leaf(SyntaxKind::PARAGRAPH, BlockData::None, line.take_source());
        Some((block, State::Continue))
    }

    fn continue_block<'a>(
        &self,
        _block: &mut Block<'a>,
        _child: Option<&Block<'a>>,
        line: &mut Line<'a>,
    ) -> State {
        if line.is_blank() {
            State::Close
        } else {
            State::Continue
        }
    }

    fn close(&self, block: Block<'_>) -> Option<GreenNode> {
        if block.lines.is_empty() {
            return None;
        }
        let mut builder = GreenNodeBuilder::new();
        emit_raw_paragraph(&mut builder, &block.lines);
        Some(builder.finish())
    }
}
