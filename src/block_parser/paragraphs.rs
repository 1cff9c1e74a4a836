//! Paragraph rule: the fallback for any non-blank line.

use rowan::{GreenNode, GreenNodeBuilder};

use crate::syntax::SyntaxKind;

use super::line::{Line, SourceLine};
use super::utils::emit_text_lines;
use super::{Block, BlockData, BlockRule, OpenContext, State};

pub(crate) fn emit_paragraph(builder: &mut GreenNodeBuilder<'static>, lines: &[SourceLine<'_>]) {
    builder.start_node(SyntaxKind::PARAGRAPH.into());
    emit_text_lines(builder, lines, true);
    builder.finish_node(); // PARAGRAPH
}

pub(crate) struct ParagraphRule;

impl BlockRule for ParagraphRule {
    fn name(&self) -> &'static str {
        "paragraph"
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
        // A setext heading may have taken every line.
        if block.lines.is_empty() {
            return None;
        }
        let mut builder = GreenNodeBuilder::new();
        emit_paragraph(&mut builder, &block.lines);
        Some(builder.finish())
    }

    fn is_interruptible(&self) -> bool {
        true
    }
}
