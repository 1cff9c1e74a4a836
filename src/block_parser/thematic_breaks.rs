//! Thematic break rule (`***`, `---`, `___`).

use rowan::GreenNodeBuilder;

use crate::syntax::SyntaxKind;

use super::line::{Line, SourceLine};
use super::utils::{emit_prefix, emit_token, split_leading_whitespace, split_trailing_whitespace};
use super::{Block, BlockData, BlockRule, OpenContext, State};

pub(crate) struct ThematicBreakRule;

/// Three or more matching `*`, `-` or `_`, optionally separated by spaces or
/// tabs, with nothing else on the line.
pub(crate) fn is_thematic_break(text: &str) -> bool {
    let trimmed = text.trim_matches([' ', '\t']);
    let Some(first) = trimmed.chars().next() else {
        return false;
    };
    if !matches!(first, '*' | '-' | '_') {
        return false;
    }

    let mut count = 0;
    for ch in trimmed.chars() {
        match ch {
            c if c == first => count += 1,
            ' ' | '\t' => {}
            _ => return false,
        }
    }
    count >= 3
}

fn emit_thematic_break(builder: &mut GreenNodeBuilder<'static>, line: &SourceLine<'_>) {
    builder.start_node(SyntaxKind::THEMATIC_BREAK.into());
    emit_prefix(builder, &line.prefix);
    let (indent, rest) = split_leading_whitespace(line.content);
    let (rule, trailing) = split_trailing_whitespace(rest);
    emit_token(builder, SyntaxKind::WHITESPACE, indent);
    emit_token(builder, SyntaxKind::HORIZONTAL_RULE, rule);
    emit_token(builder, SyntaxKind::WHITESPACE, trailing);
    emit_token(builder, SyntaxKind::NEWLINE, line.newline);
    builder.finish_node();
}

impl BlockRule for ThematicBreakRule {
    fn name(&self) -> &'static str {
        "thematic-break"
    }

    fn trigger(&self) -> Option<&'static [u8]> {
        Some(b"*-_")
    }

    fn open<'a>(
        &self,
        _parent: &mut Block<'a>,
        line: &mut Line<'a>,
        _ctx: &mut OpenContext<'_, 'a>,
    ) -> Option<(Block<'a>, State)> {
        if line.indent() >= 4 || !is_thematic_break(line.rest()) {
            return None;
        }
        let block = Block::leaf(SyntaxKind::THEMATIC_BREAK, BlockData::None, line.take_source());
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

    fn close(&self, block: Block<'_>) -> Option<rowan::GreenNode> {
        let line = block.lines.first()?;
        let mut builder = GreenNodeBuilder::new();
        emit_thematic_break(&mut builder, line);
        Some(builder.finish())
    }

    fn can_interrupt_paragraph(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::is_thematic_break;

    #[test]
    fn recognizes_breaks() {
        assert!(is_thematic_break("***"));
        assert!(is_thematic_break(" - - -"));
        assert!(is_thematic_break("_____  "));
        assert!(!is_thematic_break("--"));
        assert!(!is_thematic_break("*-*"));
        assert!(!is_thematic_break("--- a"));
    }
}
