//! Emphasis and code span AST node wrappers.

use super::ast::{ast_node, support};
use super::{SyntaxKind, SyntaxNode};

ast_node!(Emphasis, EMPHASIS);
ast_node!(CodeSpan, CODE_SPAN);

impl Emphasis {
    /// 1 for emphasis, 2 for strong emphasis.
    pub fn level(&self) -> usize {
        support::token(&self.0, SyntaxKind::EMPHASIS_MARKER)
            .map(|t| t.text().len())
            .unwrap_or(1)
    }
}

impl CodeSpan {
    /// Length of the backtick run on each side.
    pub fn ticks(&self) -> usize {
        support::token(&self.0, SyntaxKind::CODE_SPAN_MARKER)
            .map(|t| t.text().len())
            .unwrap_or(1)
    }

    /// The code between the markers, with line endings turned into spaces.
    pub fn content(&self) -> String {
        support::tokens(&self.0, SyntaxKind::CODE_CONTENT)
            .map(|t| t.text().replace("\r\n", " ").replace('\n', " "))
            .collect()
    }
}
