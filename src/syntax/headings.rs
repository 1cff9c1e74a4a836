//! Heading AST node wrappers.

use super::ast::{ast_node, support};
use super::{SyntaxKind, SyntaxNode};

ast_node!(
    /// An ATX (`## Title`) or setext (`Title` over `-----`) heading.
    Heading,
    HEADING
);

impl Heading {
    /// Returns the heading level (1-6).
    pub fn level(&self) -> usize {
        if let Some(marker) = support::token(&self.0, SyntaxKind::ATX_HEADING_MARKER) {
            return marker.text().len();
        }
        match support::token(&self.0, SyntaxKind::SETEXT_HEADING_UNDERLINE) {
            Some(underline) if underline.text().starts_with('-') => 2,
            _ => 1,
        }
    }

    pub fn is_atx(&self) -> bool {
        support::token(&self.0, SyntaxKind::ATX_HEADING_MARKER).is_some()
    }

    pub fn content(&self) -> Option<HeadingContent> {
        support::child(&self.0)
    }

    /// True when the heading has no inline content at all.
    pub fn is_empty(&self) -> bool {
        self.content().is_none_or(|c| c.is_empty())
    }
}

ast_node!(HeadingContent, HEADING_CONTENT);

impl HeadingContent {
    /// Returns the raw source text of the heading, without container prefixes.
    pub fn text(&self) -> String {
        self.0
            .descendants_with_tokens()
            .filter_map(|it| it.into_token())
            .filter(|token| {
                !matches!(
                    token.kind(),
                    SyntaxKind::WHITESPACE | SyntaxKind::BLOCKQUOTE_MARKER
                )
            })
            .map(|token| token.text().to_string())
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.text().trim().is_empty()
    }
}
