//! Link, image and autolink AST node wrappers.

use super::ast::{ast_node, support};
use super::{SyntaxKind, SyntaxNode};

ast_node!(Link, LINK);
ast_node!(Image, IMAGE);
ast_node!(LinkText, LINK_TEXT);
ast_node!(AutoLink, AUTO_LINK);

impl Link {
    pub fn text(&self) -> Option<LinkText> {
        support::child(&self.0)
    }

    /// The destination as written, e.g. `http://a` or `<my url>`.
    pub fn destination(&self) -> String {
        destination(&self.0)
    }

    /// The title without its delimiters.
    pub fn title(&self) -> Option<String> {
        title(&self.0)
    }
}

impl Image {
    /// The alt text label, which may contain inline markup.
    pub fn text(&self) -> Option<LinkText> {
        support::child(&self.0)
    }

    pub fn destination(&self) -> String {
        destination(&self.0)
    }

    pub fn title(&self) -> Option<String> {
        title(&self.0)
    }
}

impl AutoLink {
    pub fn url(&self) -> String {
        support::tokens(&self.0, SyntaxKind::TEXT)
            .map(|t| t.text().to_string())
            .collect()
    }
}

fn destination(node: &SyntaxNode) -> String {
    support::token(node, SyntaxKind::LINK_DEST)
        .map(|t| t.text().to_string())
        .unwrap_or_default()
}

fn title(node: &SyntaxNode) -> Option<String> {
    // A title spanning lines is split around the container prefixes.
    let raw: String = support::tokens(node, SyntaxKind::LINK_TITLE)
        .map(|t| t.text().to_string())
        .collect();

    if raw.len() < 2 {
        return None;
    }
    Some(raw[1..raw.len() - 1].to_string())
}
