//! List AST node wrappers.
//!
//! A list is **loose** when any of its items are separated by blank lines, or
//! when an item directly contains two blocks with a blank line between them.
//! Otherwise it is **tight**.

use rowan::NodeOrToken;

use super::ast::{ast_node, support};
use super::{AstNode, SyntaxKind, SyntaxNode};

/// A list item marker: a bullet character or a number with its delimiter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListMarker {
    Bullet(char),
    Ordered { number: u64, delimiter: char },
}

impl ListMarker {
    /// Parses a marker at the very start of `text`.
    ///
    /// Returns the marker and its length in bytes. The marker must be followed
    /// by whitespace or the end of the line.
    pub fn parse(text: &str) -> Option<(ListMarker, usize)> {
        let bytes = text.as_bytes();
        let first = *bytes.first()?;

        let (marker, len) = match first {
            b'-' | b'+' | b'*' => (ListMarker::Bullet(first as char), 1),
            b'0'..=b'9' => {
                let digits = bytes.iter().take_while(|b| b.is_ascii_digit()).count();
                if digits > 9 {
                    return None;
                }
                let delimiter = *bytes.get(digits)?;
                if delimiter != b'.' && delimiter != b')' {
                    return None;
                }
                let number = text[..digits].parse().ok()?;
                (
                    ListMarker::Ordered {
                        number,
                        delimiter: delimiter as char,
                    },
                    digits + 1,
                )
            }
            _ => return None,
        };

        match bytes.get(len) {
            None | Some(b' ' | b'\t' | b'\n' | b'\r') => Some((marker, len)),
            _ => None,
        }
    }

    pub fn is_ordered(&self) -> bool {
        matches!(self, ListMarker::Ordered { .. })
    }

    /// Two markers belong to the same list when they share the bullet
    /// character or the ordered delimiter.
    pub fn is_compatible(&self, other: &ListMarker) -> bool {
        match (self, other) {
            (ListMarker::Bullet(a), ListMarker::Bullet(b)) => a == b,
            (
                ListMarker::Ordered { delimiter: a, .. },
                ListMarker::Ordered { delimiter: b, .. },
            ) => a == b,
            _ => false,
        }
    }
}

ast_node!(List, LIST);

impl List {
    pub fn items(&self) -> impl Iterator<Item = ListItem> + '_ {
        self.0.children().filter_map(ListItem::cast)
    }

    /// The marker of the first item.
    pub fn marker(&self) -> Option<ListMarker> {
        self.items().next().and_then(|item| item.marker())
    }

    pub fn is_ordered(&self) -> bool {
        self.marker().is_some_and(|m| m.is_ordered())
    }

    /// The start number for ordered lists, 1 for bullet lists.
    pub fn start(&self) -> u64 {
        match self.marker() {
            Some(ListMarker::Ordered { number, .. }) => number,
            _ => 1,
        }
    }

    /// The ordered delimiter (`.` or `)`), or the bullet character.
    pub fn delimiter(&self) -> Option<char> {
        match self.marker()? {
            ListMarker::Bullet(ch) => Some(ch),
            ListMarker::Ordered { delimiter, .. } => Some(delimiter),
        }
    }

    pub fn is_loose(&self) -> bool {
        let items: Vec<ListItem> = self.items().collect();
        let last = items.len().saturating_sub(1);

        for (idx, item) in items.iter().enumerate() {
            let mut seen_block = false;
            let mut pending_blank = false;

            for element in item.syntax().children_with_tokens() {
                match element {
                    NodeOrToken::Token(token) if token.kind() == SyntaxKind::BLANK_LINE => {
                        if seen_block {
                            pending_blank = true;
                        }
                    }
                    NodeOrToken::Node(node) => {
                        if pending_blank {
                            return true;
                        }
                        seen_block = true;
                        pending_blank = ends_with_blank_line(&node);
                    }
                    NodeOrToken::Token(_) => {}
                }
            }

            if idx != last && pending_blank {
                return true;
            }
        }

        false
    }

    pub fn is_tight(&self) -> bool {
        !self.is_loose()
    }
}

ast_node!(ListItem, LIST_ITEM);

impl ListItem {
    pub fn marker(&self) -> Option<ListMarker> {
        let token = support::token(&self.0, SyntaxKind::LIST_MARKER)?;
        ListMarker::parse(token.text()).map(|(marker, _)| marker)
    }

    /// True when the item holds no blocks (`-` alone on its line).
    pub fn is_empty(&self) -> bool {
        self.0.children().next().is_none()
    }
}

/// Only lists and items pass a trailing blank line up. An empty `>` line
/// at the end of a blockquote is not blank.
fn ends_with_blank_line(node: &SyntaxNode) -> bool {
    match node.last_child_or_token() {
        Some(NodeOrToken::Token(token)) => {
            token.kind() == SyntaxKind::BLANK_LINE && node.kind() != SyntaxKind::BLOCKQUOTE
        }
        Some(NodeOrToken::Node(child)) => {
            matches!(node.kind(), SyntaxKind::LIST | SyntaxKind::LIST_ITEM)
                && ends_with_blank_line(&child)
        }
        None => false,
    }
}
