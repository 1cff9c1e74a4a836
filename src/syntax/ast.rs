//! Typed views over CST nodes.

use super::{SyntaxKind, SyntaxNode, SyntaxToken};

/// A typed wrapper around a [`SyntaxNode`] of one specific kind.
pub trait AstNode: Sized {
    fn kind() -> SyntaxKind;

    fn can_cast(kind: SyntaxKind) -> bool {
        kind == Self::kind()
    }

    fn cast(syntax: SyntaxNode) -> Option<Self>;

    fn syntax(&self) -> &SyntaxNode;
}

/// Declares a newtype wrapper and its [`AstNode`] impl for a node kind.
macro_rules! ast_node {
    ($(#[$meta:meta])* $name:ident, $kind:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(SyntaxNode);

        impl $crate::syntax::AstNode for $name {
            fn kind() -> SyntaxKind {
                SyntaxKind::$kind
            }

            fn cast(syntax: SyntaxNode) -> Option<Self> {
                if <Self as $crate::syntax::AstNode>::can_cast(syntax.kind()) {
                    Some(Self(syntax))
                } else {
                    None
                }
            }

            fn syntax(&self) -> &SyntaxNode {
                &self.0
            }
        }
    };
}

pub(super) use ast_node;

pub(super) mod support {
    use super::{AstNode, SyntaxKind, SyntaxNode, SyntaxToken};

    pub(crate) fn child<N: AstNode>(node: &SyntaxNode) -> Option<N> {
        node.children().find_map(N::cast)
    }

    pub(crate) fn token(node: &SyntaxNode, kind: SyntaxKind) -> Option<SyntaxToken> {
        node.children_with_tokens()
            .filter_map(|it| it.into_token())
            .find(|it| it.kind() == kind)
    }

    pub(crate) fn tokens(
        node: &SyntaxNode,
        kind: SyntaxKind,
    ) -> impl Iterator<Item = SyntaxToken> + '_ {
        node.children_with_tokens()
            .filter_map(|it| it.into_token())
            .filter(move |it| it.kind() == kind)
    }
}
