//! Lossless concrete syntax tree for Markdown documents.

mod ast;
mod code_blocks;
mod emphasis;
mod headings;
mod kind;
mod links;
mod lists;

pub use ast::AstNode;
pub use code_blocks::{CodeBlock, FencedCodeBlock, HtmlBlock};
pub use emphasis::{CodeSpan, Emphasis};
pub use headings::{Heading, HeadingContent};
pub use kind::{MarkdownLanguage, SyntaxElement, SyntaxKind, SyntaxNode, SyntaxToken};
pub use links::{AutoLink, Image, Link, LinkText};
pub use lists::{List, ListItem, ListMarker};
