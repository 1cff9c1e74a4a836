//! Closed set of node kinds seen by the renderer.

use crate::syntax::SyntaxKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum NodeKind {
    Document,
    Blockquote,
    List,
    ListItem,
    Paragraph,
    Heading,
    HeadingContent,
    CodeBlock,
    FencedCodeBlock,
    /// Fence lines; only read through their code block.
    CodeFence,
    HtmlBlock,
    ThematicBreak,
    Emphasis,
    Link,
    Image,
    LinkText,
    AutoLink,
    CodeSpan,
    /// A token kind where a node was expected.
    Token(SyntaxKind),
}

impl From<SyntaxKind> for NodeKind {
    fn from(kind: SyntaxKind) -> Self {
        match kind {
            SyntaxKind::DOCUMENT => NodeKind::Document,
            SyntaxKind::BLOCKQUOTE => NodeKind::Blockquote,
            SyntaxKind::LIST => NodeKind::List,
            SyntaxKind::LIST_ITEM => NodeKind::ListItem,
            SyntaxKind::PARAGRAPH => NodeKind::Paragraph,
            SyntaxKind::HEADING => NodeKind::Heading,
            SyntaxKind::HEADING_CONTENT => NodeKind::HeadingContent,
            SyntaxKind::CODE_BLOCK => NodeKind::CodeBlock,
            SyntaxKind::FENCED_CODE_BLOCK => NodeKind::FencedCodeBlock,
            SyntaxKind::CODE_FENCE_OPEN | SyntaxKind::CODE_FENCE_CLOSE => NodeKind::CodeFence,
            SyntaxKind::HTML_BLOCK => NodeKind::HtmlBlock,
            SyntaxKind::THEMATIC_BREAK => NodeKind::ThematicBreak,
            SyntaxKind::EMPHASIS => NodeKind::Emphasis,
            SyntaxKind::LINK => NodeKind::Link,
            SyntaxKind::IMAGE => NodeKind::Image,
            SyntaxKind::LINK_TEXT => NodeKind::LinkText,
            SyntaxKind::AUTO_LINK => NodeKind::AutoLink,
            SyntaxKind::CODE_SPAN => NodeKind::CodeSpan,
            other => NodeKind::Token(other),
        }
    }
}

/// Whether a node's children are visited after it has been entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Walk {
    Continue,
    SkipChildren,
}
