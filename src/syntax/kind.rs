//! Syntax kinds and language definition for the Markdown CST.

use rowan::Language;

#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
pub enum SyntaxKind {
    // Tokens
    WHITESPACE = 0,
    NEWLINE,
    TEXT,
    BLANK_LINE,               // whitespace-only line, including its line ending
    BLOCKQUOTE_MARKER,        // >
    LIST_MARKER,              // - + * or 1. 1)
    ATX_HEADING_MARKER,       // leading ##### (or closing sequence)
    SETEXT_HEADING_UNDERLINE, // ===== or -----
    HORIZONTAL_RULE,          // --- or *** or ___
    CODE_FENCE_MARKER,        // ``` or ~~~
    CODE_INFO,                // info string after an opening fence
    CODE_CONTENT,             // one line of code, without its line ending
    HTML_CONTENT,             // one line of an HTML block
    SOFT_LINE_BREAK,          // line ending inside inline content
    HARD_LINE_BREAK,          // \<newline> or two spaces + newline
    ESCAPED_CHAR,             // \*
    EMPHASIS_MARKER,          // * ** _ __
    LINK_START,               // [
    IMAGE_START,              // ![
    LINK_TEXT_END,            // ]
    LINK_DEST_START,          // (
    LINK_DEST,                // url or <url>
    LINK_TITLE,               // "title", 'title' or (title)
    LINK_DEST_END,            // )
    AUTO_LINK_MARKER,         // < and >
    CODE_SPAN_MARKER,         // ` or `` or ```
    RAW_HTML,                 // inline tag, comment, declaration, ...

    // Composite nodes
    DOCUMENT,
    BLOCKQUOTE,
    LIST,
    LIST_ITEM,
    PARAGRAPH,
    HEADING,
    HEADING_CONTENT,
    CODE_BLOCK, // indented
    FENCED_CODE_BLOCK,
    CODE_FENCE_OPEN,
    CODE_FENCE_CLOSE,
    HTML_BLOCK,
    THEMATIC_BREAK,

    // Inline nodes
    EMPHASIS, // level 1 or 2, decided by the marker length
    LINK,
    IMAGE,
    LINK_TEXT,
    AUTO_LINK,
    CODE_SPAN,
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MarkdownLanguage {}

impl Language for MarkdownLanguage {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        assert!(raw.0 <= SyntaxKind::CODE_SPAN as u16);
        unsafe { std::mem::transmute::<u16, SyntaxKind>(raw.0) }
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

pub type SyntaxNode = rowan::SyntaxNode<MarkdownLanguage>;
pub type SyntaxToken = rowan::SyntaxToken<MarkdownLanguage>;
pub type SyntaxElement = rowan::SyntaxElement<MarkdownLanguage>;
