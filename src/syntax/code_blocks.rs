//! Code block and HTML block AST node wrappers.

use super::ast::{ast_node, support};
use super::{SyntaxKind, SyntaxNode};

ast_node!(
    /// A code block introduced by four columns of indentation.
    CodeBlock,
    CODE_BLOCK
);

ast_node!(FencedCodeBlock, FENCED_CODE_BLOCK);
ast_node!(HtmlBlock, HTML_BLOCK);

impl CodeBlock {
    /// The code lines, each terminated by `\n`.
    pub fn lines(&self) -> Vec<String> {
        content_lines(&self.0, SyntaxKind::CODE_CONTENT)
    }
}

impl FencedCodeBlock {
    /// The full info string after the opening fence, if any.
    pub fn info(&self) -> Option<String> {
        let open = self
            .0
            .children()
            .find(|n| n.kind() == SyntaxKind::CODE_FENCE_OPEN)?;
        support::token(&open, SyntaxKind::CODE_INFO).map(|t| t.text().to_string())
    }

    /// The first word of the info string.
    pub fn language(&self) -> Option<String> {
        self.info()
            .and_then(|info| info.split_whitespace().next().map(str::to_string))
    }

    pub fn lines(&self) -> Vec<String> {
        content_lines(&self.0, SyntaxKind::CODE_CONTENT)
    }
}

impl HtmlBlock {
    /// The block's source lines without container prefixes.
    pub fn lines(&self) -> Vec<String> {
        content_lines(&self.0, SyntaxKind::HTML_CONTENT)
    }
}

/// Collects `content` lines directly under `node`.
///
/// Every `NEWLINE` token directly under the block ends one line. Fence lines
/// live in their own child nodes, so they never contribute.
fn content_lines(node: &SyntaxNode, content: SyntaxKind) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut open = false;

    for token in node.children_with_tokens().filter_map(|it| it.into_token()) {
        match token.kind() {
            kind if kind == content => {
                current.push_str(token.text());
                open = true;
            }
            SyntaxKind::NEWLINE => {
                current.push('\n');
                lines.push(std::mem::take(&mut current));
                open = false;
            }
            _ => {}
        }
    }

    if open {
        current.push('\n');
        lines.push(current);
    }
    lines
}
