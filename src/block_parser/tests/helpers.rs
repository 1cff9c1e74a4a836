use crate::block_parser::BlockParser;
use crate::config::{Config, ParagraphMode};
use crate::syntax::{SyntaxKind, SyntaxNode};

pub fn parse_blocks(input: &str) -> SyntaxNode {
    let config = Config::default();
    BlockParser::new(input, &config).parse()
}

pub fn parse_raw_blocks(input: &str) -> SyntaxNode {
    let config = Config {
        paragraphs: ParagraphMode::Raw,
        ..Default::default()
    };
    BlockParser::new(input, &config).parse()
}

pub fn find_first(node: &SyntaxNode, kind: SyntaxKind) -> Option<SyntaxNode> {
    node.descendants().find(|n| n.kind() == kind)
}

pub fn find_all(node: &SyntaxNode, kind: SyntaxKind) -> Vec<SyntaxNode> {
    node.descendants().filter(|n| n.kind() == kind).collect()
}

/// Kinds of the document's direct child nodes.
pub fn block_kinds(node: &SyntaxNode) -> Vec<SyntaxKind> {
    node.children().map(|n| n.kind()).collect()
}

pub fn assert_block_kinds(input: &str, expected: &[SyntaxKind]) {
    let node = parse_blocks(input);
    let actual = block_kinds(&node);
    assert_eq!(
        actual, expected,
        "Block kinds did not match for input:\n{}",
        input
    );
}

/// Get text content of first node matching the kind
pub fn get_text(node: &SyntaxNode, kind: SyntaxKind) -> Option<String> {
    find_first(node, kind).map(|n| n.text().to_string())
}

/// Count direct children of a specific kind
pub fn count_children(node: &SyntaxNode, kind: SyntaxKind) -> usize {
    node.children().filter(|n| n.kind() == kind).count()
}
