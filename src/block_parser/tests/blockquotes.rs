use crate::block_parser::tests::helpers::{
    assert_block_kinds, count_children, find_all, find_first, parse_blocks,
};
use crate::syntax::SyntaxKind;

#[test]
fn simple_blockquote() {
    assert_block_kinds("> quoted\n", &[SyntaxKind::BLOCKQUOTE]);
    let tree = parse_blocks("> quoted\n");
    let quote = find_first(&tree, SyntaxKind::BLOCKQUOTE).unwrap();
    assert_eq!(count_children(&quote, SyntaxKind::PARAGRAPH), 1);
}

#[test]
fn lazy_continuation_stays_in_quote() {
    let tree = parse_blocks("> first\nsecond\n");
    assert_eq!(tree.children().count(), 1);
    let para = find_first(&tree, SyntaxKind::PARAGRAPH).unwrap();
    assert_eq!(para.text().to_string(), "first\nsecond\n");
}

#[test]
fn nested_blockquotes() {
    let tree = parse_blocks("> > inner\n> outer\n");
    let quotes = find_all(&tree, SyntaxKind::BLOCKQUOTE);
    assert_eq!(quotes.len(), 2);
    // The lazy line continues the inner paragraph.
    assert_eq!(count_children(&quotes[0], SyntaxKind::PARAGRAPH), 0);
    assert_eq!(count_children(&quotes[1], SyntaxKind::PARAGRAPH), 1);
}

#[test]
fn blank_line_ends_blockquote() {
    assert_block_kinds(
        "> a\n\n> b\n",
        &[SyntaxKind::BLOCKQUOTE, SyntaxKind::BLOCKQUOTE],
    );
}

#[test]
fn empty_quote_line_separates_paragraphs() {
    let tree = parse_blocks("> a\n>\n> b\n");
    let quote = find_first(&tree, SyntaxKind::BLOCKQUOTE).unwrap();
    assert_eq!(count_children(&quote, SyntaxKind::PARAGRAPH), 2);
}

#[test]
fn blockquote_interrupts_paragraph() {
    assert_block_kinds(
        "para\n> quote\n",
        &[SyntaxKind::PARAGRAPH, SyntaxKind::BLOCKQUOTE],
    );
}

#[test]
fn four_spaces_is_not_a_quote() {
    assert_block_kinds("    > code\n", &[SyntaxKind::CODE_BLOCK]);
}
