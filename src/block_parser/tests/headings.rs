use crate::block_parser::tests::helpers::{assert_block_kinds, find_first, get_text, parse_blocks};
use crate::syntax::SyntaxKind;

#[test]
fn atx_headings() {
    assert_block_kinds(
        "# One\n## Two\n###### Six\n",
        &[SyntaxKind::HEADING, SyntaxKind::HEADING, SyntaxKind::HEADING],
    );
}

#[test]
fn atx_content_excludes_closing_sequence() {
    let tree = parse_blocks("## Title ##\n");
    assert_eq!(get_text(&tree, SyntaxKind::HEADING_CONTENT).as_deref(), Some("Title"));
}

#[test]
fn empty_atx_heading_has_no_content() {
    let tree = parse_blocks("#\n");
    assert!(find_first(&tree, SyntaxKind::HEADING).is_some());
    assert!(find_first(&tree, SyntaxKind::HEADING_CONTENT).is_none());
}

#[test]
fn atx_interrupts_paragraph() {
    assert_block_kinds(
        "text\n# Heading\n",
        &[SyntaxKind::PARAGRAPH, SyntaxKind::HEADING],
    );
}

#[test]
fn setext_headings() {
    assert_block_kinds(
        "One\n===\n\nTwo\n---\n",
        &[SyntaxKind::HEADING, SyntaxKind::HEADING],
    );
}

#[test]
fn multiline_setext_content() {
    let tree = parse_blocks("Foo\nbar\n---\n");
    assert_eq!(
        get_text(&tree, SyntaxKind::HEADING_CONTENT).as_deref(),
        Some("Foo\nbar")
    );
}

#[test]
fn dashes_without_paragraph_are_a_break() {
    assert_block_kinds("---\n", &[SyntaxKind::THEMATIC_BREAK]);
    assert_block_kinds(
        "para\n\n---\n",
        &[SyntaxKind::PARAGRAPH, SyntaxKind::THEMATIC_BREAK],
    );
}

#[test]
fn lazy_line_is_not_a_setext_underline() {
    assert_block_kinds(
        "> quote\n---\n",
        &[SyntaxKind::BLOCKQUOTE, SyntaxKind::THEMATIC_BREAK],
    );
}

#[test]
fn setext_in_blockquote() {
    let tree = parse_blocks("> Title\n> =====\n");
    let quote = find_first(&tree, SyntaxKind::BLOCKQUOTE).unwrap();
    assert!(find_first(&quote, SyntaxKind::HEADING).is_some());
    assert!(find_first(&quote, SyntaxKind::PARAGRAPH).is_none());
}
