use crate::block_parser::tests::helpers::{assert_block_kinds, get_text, parse_blocks};
use crate::syntax::SyntaxKind;

#[test]
fn div_block_ends_at_blank_line() {
    assert_block_kinds(
        "<div>\n*not emphasis*\n</div>\n\ntext\n",
        &[SyntaxKind::HTML_BLOCK, SyntaxKind::PARAGRAPH],
    );
}

#[test]
fn comment_runs_to_end_marker() {
    let tree = parse_blocks("<!-- a\n\nb -->\nafter\n");
    assert_eq!(
        get_text(&tree, SyntaxKind::HTML_BLOCK).as_deref(),
        Some("<!-- a\n\nb -->\n")
    );
}

#[test]
fn single_line_raw_text_block() {
    assert_block_kinds(
        "<pre>x</pre>\ntext\n",
        &[SyntaxKind::HTML_BLOCK, SyntaxKind::PARAGRAPH],
    );
}

#[test]
fn generic_tag_cannot_interrupt_paragraph() {
    assert_block_kinds("text\n<custom-tag>\n", &[SyntaxKind::PARAGRAPH]);
    assert_block_kinds(
        "text\n<div>\n",
        &[SyntaxKind::PARAGRAPH, SyntaxKind::HTML_BLOCK],
    );
}
