use crate::block_parser::tests::helpers::{block_kinds, find_all, parse_raw_blocks};
use crate::syntax::SyntaxKind;

#[test]
fn raw_mode_only_builds_paragraphs() {
    let tree = parse_raw_blocks("# title\n- item\n\n> quote\n\n    indented\n");
    assert_eq!(
        block_kinds(&tree),
        vec![
            SyntaxKind::PARAGRAPH,
            SyntaxKind::PARAGRAPH,
            SyntaxKind::PARAGRAPH
        ]
    );
}

#[test]
fn raw_lines_are_joined_by_soft_breaks() {
    let tree = parse_raw_blocks("one\ntwo\nthree\n");
    let breaks: Vec<_> = tree
        .descendants_with_tokens()
        .filter(|e| e.kind() == SyntaxKind::SOFT_LINE_BREAK)
        .collect();
    assert_eq!(breaks.len(), 2);
    assert_eq!(find_all(&tree, SyntaxKind::PARAGRAPH).len(), 1);
}
