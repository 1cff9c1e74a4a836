use crate::block_parser::BlockParser;
use crate::config::Config;
use crate::inline_parser::InlineParser;
use crate::syntax::{SyntaxKind, SyntaxNode};

fn parse(input: &str) -> SyntaxNode {
    let config = Config::default();
    let blocks = BlockParser::new(input, &config).parse();
    InlineParser::new(blocks, &config).parse()
}

fn texts_of(node: &SyntaxNode, kind: SyntaxKind) -> Vec<String> {
    node.descendants()
        .filter(|n| n.kind() == kind)
        .map(|n| n.text().to_string())
        .collect()
}

fn token_kinds(node: &SyntaxNode) -> Vec<SyntaxKind> {
    node.descendants_with_tokens()
        .filter_map(|e| e.into_token())
        .map(|t| t.kind())
        .collect()
}

fn first(node: &SyntaxNode, kind: SyntaxKind) -> SyntaxNode {
    node.descendants()
        .find(|n| n.kind() == kind)
        .unwrap_or_else(|| panic!("no {kind:?} in\n{node:#?}"))
}

mod losslessness {
    use super::*;

    #[test]
    fn inline_constructs_round_trip() {
        let inputs = [
            "*a* **b** ***c*** _d_ __e__\n",
            "> para with `code`\n> and *emph\n> across* lines\n",
            "- [link](http://x \"t\")\n  ![img](<a b>)\n",
            "a  \nb\\\nc\n",
            "<span>raw</span> <https://x.y> <!-- c -->\n",
            "unclosed *star and [bracket\n",
            "trailing\r\nlines\r\n",
            "# *head* #\n",
        ];
        for input in inputs {
            assert_eq!(parse(input).text().to_string(), input, "{input:?}");
        }
    }
}

mod emphasis_tests {
    use super::*;

    #[test]
    fn simple_emphasis() {
        let tree = parse("a *b* c\n");
        assert_eq!(texts_of(&tree, SyntaxKind::EMPHASIS), vec!["*b*"]);
    }

    #[test]
    fn strong_wrapping_em() {
        let tree = parse("***w***\n");
        let outer = first(&tree, SyntaxKind::EMPHASIS);
        assert_eq!(outer.first_token().unwrap().text(), "**");
        let inner = outer
            .children()
            .find(|n| n.kind() == SyntaxKind::EMPHASIS)
            .unwrap();
        assert_eq!(inner.text().to_string(), "*w*");
    }

    #[test]
    fn rule_of_three() {
        // `*foo**bar*`: the inner `**` can both open and close, 1 + 2 is a
        // multiple of 3, so it does not pair with either single star.
        let tree = parse("*foo**bar*\n");
        assert_eq!(texts_of(&tree, SyntaxKind::EMPHASIS), vec!["*foo**bar*"]);
    }

    #[test]
    fn leftover_delimiters_are_text() {
        let tree = parse("**a*\n");
        assert_eq!(texts_of(&tree, SyntaxKind::EMPHASIS), vec!["*a*"]);
        let paragraph = first(&tree, SyntaxKind::PARAGRAPH);
        let leading = paragraph.first_token().unwrap();
        assert_eq!(leading.kind(), SyntaxKind::TEXT);
        assert_eq!(leading.text(), "*");
    }

    #[test]
    fn intraword_underscore_is_literal() {
        let tree = parse("snake_case_name\n");
        assert!(texts_of(&tree, SyntaxKind::EMPHASIS).is_empty());
    }

    #[test]
    fn spaced_delimiters_do_not_match() {
        let tree = parse("a * b * c\n");
        assert!(texts_of(&tree, SyntaxKind::EMPHASIS).is_empty());
    }

    #[test]
    fn emphasis_across_blockquote_lines() {
        let tree = parse("> *a\n> b*\n");
        let emphasis = first(&tree, SyntaxKind::EMPHASIS);
        assert_eq!(emphasis.text().to_string(), "*a\n> b*");
        assert!(
            token_kinds(&emphasis).contains(&SyntaxKind::BLOCKQUOTE_MARKER),
            "prefix woven into the emphasis node"
        );
    }

    #[test]
    fn escaped_delimiter() {
        let tree = parse("\\*a*\n");
        assert!(texts_of(&tree, SyntaxKind::EMPHASIS).is_empty());
        assert!(token_kinds(&tree).contains(&SyntaxKind::ESCAPED_CHAR));
    }
}

mod code_tests {
    use super::*;

    #[test]
    fn simple_code_span() {
        let tree = parse("This has `code` in it.\n");
        assert_eq!(texts_of(&tree, SyntaxKind::CODE_SPAN), vec!["`code`"]);
    }

    #[test]
    fn multiple_code_spans() {
        let tree = parse("Both `foo` and `bar` are code.\n");
        assert_eq!(
            texts_of(&tree, SyntaxKind::CODE_SPAN),
            vec!["`foo`", "`bar`"]
        );
    }

    #[test]
    fn code_span_hides_emphasis() {
        let tree = parse("`*not*` *yes*\n");
        assert_eq!(texts_of(&tree, SyntaxKind::EMPHASIS), vec!["*yes*"]);
    }

    #[test]
    fn unmatched_backticks_are_text() {
        let tree = parse("a `` b ` c\n");
        assert!(texts_of(&tree, SyntaxKind::CODE_SPAN).is_empty());
    }
}

mod link_tests {
    use super::*;

    #[test]
    fn inline_link_tokens() {
        let tree = parse("[x](http://a \"t\")\n");
        let link = first(&tree, SyntaxKind::LINK);
        let kinds: Vec<_> = link
            .children_with_tokens()
            .map(|e| e.kind())
            .collect();
        assert_eq!(
            kinds,
            vec![
                SyntaxKind::LINK_START,
                SyntaxKind::LINK_TEXT,
                SyntaxKind::LINK_TEXT_END,
                SyntaxKind::LINK_DEST_START,
                SyntaxKind::LINK_DEST,
                SyntaxKind::WHITESPACE,
                SyntaxKind::LINK_TITLE,
                SyntaxKind::LINK_DEST_END,
            ]
        );
    }

    #[test]
    fn emphasis_inside_link_text() {
        let tree = parse("[*a*](u)\n");
        let text = first(&tree, SyntaxKind::LINK_TEXT);
        assert_eq!(texts_of(&text, SyntaxKind::EMPHASIS), vec!["*a*"]);
    }

    #[test]
    fn emphasis_does_not_cross_link_text() {
        let tree = parse("*a [b* c](u)\n");
        assert!(texts_of(&tree, SyntaxKind::EMPHASIS).is_empty());
        assert_eq!(texts_of(&tree, SyntaxKind::LINK), vec!["[b* c](u)"]);
    }

    #[test]
    fn image() {
        let tree = parse("![alt *x*](pic.png)\n");
        assert_eq!(texts_of(&tree, SyntaxKind::IMAGE), vec!["![alt *x*](pic.png)"]);
        assert!(texts_of(&tree, SyntaxKind::LINK).is_empty());
    }

    #[test]
    fn reference_style_stays_text() {
        let tree = parse("[a][b]\n");
        assert!(texts_of(&tree, SyntaxKind::LINK).is_empty());
    }

    #[test]
    fn autolink_and_raw_html() {
        let tree = parse("<https://x.y> and <b>bold</b>\n");
        assert_eq!(texts_of(&tree, SyntaxKind::AUTO_LINK), vec!["<https://x.y>"]);
        let raw: Vec<_> = tree
            .descendants_with_tokens()
            .filter_map(|e| e.into_token())
            .filter(|t| t.kind() == SyntaxKind::RAW_HTML)
            .map(|t| t.text().to_string())
            .collect();
        assert_eq!(raw, vec!["<b>", "</b>"]);
    }
}

mod line_break_tests {
    use super::*;

    #[test]
    fn soft_and_hard_breaks() {
        let tree = parse("a\nb  \nc\\\nd\n");
        let kinds: Vec<_> = token_kinds(&tree)
            .into_iter()
            .filter(|k| {
                matches!(
                    k,
                    SyntaxKind::SOFT_LINE_BREAK | SyntaxKind::HARD_LINE_BREAK | SyntaxKind::NEWLINE
                )
            })
            .collect();
        assert_eq!(
            kinds,
            vec![
                SyntaxKind::SOFT_LINE_BREAK,
                SyntaxKind::HARD_LINE_BREAK,
                SyntaxKind::HARD_LINE_BREAK,
                SyntaxKind::NEWLINE,
            ]
        );
    }

    #[test]
    fn heading_content_is_inline_parsed() {
        let tree = parse("## a *b*\n");
        let content = first(&tree, SyntaxKind::HEADING_CONTENT);
        assert_eq!(texts_of(&content, SyntaxKind::EMPHASIS), vec!["*b*"]);
    }
}
