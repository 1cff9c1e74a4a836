//! Canonical rendering of inline content into a string.
//!
//! Container prefixes, indentation and line endings that the inline pass
//! kept as trivia are dropped here; the block renderer re-creates them.

use rowan::NodeOrToken;

use crate::config::{HardBreakStyle, SoftBreakStyle};
use crate::syntax::{
    AstNode, AutoLink, CodeSpan, Emphasis, Image, Link, LinkText, SyntaxElement, SyntaxKind,
    SyntaxNode, SyntaxToken,
};

use super::RenderOptions;
use super::dispatch::{NodeKind, Walk};
use super::error::RenderError;

/// Line break treatment for one inline container.
#[derive(Debug, Clone, Copy)]
pub(crate) struct InlineStyle {
    hard_break: HardBreakStyle,
    soft_break: SoftBreakStyle,
    /// Render every line break as a space (heading text).
    single_line: bool,
}

impl InlineStyle {
    pub(crate) fn paragraph(options: &RenderOptions) -> Self {
        Self {
            hard_break: options.hard_break,
            soft_break: options.soft_break,
            single_line: false,
        }
    }

    pub(crate) fn single_line() -> Self {
        Self {
            hard_break: HardBreakStyle::Backslash,
            soft_break: SoftBreakStyle::Space,
            single_line: true,
        }
    }
}

/// Renders the inline children of `node`.
pub(crate) fn render_inlines(node: &SyntaxNode, style: &InlineStyle) -> Result<String, RenderError> {
    let mut out = String::new();
    for element in node.children_with_tokens() {
        render_element(element, style, &mut out)?;
    }
    Ok(out)
}

fn render_element(
    element: SyntaxElement,
    style: &InlineStyle,
    out: &mut String,
) -> Result<(), RenderError> {
    match element {
        NodeOrToken::Token(token) => {
            render_token(&token, style, out);
            Ok(())
        }
        NodeOrToken::Node(node) => render_node(&node, style, out),
    }
}

fn render_token(token: &SyntaxToken, style: &InlineStyle, out: &mut String) {
    match token.kind() {
        SyntaxKind::TEXT | SyntaxKind::ESCAPED_CHAR | SyntaxKind::RAW_HTML => {
            out.push_str(token.text())
        }
        SyntaxKind::SOFT_LINE_BREAK => match style.soft_break {
            _ if style.single_line => out.push(' '),
            SoftBreakStyle::Space => out.push(' '),
            SoftBreakStyle::Newline => out.push('\n'),
        },
        SyntaxKind::HARD_LINE_BREAK => match style.hard_break {
            _ if style.single_line => out.push(' '),
            HardBreakStyle::Backslash => out.push_str("\\\n"),
            HardBreakStyle::Spaces => out.push_str("  \n"),
        },
        // Trivia: prefixes, indentation, the final line ending.
        _ => {}
    }
}

fn render_node(node: &SyntaxNode, style: &InlineStyle, out: &mut String) -> Result<(), RenderError> {
    let kind = NodeKind::from(node.kind());
    if enter(kind, node, style, out)? == Walk::Continue {
        for element in node.children_with_tokens() {
            render_element(element, style, out)?;
        }
    }
    leave(kind, node, out)
}

fn enter(
    kind: NodeKind,
    node: &SyntaxNode,
    style: &InlineStyle,
    out: &mut String,
) -> Result<Walk, RenderError> {
    match kind {
        NodeKind::Emphasis => {
            out.push_str(&emphasis_marker(node)?);
            Ok(Walk::Continue)
        }
        NodeKind::Link => {
            let link = Link::cast(node.clone()).ok_or_else(|| malformed(node))?;
            out.push('[');
            push_link_tail(link.text(), &link.destination(), link.title(), style, out)?;
            Ok(Walk::SkipChildren)
        }
        NodeKind::Image => {
            let image = Image::cast(node.clone()).ok_or_else(|| malformed(node))?;
            out.push_str("![");
            push_link_tail(image.text(), &image.destination(), image.title(), style, out)?;
            Ok(Walk::SkipChildren)
        }
        NodeKind::AutoLink => {
            let autolink = AutoLink::cast(node.clone()).ok_or_else(|| malformed(node))?;
            out.push('<');
            out.push_str(&autolink.url());
            out.push('>');
            Ok(Walk::SkipChildren)
        }
        NodeKind::CodeSpan => {
            let span = CodeSpan::cast(node.clone()).ok_or_else(|| malformed(node))?;
            push_code_span(&span, out);
            Ok(Walk::SkipChildren)
        }
        NodeKind::LinkText | NodeKind::HeadingContent => Ok(Walk::Continue),
        NodeKind::Document
        | NodeKind::Blockquote
        | NodeKind::List
        | NodeKind::ListItem
        | NodeKind::Paragraph
        | NodeKind::Heading
        | NodeKind::CodeBlock
        | NodeKind::FencedCodeBlock
        | NodeKind::CodeFence
        | NodeKind::HtmlBlock
        | NodeKind::ThematicBreak
        | NodeKind::Token(_) => Err(RenderError::malformed(
            node.kind(),
            "block node inside inline content",
        )),
    }
}

fn leave(kind: NodeKind, node: &SyntaxNode, out: &mut String) -> Result<(), RenderError> {
    if kind == NodeKind::Emphasis {
        out.push_str(&emphasis_marker(node)?);
    }
    Ok(())
}

fn malformed(node: &SyntaxNode) -> RenderError {
    RenderError::malformed(node.kind(), "unexpected node shape")
}

/// The canonical marker of an emphasis node: `*` or `**`.
///
/// A node switches to `_` when a `*` would merge with a neighbouring star:
/// the marker of a level-1 parent it touches, a sibling emphasis written
/// with `*`, or a literal `*` in adjacent text. `*_a_*` and `*a*_b_` stay
/// as they are instead of collapsing.
fn emphasis_marker(node: &SyntaxNode) -> Result<String, RenderError> {
    let emphasis = Emphasis::cast(node.clone()).ok_or_else(|| malformed(node))?;
    if !node
        .children_with_tokens()
        .any(|e| e.kind() == SyntaxKind::EMPHASIS_MARKER)
    {
        return Err(RenderError::malformed(
            node.kind(),
            "emphasis without delimiters",
        ));
    }
    let level = emphasis.level().min(2);
    Ok(marker_char(node).to_string().repeat(level))
}

fn marker_char(node: &SyntaxNode) -> char {
    if let Some(parent) = node.parent().and_then(Emphasis::cast) {
        let touches_marker = [node.prev_sibling_or_token(), node.next_sibling_or_token()]
            .into_iter()
            .flatten()
            .any(|e| e.kind() == SyntaxKind::EMPHASIS_MARKER);
        if touches_marker && parent.level() == 1 {
            return match marker_char(parent.syntax()) {
                '*' => '_',
                _ => '*',
            };
        }
    }

    if touches_star(node) && underscore_flanks(node) {
        '_'
    } else {
        '*'
    }
}

/// A star written right before or after `node` would join its marker run.
fn touches_star(node: &SyntaxNode) -> bool {
    let before = match node.prev_sibling_or_token() {
        Some(NodeOrToken::Node(prev)) if prev.kind() == SyntaxKind::EMPHASIS => {
            marker_char(&prev) == '*'
        }
        Some(NodeOrToken::Token(prev)) => {
            prev.kind() == SyntaxKind::TEXT && prev.text().ends_with('*')
        }
        _ => false,
    };
    let after = match node.next_sibling_or_token() {
        Some(NodeOrToken::Token(next)) => {
            next.kind() == SyntaxKind::TEXT && next.text().starts_with('*')
        }
        _ => false,
    };
    before || after
}

/// `_` only opens after and closes before a non-alphanumeric character.
fn underscore_flanks(node: &SyntaxNode) -> bool {
    let before = match node.prev_sibling_or_token() {
        Some(NodeOrToken::Token(prev)) => prev.text().chars().next_back(),
        _ => None,
    };
    let after = match node.next_sibling_or_token() {
        Some(NodeOrToken::Token(next)) => next.text().chars().next(),
        _ => None,
    };
    ![before, after].into_iter().flatten().any(char::is_alphanumeric)
}

/// Writes `text](dest "title")` after the opening bracket.
fn push_link_tail(
    text: Option<LinkText>,
    destination: &str,
    title: Option<String>,
    style: &InlineStyle,
    out: &mut String,
) -> Result<(), RenderError> {
    if let Some(text) = text {
        out.push_str(&render_inlines(text.syntax(), style)?);
    }
    out.push_str("](");
    match (destination.is_empty(), &title) {
        (true, Some(_)) => out.push_str("<>"),
        _ => out.push_str(destination),
    }
    if let Some(title) = title {
        out.push_str(" \"");
        out.push_str(&quote_title(&title));
        out.push('"');
    }
    out.push(')');
    Ok(())
}

/// Escapes the unescaped double quotes of a title body.
fn quote_title(title: &str) -> String {
    let mut quoted = String::with_capacity(title.len());
    let mut chars = title.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                quoted.push('\\');
                if let Some(next) = chars.next() {
                    quoted.push(next);
                }
            }
            '"' => quoted.push_str("\\\""),
            c => quoted.push(c),
        }
    }
    quoted
}

fn push_code_span(span: &CodeSpan, out: &mut String) {
    let ticks = "`".repeat(span.ticks());
    let content = span.content();
    let pad = content.starts_with('`')
        || content.ends_with('`')
        || (content.starts_with(' ')
            && content.ends_with(' ')
            && !content.chars().all(|c| c == ' '));

    out.push_str(&ticks);
    if pad {
        out.push(' ');
    }
    out.push_str(&content);
    if pad {
        out.push(' ');
    }
    out.push_str(&ticks);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;

    fn paragraph_text(input: &str) -> String {
        let tree = parse(input, None);
        let paragraph = tree
            .descendants()
            .find(|n| n.kind() == SyntaxKind::PARAGRAPH)
            .unwrap();
        render_inlines(&paragraph, &InlineStyle::paragraph(&RenderOptions::default())).unwrap()
    }

    #[test]
    fn links_with_and_without_title() {
        assert_eq!(paragraph_text("[x](http://a)\n"), "[x](http://a)");
        assert_eq!(paragraph_text("[x](http://a 't')\n"), "[x](http://a \"t\")");
        assert_eq!(
            paragraph_text("[x](http://a (say \"hi\"))\n"),
            "[x](http://a \"say \\\"hi\\\"\")"
        );
    }

    #[test]
    fn underscores_become_stars() {
        assert_eq!(paragraph_text("_a_ __b__\n"), "*a* **b**");
    }

    #[test]
    fn nested_emphasis_keeps_levels() {
        assert_eq!(paragraph_text("***w***\n"), "***w***");
        assert_eq!(paragraph_text("*_a_*\n"), "*_a_*");
    }

    #[test]
    fn adjacent_spans_stay_apart() {
        assert_eq!(paragraph_text("*a*_b_\n"), "*a*_b_");
        assert_eq!(paragraph_text("_a_*b*\n"), "*a*_b_");
        assert_eq!(paragraph_text("**a**__b__\n"), "**a**__b__");
        assert_eq!(paragraph_text("*a*_b_*c*\n"), "*a*_b_*c*");
    }

    #[test]
    fn literal_star_next_to_emphasis() {
        assert_eq!(paragraph_text("*_a_\n"), "*_a_");
        assert_eq!(paragraph_text("**a*\n"), "*_a_");
    }

    #[test]
    fn breaks() {
        assert_eq!(paragraph_text("a\nb  \nc\n"), "a b\\\nc");
    }

    #[test]
    fn code_span_padding() {
        assert_eq!(paragraph_text("`` `a` ``\n"), "`` `a` ``");
        assert_eq!(paragraph_text("` b `\n"), "`b`");
        assert_eq!(paragraph_text("`a\nb`\n"), "`a b`");
    }

    #[test]
    fn quote_title_escapes_once() {
        assert_eq!(quote_title(r#"a "b" \" c"#), r#"a \"b\" \" c"#);
    }
}
