//! Inline pass over the block tree.
//!
//! The text of every `PARAGRAPH` and `HEADING_CONTENT` is parsed as a single
//! string (inner line endings included), so that emphasis, code spans and
//! links may cross soft line breaks. Tokens that are not part of the inline
//! text (container prefixes, indentation, the final line ending) are kept
//! aside as trivia and woven back in at their original offsets.

use rowan::{GreenNode, GreenNodeBuilder, NodeOrToken};

use crate::config::{Config, ParagraphMode};
use crate::syntax::{SyntaxKind, SyntaxNode, SyntaxToken};

mod code_spans;
mod emphasis;
mod escapes;
mod links;
mod raw_html;

use code_spans::try_parse_code_span;
use emphasis::{DelimiterRun, analyze_delimiter_run, resolve_emphasis};
use escapes::{EscapeType, try_parse_escape};
use links::{LinkParts, try_parse_autolink, try_parse_inline_link};
use raw_html::try_parse_raw_html;

/// A parsed inline element, addressed by byte range into the joined text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Inline {
    Token {
        kind: SyntaxKind,
        start: usize,
        end: usize,
    },
    Node {
        kind: SyntaxKind,
        start: usize,
        end: usize,
        children: Vec<Inline>,
    },
    /// Unresolved `*`/`_` run; never survives [`resolve_emphasis`].
    Delimiter(DelimiterRun),
}

impl Inline {
    pub(crate) fn token(kind: SyntaxKind, start: usize, end: usize) -> Self {
        Inline::Token { kind, start, end }
    }

    pub(crate) fn start(&self) -> usize {
        match self {
            Inline::Token { start, .. } | Inline::Node { start, .. } => *start,
            Inline::Delimiter(run) => run.start,
        }
    }

    pub(crate) fn end(&self) -> usize {
        match self {
            Inline::Token { end, .. } | Inline::Node { end, .. } => *end,
            Inline::Delimiter(run) => run.end,
        }
    }
}

/// Rebuilds a block tree with inline structure inside paragraphs and heading
/// content.
pub struct InlineParser {
    root: SyntaxNode,
    enabled: bool,
}

impl InlineParser {
    pub fn new(root: SyntaxNode, config: &Config) -> Self {
        Self {
            root,
            enabled: config.paragraphs == ParagraphMode::Standard,
        }
    }

    pub fn parse(self) -> SyntaxNode {
        if !self.enabled {
            log::debug!("Raw paragraphs: skipping inline pass");
            return self.root;
        }
        SyntaxNode::new_root(rebuild(&self.root))
    }
}

fn rebuild(node: &SyntaxNode) -> GreenNode {
    match node.kind() {
        SyntaxKind::PARAGRAPH | SyntaxKind::HEADING_CONTENT => parse_inline_node(node),
        kind => {
            let children: Vec<_> = node
                .children_with_tokens()
                .map(|child| match child {
                    NodeOrToken::Node(n) => NodeOrToken::Node(rebuild(&n)),
                    NodeOrToken::Token(t) => NodeOrToken::Token(t.green().to_owned()),
                })
                .collect();
            GreenNode::new(kind.into(), children)
        }
    }
}

/// A token kept out of the inline text, re-emitted at `offset`.
struct Trivia<'t> {
    offset: usize,
    kind: SyntaxKind,
    text: &'t str,
}

fn parse_inline_node(node: &SyntaxNode) -> GreenNode {
    let tokens: Vec<SyntaxToken> = node
        .children_with_tokens()
        .filter_map(|element| element.into_token())
        .collect();
    let last_text = tokens.iter().rposition(|t| t.kind() == SyntaxKind::TEXT);

    let mut text = String::new();
    let mut trivia = Vec::new();
    for (idx, token) in tokens.iter().enumerate() {
        let inline = match token.kind() {
            SyntaxKind::TEXT => true,
            SyntaxKind::NEWLINE => last_text.is_some_and(|last| idx < last),
            _ => false,
        };
        if inline {
            text.push_str(token.text());
        } else {
            trivia.push(Trivia {
                offset: text.len(),
                kind: token.kind(),
                text: token.text(),
            });
        }
    }

    log::trace!("Inline parse of {:?} ({} bytes)", node.kind(), text.len());
    let items = parse_inline_text(&text, 0, text.len());

    let mut sink = Sink::new(&text, &trivia);
    sink.builder.start_node(node.kind().into());
    for item in &items {
        sink.emit(item);
    }
    sink.flush(usize::MAX);
    sink.builder.finish_node();
    sink.builder.finish()
}

/// Writes inline elements while splicing trivia back in.
struct Sink<'s, 't> {
    builder: GreenNodeBuilder<'static>,
    text: &'s str,
    trivia: &'s [Trivia<'t>],
    next: usize,
}

impl<'s, 't> Sink<'s, 't> {
    fn new(text: &'s str, trivia: &'s [Trivia<'t>]) -> Self {
        Self {
            builder: GreenNodeBuilder::new(),
            text,
            trivia,
            next: 0,
        }
    }

    /// Emits all trivia at or before `pos`.
    fn flush(&mut self, pos: usize) {
        while let Some(trivia) = self.trivia.get(self.next) {
            if trivia.offset > pos {
                break;
            }
            self.builder.token(trivia.kind.into(), trivia.text);
            self.next += 1;
        }
    }

    fn token(&mut self, kind: SyntaxKind, start: usize, end: usize) {
        self.flush(start);
        let mut cur = start;
        while let Some(trivia) = self.trivia.get(self.next) {
            if trivia.offset >= end {
                break;
            }
            if trivia.offset > cur {
                self.builder
                    .token(kind.into(), &self.text[cur..trivia.offset]);
                cur = trivia.offset;
            }
            self.flush(cur);
        }
        if end > cur {
            self.builder.token(kind.into(), &self.text[cur..end]);
        }
    }

    fn emit(&mut self, item: &Inline) {
        match item {
            Inline::Token { kind, start, end } => self.token(*kind, *start, *end),
            Inline::Node {
                kind,
                start,
                children,
                ..
            } => {
                self.flush(*start);
                self.builder.start_node((*kind).into());
                for child in children {
                    self.emit(child);
                }
                self.builder.finish_node();
            }
            Inline::Delimiter(run) => self.token(SyntaxKind::TEXT, run.start, run.end),
        }
    }
}

/// Parse inline elements of `text[start..end]` into one delimiter scope.
///
/// Positions are absolute offsets into `text` so that flanking checks can
/// look across the scope boundary.
pub(crate) fn parse_inline_text(text: &str, start: usize, end: usize) -> Vec<Inline> {
    let bytes = text.as_bytes();
    let mut items = Vec::new();
    let mut text_start = start;
    let mut pos = start;

    while pos < end {
        let b = bytes[pos];

        // Backslash escapes first, so escaped delimiters stay literal.
        if b == b'\\'
            && let Some((len, escape_type)) = try_parse_escape(&text[pos..end])
        {
            push_text(&mut items, text_start, pos);
            let kind = match escape_type {
                EscapeType::Literal => SyntaxKind::ESCAPED_CHAR,
                EscapeType::HardLineBreak => SyntaxKind::HARD_LINE_BREAK,
            };
            log::trace!("Matched {:?} at {}", kind, pos);
            items.push(Inline::token(kind, pos, pos + len));
            pos += len;
            text_start = pos;
            continue;
        }

        if b == b'`' {
            let run = bytes[pos..end].iter().take_while(|&&c| c == b'`').count();
            if let Some(span) = try_parse_code_span(text, pos, end) {
                push_text(&mut items, text_start, pos);
                log::trace!("Matched code span at {}: {} backticks", pos, run);
                pos = span.end();
                items.push(span);
                text_start = pos;
            } else {
                // An unmatched backtick run is literal text.
                pos += run;
            }
            continue;
        }

        if b == b'<' {
            if let Some(len) = try_parse_autolink(&text[pos..end]) {
                push_text(&mut items, text_start, pos);
                log::trace!("Matched autolink at {}", pos);
                items.push(Inline::Node {
                    kind: SyntaxKind::AUTO_LINK,
                    start: pos,
                    end: pos + len,
                    children: vec![
                        Inline::token(SyntaxKind::AUTO_LINK_MARKER, pos, pos + 1),
                        Inline::token(SyntaxKind::TEXT, pos + 1, pos + len - 1),
                        Inline::token(SyntaxKind::AUTO_LINK_MARKER, pos + len - 1, pos + len),
                    ],
                });
                pos += len;
                text_start = pos;
                continue;
            }
            if let Some(len) = try_parse_raw_html(&text[pos..end]) {
                push_text(&mut items, text_start, pos);
                log::trace!("Matched raw HTML at {}", pos);
                items.push(Inline::token(SyntaxKind::RAW_HTML, pos, pos + len));
                pos += len;
                text_start = pos;
                continue;
            }
        }

        let is_image = b == b'!' && bytes.get(pos + 1) == Some(&b'[');
        if (b == b'[' || is_image)
            && let Some(parts) = try_parse_inline_link(text, pos, end, is_image)
        {
            push_text(&mut items, text_start, pos);
            log::trace!("Matched {} at {}", if is_image { "image" } else { "link" }, pos);
            pos = parts.end;
            items.push(build_link(text, &parts, is_image));
            text_start = pos;
            continue;
        }

        if b == b'*' || b == b'_' {
            let run = bytes[pos..end].iter().take_while(|&&c| c == b).count();
            push_text(&mut items, text_start, pos);
            let (can_open, can_close) = analyze_delimiter_run(text, pos, b as char, run);
            items.push(Inline::Delimiter(DelimiterRun {
                ch: b as char,
                start: pos,
                end: pos + run,
                can_open,
                can_close,
            }));
            pos += run;
            text_start = pos;
            continue;
        }

        if let Some(newline_len) = line_ending_len(&bytes[pos..end]) {
            let ws_start = text[text_start..pos]
                .trim_end_matches([' ', '\t'])
                .len()
                + text_start;
            let trailing_spaces = bytes[ws_start..pos]
                .iter()
                .rev()
                .take_while(|&&c| c == b' ')
                .count();
            push_text(&mut items, text_start, ws_start);
            if trailing_spaces >= 2 {
                items.push(Inline::token(
                    SyntaxKind::HARD_LINE_BREAK,
                    ws_start,
                    pos + newline_len,
                ));
            } else {
                push_token(&mut items, SyntaxKind::WHITESPACE, ws_start, pos);
                items.push(Inline::token(
                    SyntaxKind::SOFT_LINE_BREAK,
                    pos,
                    pos + newline_len,
                ));
            }
            pos += newline_len;
            text_start = pos;
            continue;
        }

        pos += text[pos..].chars().next().map_or(1, char::len_utf8);
    }

    push_text(&mut items, text_start, end);
    resolve_emphasis(items)
}

fn line_ending_len(bytes: &[u8]) -> Option<usize> {
    match bytes {
        [b'\n', ..] => Some(1),
        [b'\r', b'\n', ..] => Some(2),
        _ => None,
    }
}

fn push_token(items: &mut Vec<Inline>, kind: SyntaxKind, start: usize, end: usize) {
    if end > start {
        items.push(Inline::token(kind, start, end));
    }
}

fn push_text(items: &mut Vec<Inline>, start: usize, end: usize) {
    push_token(items, SyntaxKind::TEXT, start, end);
}

fn build_link(text: &str, parts: &LinkParts, is_image: bool) -> Inline {
    let (kind, start_kind, opener_len) = if is_image {
        (SyntaxKind::IMAGE, SyntaxKind::IMAGE_START, 2)
    } else {
        (SyntaxKind::LINK, SyntaxKind::LINK_START, 1)
    };

    let mut children = vec![
        Inline::token(start_kind, parts.start, parts.start + opener_len),
        Inline::Node {
            kind: SyntaxKind::LINK_TEXT,
            start: parts.text_start,
            end: parts.text_end,
            children: parse_inline_text(text, parts.text_start, parts.text_end),
        },
        Inline::token(SyntaxKind::LINK_TEXT_END, parts.text_end, parts.text_end + 1),
        Inline::token(
            SyntaxKind::LINK_DEST_START,
            parts.text_end + 1,
            parts.text_end + 2,
        ),
    ];

    let mut pos = parts.text_end + 2;
    for (kind, range) in [
        (SyntaxKind::LINK_DEST, parts.destination),
        (SyntaxKind::LINK_TITLE, parts.title),
    ] {
        if let Some((start, end)) = range {
            push_token(&mut children, SyntaxKind::WHITESPACE, pos, start);
            children.push(Inline::token(kind, start, end));
            pos = end;
        }
    }
    push_token(&mut children, SyntaxKind::WHITESPACE, pos, parts.end - 1);
    children.push(Inline::token(
        SyntaxKind::LINK_DEST_END,
        parts.end - 1,
        parts.end,
    ));

    Inline::Node {
        kind,
        start: parts.start,
        end: parts.end,
        children,
    }
}

#[cfg(test)]
mod tests;
