//! HTML block rule.
//!
//! HTML blocks come in seven flavors that differ in how they start and
//! end. Types 1-5 run until a line containing their end marker; types 6 and
//! 7 run until a blank line.

use std::sync::LazyLock;

use regex::Regex;
use rowan::{GreenNode, GreenNodeBuilder};

use crate::syntax::SyntaxKind;

use super::line::{Line, SourceLine};
use super::utils::{emit_prefix, emit_token};
use super::{Block, BlockData, BlockRule, OpenContext, State};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum HtmlBlockType {
    /// `<script>`, `<pre>`, `<style>`, `<textarea>`
    RawText,
    Comment,
    ProcessingInstruction,
    Declaration,
    Cdata,
    /// Known block-level tag names.
    BlockTag,
    /// Any other complete tag alone on its line.
    Tag,
}

impl HtmlBlockType {
    fn ends_at_blank_line(self) -> bool {
        matches!(self, HtmlBlockType::BlockTag | HtmlBlockType::Tag)
    }

    fn is_end_line(self, text: &str) -> bool {
        match self {
            HtmlBlockType::RawText => RAW_TEXT_END_RE.is_match(text),
            HtmlBlockType::Comment => text.contains("-->"),
            HtmlBlockType::ProcessingInstruction => text.contains("?>"),
            HtmlBlockType::Declaration => text.contains('>'),
            HtmlBlockType::Cdata => text.contains("]]>"),
            HtmlBlockType::BlockTag | HtmlBlockType::Tag => false,
        }
    }
}

static RAW_TEXT_START_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^<(?:script|pre|style|textarea)(?:\s|>|$)").unwrap()
});

static RAW_TEXT_END_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)</(?:script|pre|style|textarea)>").unwrap());

static BLOCK_TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?i)^</?(?:address|article|aside|base|basefont|blockquote|body|caption|center|col|",
        r"colgroup|dd|details|dialog|dir|div|dl|dt|fieldset|figcaption|figure|footer|form|",
        r"frame|frameset|h1|h2|h3|h4|h5|h6|head|header|hr|html|iframe|legend|li|link|main|",
        r"menu|menuitem|nav|noframes|ol|optgroup|option|p|param|search|section|summary|",
        r"table|tbody|td|tfoot|th|thead|title|tr|track|ul)(?:\s|/?>|$)",
    ))
    .unwrap()
});

static COMPLETE_TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r#"^(?:<[A-Za-z][A-Za-z0-9-]*(?:\s+[A-Za-z_:][A-Za-z0-9_.:-]*"#,
        r#"(?:\s*=\s*(?:[^\s"'=<>`]+|'[^']*'|"[^"]*"))?)*\s*/?>"#,
        r#"|</[A-Za-z][A-Za-z0-9-]*\s*>)\s*$"#,
    ))
    .unwrap()
});

/// Detects which kind of HTML block `text` (after indentation) starts.
pub(crate) fn try_parse_html_block_start(text: &str) -> Option<HtmlBlockType> {
    if !text.starts_with('<') {
        return None;
    }

    if RAW_TEXT_START_RE.is_match(text) {
        Some(HtmlBlockType::RawText)
    } else if text.starts_with("<!--") {
        Some(HtmlBlockType::Comment)
    } else if text.starts_with("<?") {
        Some(HtmlBlockType::ProcessingInstruction)
    } else if text.starts_with("<![CDATA[") {
        Some(HtmlBlockType::Cdata)
    } else if text
        .strip_prefix("<!")
        .is_some_and(|rest| rest.starts_with(|c: char| c.is_ascii_alphabetic()))
    {
        Some(HtmlBlockType::Declaration)
    } else if BLOCK_TAG_RE.is_match(text) {
        Some(HtmlBlockType::BlockTag)
    } else if COMPLETE_TAG_RE.is_match(text) && !RAW_TEXT_START_RE.is_match(text) {
        Some(HtmlBlockType::Tag)
    } else {
        None
    }
}

pub(crate) fn emit_html_block(builder: &mut GreenNodeBuilder<'static>, lines: &[SourceLine<'_>]) {
    builder.start_node(SyntaxKind::HTML_BLOCK.into());
    for line in lines {
        emit_prefix(builder, &line.prefix);
        emit_token(builder, SyntaxKind::HTML_CONTENT, line.content);
        emit_token(builder, SyntaxKind::NEWLINE, line.newline);
    }
    builder.finish_node(); // HTML_BLOCK
}

pub(crate) struct HtmlBlockRule;

impl BlockRule for HtmlBlockRule {
    fn name(&self) -> &'static str {
        "html-block"
    }

    fn trigger(&self) -> Option<&'static [u8]> {
        Some(b"<")
    }

    fn open<'a>(
        &self,
        _parent: &mut Block<'a>,
        line: &mut Line<'a>,
        ctx: &mut OpenContext<'_, 'a>,
    ) -> Option<(Block<'a>, State)> {
        if line.indent() >= 4 {
            return None;
        }
        let kind = try_parse_html_block_start(line.after_indent())?;
        if kind == HtmlBlockType::Tag && ctx.interrupting {
            return None;
        }

        let ends_here = kind.is_end_line(line.rest());
        let block = Block::leaf(
            SyntaxKind::HTML_BLOCK,
            BlockData::Html(kind),
            line.take_source(),
        );
        let state = if ends_here {
            State::Close
        } else {
            State::Continue
        };
        Some((block, state))
    }

    fn continue_block<'a>(
        &self,
        block: &mut Block<'a>,
        _child: Option<&Block<'a>>,
        line: &mut Line<'a>,
    ) -> State {
        match block.data {
            BlockData::Html(kind) if kind.ends_at_blank_line() && line.is_blank() => State::Close,
            _ => State::Continue,
        }
    }

    fn add_line<'a>(&self, block: &mut Block<'a>, line: &mut Line<'a>) -> bool {
        let finished = match block.data {
            BlockData::Html(kind) => kind.is_end_line(line.rest()),
            _ => false,
        };
        block.lines.push(line.take_source());
        finished
    }

    fn close(&self, block: Block<'_>) -> Option<GreenNode> {
        let mut builder = GreenNodeBuilder::new();
        emit_html_block(&mut builder, &block.lines);
        Some(builder.finish())
    }

    fn can_interrupt_paragraph(&self) -> bool {
        true
    }
}
