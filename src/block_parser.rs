//! Line-oriented block parser.
//!
//! Each input line first walks the stack of open blocks, letting every block
//! decide whether it continues (consuming its prefix from the line). The
//! remainder may then open new blocks through the registered [`BlockRule`]s.
//! Blocks that did not continue are closed deepest-first and converted into
//! green nodes. Every byte of the input ends up in exactly one token.

use rowan::{GreenNode, GreenToken, NodeOrToken};

use crate::config::{Config, ParagraphMode};
use crate::syntax::{ListMarker, SyntaxKind, SyntaxNode};

mod blockquotes;
mod code_blocks;
mod headings;
mod html_blocks;
mod indented_code;
pub(crate) mod line;
mod lists;
mod paragraphs;
mod raw_paragraphs;
mod thematic_breaks;
mod utils;

use line::{Line, Piece, SourceLine};

pub(crate) type GreenElement = NodeOrToken<GreenNode, GreenToken>;

/// What an open block wants after seeing a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum State {
    /// The block ends before this line.
    Close,
    /// A leaf block that keeps the line.
    Continue,
    /// A container that keeps the line and lets its children look at the rest.
    ContinueWithChildren,
}

/// Per-kind state carried by an open block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BlockData {
    None,
    List {
        marker: ListMarker,
        item_offset: usize,
    },
    ListItem {
        offset: usize,
        started_blank: bool,
    },
    Fence {
        ch: u8,
        len: usize,
        indent: usize,
        closed: bool,
    },
    Html(html_blocks::HtmlBlockType),
}

/// A block under construction.
///
/// Containers accumulate finished children (nodes and prefix tokens); leaves
/// accumulate the lines they own and build their node on close.
#[derive(Debug)]
pub(crate) struct Block<'a> {
    pub(crate) kind: SyntaxKind,
    pub(crate) children: Vec<GreenElement>,
    pub(crate) lines: Vec<SourceLine<'a>>,
    pub(crate) data: BlockData,
    pub(crate) has_child_blocks: bool,
}

impl<'a> Block<'a> {
    pub(crate) fn new(kind: SyntaxKind) -> Self {
        Self::with_data(kind, BlockData::None)
    }

    pub(crate) fn with_data(kind: SyntaxKind, data: BlockData) -> Self {
        Self {
            kind,
            children: Vec::new(),
            lines: Vec::new(),
            data,
            has_child_blocks: false,
        }
    }

    /// A leaf that starts with the given line.
    pub(crate) fn leaf(kind: SyntaxKind, data: BlockData, line: SourceLine<'a>) -> Self {
        let mut block = Self::with_data(kind, data);
        block.lines.push(line);
        block
    }

    pub(crate) fn push_tokens(&mut self, pieces: impl IntoIterator<Item = Piece<'a>>) {
        self.children.extend(
            pieces
                .into_iter()
                .filter(|(_, text)| !text.is_empty())
                .map(|(kind, text)| NodeOrToken::Token(GreenToken::new(kind.into(), text))),
        );
    }

    pub(crate) fn push_node(&mut self, node: GreenNode) {
        self.children.push(NodeOrToken::Node(node));
    }

    /// Builds a container node from the accumulated children.
    pub(crate) fn into_container(self) -> GreenNode {
        GreenNode::new(self.kind.into(), self.children)
    }
}

/// Extra context handed to [`BlockRule::open`].
pub(crate) struct OpenContext<'p, 'a> {
    /// The open paragraph this line may interrupt or turn into a heading.
    pub(crate) paragraph: Option<&'p mut Block<'a>>,
    pub(crate) interrupting: bool,
}

/// One kind of block: how it opens, continues and closes.
pub(crate) trait BlockRule {
    fn name(&self) -> &'static str;

    /// Bytes that may start this block (after indentation). `None` means
    /// any line is a candidate.
    fn trigger(&self) -> Option<&'static [u8]> {
        None
    }

    /// Tries to open a block on `line` under `parent`. Must leave the line
    /// untouched when returning `None`.
    ///
    /// Containers consume their own prefix and return
    /// [`State::ContinueWithChildren`]; leaves take the line and return
    /// [`State::Continue`], or [`State::Close`] for single-line blocks.
    fn open<'a>(
        &self,
        parent: &mut Block<'a>,
        line: &mut Line<'a>,
        ctx: &mut OpenContext<'_, 'a>,
    ) -> Option<(Block<'a>, State)>;

    /// `child` is the open block directly below this one, if any.
    fn continue_block<'a>(
        &self,
        block: &mut Block<'a>,
        child: Option<&Block<'a>>,
        line: &mut Line<'a>,
    ) -> State;

    /// Adds a continuation line to a leaf. Returns true when the line
    /// finished the block.
    fn add_line<'a>(&self, block: &mut Block<'a>, line: &mut Line<'a>) -> bool {
        block.lines.push(line.take_source());
        false
    }

    /// Converts the finished block into a node; `None` drops it.
    fn close(&self, block: Block<'_>) -> Option<GreenNode> {
        Some(block.into_container())
    }

    fn can_interrupt_paragraph(&self) -> bool {
        false
    }

    fn can_accept_indented_line(&self) -> bool {
        false
    }

    /// Leaves that new blocks may interrupt and that accept lazy
    /// continuation lines (paragraphs).
    fn is_interruptible(&self) -> bool {
        false
    }

    /// Blocks that only open directly inside a list.
    fn only_in_list(&self) -> bool {
        false
    }
}

/// Rules in priority order for the given paragraph mode.
pub(crate) fn block_rules(mode: ParagraphMode) -> Vec<Box<dyn BlockRule>> {
    match mode {
        ParagraphMode::Standard => vec![
            Box::new(headings::SetextHeadingRule),
            Box::new(thematic_breaks::ThematicBreakRule),
            Box::new(lists::ListRule),
            Box::new(lists::ListItemRule),
            Box::new(blockquotes::BlockquoteRule),
            Box::new(headings::AtxHeadingRule),
            Box::new(code_blocks::FencedCodeRule),
            Box::new(html_blocks::HtmlBlockRule),
            Box::new(indented_code::IndentedCodeRule),
            Box::new(paragraphs::ParagraphRule),
        ],
        ParagraphMode::Raw => vec![Box::new(raw_paragraphs::RawParagraphRule)],
    }
}

struct OpenBlock<'a> {
    /// Index into the rule list; `None` for the document.
    rule: Option<usize>,
    block: Block<'a>,
}

pub struct BlockParser<'a> {
    input: &'a str,
    rules: Vec<Box<dyn BlockRule>>,
    stack: Vec<OpenBlock<'a>>,
}

impl<'a> BlockParser<'a> {
    pub fn new(input: &'a str, config: &Config) -> Self {
        Self {
            input,
            rules: block_rules(config.paragraphs),
            stack: vec![OpenBlock {
                rule: None,
                block: Block::new(SyntaxKind::DOCUMENT),
            }],
        }
    }

    pub fn parse(mut self) -> SyntaxNode {
        log::debug!("Starting block parse ({} rules)", self.rules.len());

        let input = self.input;
        for (idx, raw) in input.split_inclusive('\n').enumerate() {
            log::trace!("Line {}: {:?}", idx + 1, raw);
            self.process_line(raw);
        }

        self.close_above(0);
        let document = match self.stack.pop() {
            Some(open) => open.block.into_container(),
            None => Block::new(SyntaxKind::DOCUMENT).into_container(),
        };
        SyntaxNode::new_root(document)
    }

    fn process_line(&mut self, raw: &'a str) {
        let mut line = Line::new(raw);

        // Let open blocks claim their prefix.
        let mut matched = 0;
        let mut leaf_continues = false;
        for idx in 1..self.stack.len() {
            let Some(rule) = self.stack[idx].rule else {
                break;
            };
            let (head, tail) = self.stack.split_at_mut(idx + 1);
            let child = tail.first().map(|open| &open.block);
            match self.rules[rule].continue_block(&mut head[idx].block, child, &mut line) {
                State::ContinueWithChildren => matched = idx,
                State::Continue => {
                    matched = idx;
                    leaf_continues = true;
                    break;
                }
                State::Close => break,
            }
        }

        if leaf_continues
            && let Some(rule) = self.stack[matched].rule
            && !self.rules[rule].is_interruptible()
        {
            // Code and HTML blocks own the line outright.
            if self.rules[rule].add_line(&mut self.stack[matched].block, &mut line) {
                self.close_above(matched - 1);
            }
            return;
        }

        let paragraph_tip = leaf_continues;
        let tip = self.stack.len() - 1;
        let lazy_candidate = !paragraph_tip && matched < tip && self.is_paragraph(tip);

        let mut parent = if paragraph_tip { matched - 1 } else { matched };
        let mut opened = false;

        while !line.is_blank() {
            let mark = line.prefix.len();
            let interrupting = paragraph_tip && !opened;
            let lazy = lazy_candidate && !opened;
            let Some((rule, block, state)) = self.try_open(parent, &mut line, interrupting, lazy)
            else {
                break;
            };

            if !opened {
                self.close_above(parent);
                opened = true;
            }

            log::debug!("Opened {:?} via {}", block.kind, self.rules[rule].name());
            self.stack[parent].block.has_child_blocks = true;

            // Prefix tokens consumed before this rule belong to the parent.
            let mut block = block;
            if state == State::ContinueWithChildren {
                let before: Vec<Piece<'a>> = line.prefix.drain(..mark).collect();
                self.stack[parent].block.push_tokens(before);
                block.push_tokens(std::mem::take(&mut line.prefix));
            } else if let [first] = block.lines.as_mut_slice() {
                let before: Vec<Piece<'a>> = first.prefix.drain(..mark).collect();
                self.stack[parent].block.push_tokens(before);
            }
            self.stack.push(OpenBlock {
                rule: Some(rule),
                block,
            });

            match state {
                State::ContinueWithChildren => parent = self.stack.len() - 1,
                State::Continue => return,
                State::Close => {
                    self.close_top();
                    return;
                }
            }
        }

        if !opened && (paragraph_tip || lazy_candidate) && !line.is_blank() {
            let target = if paragraph_tip { matched } else { tip };
            if let Some(rule) = self.stack[target].rule {
                log::trace!("Paragraph continuation at depth {}", target);
                self.rules[rule].add_line(&mut self.stack[target].block, &mut line);
                return;
            }
        }

        let target = if opened {
            parent
        } else {
            self.close_above(matched);
            matched
        };

        if line.is_blank() {
            self.push_blank(target, &mut line);
            return;
        }

        // No rule claimed a non-blank line; keep it as text so the tree stays
        // lossless.
        log::warn!("No block rule matched line {:?}", line.rest());
        let newline = line.newline();
        let rest = line.rest();
        let block = &mut self.stack[target].block;
        block.push_tokens(std::mem::take(&mut line.prefix));
        block.push_tokens([(SyntaxKind::TEXT, rest), (SyntaxKind::NEWLINE, newline)]);
    }

    /// Runs the rule list against `line` under `stack[parent]`.
    fn try_open(
        &mut self,
        parent: usize,
        line: &mut Line<'a>,
        interrupting: bool,
        lazy: bool,
    ) -> Option<(usize, Block<'a>, State)> {
        let indented = line.indent() >= 4;
        let first = line.peek_byte();

        // An indented lazy line can only continue the paragraph.
        if lazy && indented {
            return None;
        }

        let candidates: Vec<usize> = (0..self.rules.len())
            .filter(|&idx| {
                let rule = &self.rules[idx];
                if (self.stack[parent].block.kind == SyntaxKind::LIST) != rule.only_in_list() {
                    return false;
                }
                if interrupting && !rule.can_interrupt_paragraph() {
                    return false;
                }
                if lazy && rule.is_interruptible() {
                    return false;
                }
                if let (Some(trigger), Some(first)) = (rule.trigger(), first)
                    && !trigger.contains(&first)
                {
                    return false;
                }
                true
            })
            .collect();

        let gated = candidates
            .iter()
            .copied()
            .filter(|&idx| !indented || self.rules[idx].can_accept_indented_line());

        let (head, tail) = self.stack.split_at_mut(parent + 1);
        let parent_block = &mut head[parent].block;
        let mut ctx = OpenContext {
            paragraph: if interrupting {
                tail.last_mut().map(|open| &mut open.block)
            } else {
                None
            },
            interrupting,
        };

        for idx in gated {
            if let Some((block, state)) = self.rules[idx].open(parent_block, line, &mut ctx) {
                return Some((idx, block, state));
            }
        }

        // An indented line nothing accepts falls back to the catch-all rule.
        if indented && !interrupting && !lazy {
            let fallback = self.rules.len().checked_sub(1)?;
            if candidates.contains(&fallback) {
                return self.rules[fallback]
                    .open(parent_block, line, &mut ctx)
                    .map(|(block, state)| (fallback, block, state));
            }
        }
        None
    }

    fn is_paragraph(&self, idx: usize) -> bool {
        self.stack[idx]
            .rule
            .is_some_and(|rule| self.rules[rule].is_interruptible())
    }

    /// Adds the line's pending prefix and blank remainder to `stack[target]`.
    fn push_blank(&mut self, target: usize, line: &mut Line<'a>) {
        let source = line.take_source();
        let block = &mut self.stack[target].block;
        block.push_tokens(source.prefix);
        let blank = &line_remainder(source.content, source.newline);
        if !blank.is_empty() {
            block
                .children
                .push(NodeOrToken::Token(GreenToken::new(SyntaxKind::BLANK_LINE.into(), blank)));
        }
    }

    /// Closes every open block deeper than `keep`.
    fn close_above(&mut self, keep: usize) {
        while self.stack.len() > keep + 1 {
            self.close_top();
        }
    }

    fn close_top(&mut self) {
        let Some(open) = self.stack.pop() else {
            return;
        };
        let kind = open.block.kind;
        let node = match open.rule {
            Some(rule) => self.rules[rule].close(open.block),
            None => Some(open.block.into_container()),
        };
        match (node, self.stack.last_mut()) {
            (Some(node), Some(parent)) => {
                log::trace!("Closed {:?}", kind);
                parent.block.push_node(node);
            }
            (None, _) => log::trace!("Dropped empty {:?}", kind),
            (Some(_), None) => log::warn!("Closed {:?} without a parent", kind),
        }
    }
}

/// True when `text`, placed at the start of a line, would open a block
/// other than a paragraph.
pub(crate) fn starts_block_construct(text: &str) -> bool {
    let line = Line::new(text);
    line.indent() > 0
        || text.starts_with('>')
        || headings::try_parse_atx_heading(text).is_some()
        || thematic_breaks::is_thematic_break(text)
        || lists::try_parse_list_marker(&line).is_some()
        || code_blocks::try_parse_fence_open(text).is_some()
        || html_blocks::try_parse_html_block_start(text).is_some()
}

fn line_remainder(content: &str, newline: &str) -> String {
    let mut text = String::with_capacity(content.len() + newline.len());
    text.push_str(content);
    text.push_str(newline);
    text
}
