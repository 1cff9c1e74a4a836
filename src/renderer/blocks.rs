//! Block-level dispatch and rendering.

use unicode_width::UnicodeWidthStr;

use crate::block_parser::starts_block_construct;
use crate::syntax::{
    AstNode, CodeBlock, FencedCodeBlock, Heading, HtmlBlock, List, SyntaxKind, SyntaxNode,
};

use super::context::ListFrame;
use super::dispatch::NodeKind;
use super::error::RenderError;
use super::inline::{InlineStyle, render_inlines};
use super::{RenderSink, Renderer};

impl<S: RenderSink> Renderer<'_, S> {
    /// The single dispatch site for block nodes.
    pub(super) fn visit(&mut self, node: &SyntaxNode) -> Result<(), RenderError> {
        match NodeKind::from(node.kind()) {
            NodeKind::Document => self.blocks(node, false),
            NodeKind::Blockquote => self.blockquote(node),
            NodeKind::List => self.list(node),
            NodeKind::ListItem => self.list_item(node),
            NodeKind::Paragraph => self.paragraph(node),
            NodeKind::Heading => self.heading(node),
            NodeKind::CodeBlock => {
                let block = CodeBlock::cast(node.clone()).ok_or_else(|| shape(node))?;
                self.code_block(&block.lines(), None)
            }
            NodeKind::FencedCodeBlock => {
                let block = FencedCodeBlock::cast(node.clone()).ok_or_else(|| shape(node))?;
                self.code_block(&block.lines(), block.language().as_deref())
            }
            NodeKind::HtmlBlock => {
                let block = HtmlBlock::cast(node.clone()).ok_or_else(|| shape(node))?;
                for line in block.lines() {
                    self.line(strip_line_ending(&line))?;
                }
                Ok(())
            }
            NodeKind::ThematicBreak => {
                let rule = node
                    .children_with_tokens()
                    .filter_map(|e| e.into_token())
                    .find(|t| t.kind() == SyntaxKind::HORIZONTAL_RULE)
                    .ok_or_else(|| RenderError::malformed(node.kind(), "missing rule"))?;
                self.line(rule.text())
            }
            NodeKind::HeadingContent
            | NodeKind::CodeFence
            | NodeKind::Emphasis
            | NodeKind::Link
            | NodeKind::Image
            | NodeKind::LinkText
            | NodeKind::AutoLink
            | NodeKind::CodeSpan
            | NodeKind::Token(_) => Err(RenderError::malformed(
                node.kind(),
                "not a block in block position",
            )),
        }
    }

    /// Renders the block children of `node`. Siblings are separated by one
    /// blank line unless `tight`.
    fn blocks(&mut self, node: &SyntaxNode, tight: bool) -> Result<(), RenderError> {
        for child in node.children() {
            self.visit(&child)?;
            if child.next_sibling().is_some() && !tight && !self.ended_with_blank {
                self.blank_line()?;
            }
        }
        Ok(())
    }

    fn blockquote(&mut self, node: &SyntaxNode) -> Result<(), RenderError> {
        self.context.blockquote_depth += 1;
        let result = if node.children().next().is_none() {
            self.line("")
        } else {
            self.blocks(node, false)
        };
        // In a tight item a following paragraph would continue the quote
        // lazily; an empty quote line closes it.
        let result = result.and_then(|()| {
            if self.in_tight_item(node) && next_is(node, SyntaxKind::PARAGRAPH) {
                self.blank_line()
            } else {
                Ok(())
            }
        });
        self.context.blockquote_depth -= 1;
        result
    }

    /// True when `node` sits directly in an item of a tight list.
    fn in_tight_item(&self, node: &SyntaxNode) -> bool {
        node.parent()
            .is_some_and(|parent| parent.kind() == SyntaxKind::LIST_ITEM)
            && self.context.list_stack.last().is_some_and(|frame| frame.is_tight)
    }

    fn list(&mut self, node: &SyntaxNode) -> Result<(), RenderError> {
        let list = List::cast(node.clone()).ok_or_else(|| shape(node))?;
        let marker = list
            .marker()
            .ok_or_else(|| RenderError::malformed(node.kind(), "list without item marker"))?;
        let tight = list.is_tight();
        log::trace!(
            "List {:?} from {} (tight: {})",
            list.delimiter(),
            list.start(),
            tight
        );

        self.context.list_stack.push(ListFrame::new(
            marker,
            list.start(),
            self.context.blockquote_depth,
            tight,
        ));
        let result = self.blocks(node, tight);
        self.context.list_stack.pop();
        result
    }

    fn list_item(&mut self, node: &SyntaxNode) -> Result<(), RenderError> {
        let tight = match self.context.current_list() {
            Some(frame) => {
                frame.start_item();
                frame.is_tight
            }
            None => return Err(RenderError::malformed(node.kind(), "item outside a list")),
        };

        let mut result = self.blocks(node, tight);
        let pending = self
            .context
            .current_list()
            .is_some_and(|frame| frame.marker_pending);
        if result.is_ok() && pending {
            // Empty item: the marker alone.
            result = self.line("");
        }
        if let Some(frame) = self.context.current_list() {
            frame.finish_item();
        }
        result
    }

    fn paragraph(&mut self, node: &SyntaxNode) -> Result<(), RenderError> {
        let text = render_inlines(node, &InlineStyle::paragraph(&self.options))?;
        for line in text.split('\n') {
            self.line(line.strip_suffix('\r').unwrap_or(line))?;
        }
        Ok(())
    }

    fn heading(&mut self, node: &SyntaxNode) -> Result<(), RenderError> {
        let heading = Heading::cast(node.clone()).ok_or_else(|| shape(node))?;
        let level = heading.level();
        if !(1..=6).contains(&level) {
            return Err(RenderError::malformed(node.kind(), "level out of range"));
        }

        let text = match heading.content() {
            Some(content) => render_inlines(content.syntax(), &InlineStyle::single_line())?,
            None => String::new(),
        };
        let text = text.trim();
        log::trace!("Heading level {} (atx: {})", level, heading.is_atx());

        // Without a separating blank line, setext text would join a
        // preceding paragraph in a tight item.
        let setext = level <= 2
            && !text.is_empty()
            && !starts_block_construct(text)
            && !self.in_tight_item(node);
        if setext {
            let underline = if level == 1 { "=" } else { "-" };
            self.line(text)?;
            self.line(&underline.repeat(text.width().max(1)))?;
        } else if text.is_empty() {
            self.line(&"#".repeat(level))?;
        } else {
            self.line(&format!("{} {}", "#".repeat(level), text))?;
        }

        // Top-level headings are always followed by a blank line.
        if self.context.is_top_level() && node.next_sibling().is_none() {
            self.blank_line()?;
        }
        Ok(())
    }

    /// Code blocks of either kind are written fenced.
    fn code_block(&mut self, lines: &[String], language: Option<&str>) -> Result<(), RenderError> {
        let fence = choose_fence(lines, language);
        match language {
            Some(language) => self.line(&format!("{fence}{language}"))?,
            None => self.line(&fence)?,
        }
        for line in lines {
            self.line(strip_line_ending(line))?;
        }
        self.line(&fence)
    }
}

fn shape(node: &SyntaxNode) -> RenderError {
    RenderError::malformed(node.kind(), "unexpected node shape")
}

fn next_is(node: &SyntaxNode, kind: SyntaxKind) -> bool {
    node.next_sibling().is_some_and(|next| next.kind() == kind)
}

fn strip_line_ending(line: &str) -> &str {
    line.trim_end_matches(['\n', '\r'])
}

fn longest_run(lines: &[String], ch: char) -> usize {
    lines
        .iter()
        .flat_map(|line| line.split(|c| c != ch))
        .map(str::len)
        .max()
        .unwrap_or(0)
}

/// Backticks, one more than the longest backtick run in the content and at
/// least three. Tildes when the language itself contains a backtick.
fn choose_fence(lines: &[String], language: Option<&str>) -> String {
    let ch = if language.is_some_and(|l| l.contains('`')) {
        '~'
    } else {
        '`'
    };
    let len = (longest_run(lines, ch) + 1).max(3);
    ch.to_string().repeat(len)
}
