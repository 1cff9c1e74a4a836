//! List and list item container rules.
//!
//! A `LIST` opens on the first item marker and stays open while lines are
//! blank, indented into the open item, or start another item with a
//! compatible marker. Items record the column their content starts at;
//! continuation lines must be indented at least that far.

use crate::syntax::{ListMarker, SyntaxKind};

use super::line::{Line, whitespace_columns};
use super::thematic_breaks::is_thematic_break;
use super::{Block, BlockData, BlockRule, OpenContext, State};

/// A marker found at the start of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct MarkerMatch {
    pub(crate) marker: ListMarker,
    /// Marker length in bytes.
    pub(crate) len: usize,
    /// Columns of indentation before the marker.
    pub(crate) indent: usize,
    /// Columns of whitespace after the marker.
    pub(crate) spaces_after: usize,
    /// Nothing but whitespace follows the marker.
    pub(crate) empty: bool,
}

impl MarkerMatch {
    /// Column (relative to the container) where the item content begins.
    pub(crate) fn content_offset(&self) -> usize {
        let padding = if self.empty || self.spaces_after >= 5 {
            1
        } else {
            self.spaces_after
        };
        self.indent + self.len + padding
    }
}

/// Try to parse a list marker, returns `None` if the line does not start an
/// item. Lines indented four or more columns never do.
pub(crate) fn try_parse_list_marker(line: &Line<'_>) -> Option<MarkerMatch> {
    let indent = line.indent();
    if indent >= 4 {
        return None;
    }

    let text = line.after_indent();
    let (marker, len) = ListMarker::parse(text)?;
    let after = &text[len..];
    let marker_end_col = line.content_column() + len;
    let (spaces_after, _) = whitespace_columns(after, marker_end_col);

    Some(MarkerMatch {
        marker,
        len,
        indent,
        spaces_after,
        empty: after.trim_matches([' ', '\t']).is_empty(),
    })
}

pub(crate) struct ListRule;

impl BlockRule for ListRule {
    fn name(&self) -> &'static str {
        "list"
    }

    fn trigger(&self) -> Option<&'static [u8]> {
        Some(b"-+*0123456789")
    }

    fn open<'a>(
        &self,
        _parent: &mut Block<'a>,
        line: &mut Line<'a>,
        ctx: &mut OpenContext<'_, 'a>,
    ) -> Option<(Block<'a>, State)> {
        let found = try_parse_list_marker(line)?;

        if ctx.interrupting {
            // Only non-empty items, and ordered lists starting at 1, may
            // interrupt a paragraph.
            if found.empty {
                return None;
            }
            if let ListMarker::Ordered { number, .. } = found.marker
                && number != 1
            {
                return None;
            }
        }

        let data = BlockData::List {
            marker: found.marker,
            item_offset: found.content_offset(),
        };
        Some((
            Block::with_data(SyntaxKind::LIST, data),
            State::ContinueWithChildren,
        ))
    }

    fn continue_block<'a>(
        &self,
        block: &mut Block<'a>,
        child: Option<&Block<'a>>,
        line: &mut Line<'a>,
    ) -> State {
        let BlockData::List {
            marker,
            item_offset,
        } = block.data
        else {
            return State::Close;
        };

        if line.is_blank() {
            return State::ContinueWithChildren;
        }

        let item_open = child.is_some_and(|c| c.kind == SyntaxKind::LIST_ITEM);
        if item_open && line.indent() >= item_offset {
            return State::ContinueWithChildren;
        }

        if is_thematic_break(line.rest()) {
            return State::Close;
        }

        match try_parse_list_marker(line) {
            Some(found) if found.marker.is_compatible(&marker) => State::ContinueWithChildren,
            _ => State::Close,
        }
    }

    fn can_interrupt_paragraph(&self) -> bool {
        true
    }
}

pub(crate) struct ListItemRule;

impl BlockRule for ListItemRule {
    fn name(&self) -> &'static str {
        "list-item"
    }

    fn trigger(&self) -> Option<&'static [u8]> {
        Some(b"-+*0123456789")
    }

    fn open<'a>(
        &self,
        parent: &mut Block<'a>,
        line: &mut Line<'a>,
        _ctx: &mut OpenContext<'_, 'a>,
    ) -> Option<(Block<'a>, State)> {
        let BlockData::List { marker, .. } = parent.data else {
            return None;
        };
        let found = try_parse_list_marker(line)?;
        if !found.marker.is_compatible(&marker) {
            return None;
        }

        let offset = found.content_offset();
        line.consume_indent();
        line.consume(SyntaxKind::LIST_MARKER, found.len);
        if found.empty {
            line.consume_indent();
        } else if found.spaces_after >= 5 {
            line.consume_columns(1);
        } else {
            line.consume_indent();
        }

        parent.data = BlockData::List {
            marker,
            item_offset: offset,
        };

        let data = BlockData::ListItem {
            offset,
            started_blank: found.empty,
        };
        Some((
            Block::with_data(SyntaxKind::LIST_ITEM, data),
            State::ContinueWithChildren,
        ))
    }

    fn continue_block<'a>(
        &self,
        block: &mut Block<'a>,
        _child: Option<&Block<'a>>,
        line: &mut Line<'a>,
    ) -> State {
        let BlockData::ListItem {
            offset,
            started_blank,
        } = block.data
        else {
            return State::Close;
        };

        if line.is_blank() {
            // An item that starts with a blank line can hold at most one.
            if started_blank && !block.has_child_blocks {
                return State::Close;
            }
            return State::ContinueWithChildren;
        }

        if line.indent() >= offset {
            line.consume_columns(offset);
            State::ContinueWithChildren
        } else {
            State::Close
        }
    }

    fn can_interrupt_paragraph(&self) -> bool {
        true
    }

    fn only_in_list(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn marker(text: &str) -> Option<MarkerMatch> {
        try_parse_list_marker(&Line::new(text))
    }

    #[test]
    fn content_offsets() {
        assert_eq!(marker("- a").unwrap().content_offset(), 2);
        assert_eq!(marker("1.  a").unwrap().content_offset(), 4);
        assert_eq!(marker(" 10) a").unwrap().content_offset(), 5);
        assert_eq!(marker("-      code").unwrap().content_offset(), 2);
        assert_eq!(marker("-").unwrap().content_offset(), 2);
    }

    #[test]
    fn indented_marker_is_not_an_item() {
        assert!(marker("    - a").is_none());
        assert!(marker("-a").is_none());
    }

    #[test]
    fn empty_item() {
        assert!(marker("-   ").unwrap().empty);
        assert!(!marker("- x").unwrap().empty);
    }
}
