//! Ancestor state for one render call: blockquote depth and enclosing lists.

use crate::syntax::ListMarker;

const MAX_ORDERED_NUMBER: u64 = 999_999_999;

/// One enclosing list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ListFrame {
    pub(crate) marker: ListMarker,
    /// Number of the current item; unused for bullet lists.
    pub(crate) number: u64,
    pub(crate) is_ordered: bool,
    /// Content column of the current item, relative to the list.
    pub(crate) offset: usize,
    /// Blockquotes enclosing the list itself.
    pub(crate) quote_depth: usize,
    /// The current item's marker has not been written yet.
    pub(crate) marker_pending: bool,
    pub(crate) is_tight: bool,
}

impl ListFrame {
    pub(crate) fn new(marker: ListMarker, start: u64, quote_depth: usize, is_tight: bool) -> Self {
        Self {
            marker,
            number: start,
            is_ordered: marker.is_ordered(),
            offset: 0,
            quote_depth,
            marker_pending: false,
            is_tight,
        }
    }

    /// The marker of the current item: the bullet, or number + delimiter.
    pub(crate) fn marker_text(&self) -> String {
        match self.marker {
            ListMarker::Bullet(ch) => ch.to_string(),
            ListMarker::Ordered { delimiter, .. } => format!("{}{}", self.number, delimiter),
        }
    }

    /// Enter a new item: the marker plus one space sets the content column.
    pub(crate) fn start_item(&mut self) {
        self.offset = self.marker_text().len() + 1;
        self.marker_pending = true;
    }

    pub(crate) fn finish_item(&mut self) {
        self.marker_pending = false;
        // Ordered markers have at most nine digits.
        if self.is_ordered && self.number < MAX_ORDERED_NUMBER {
            self.number += 1;
        }
    }
}

#[derive(Debug, Default)]
pub(crate) struct RenderContext {
    pub(crate) blockquote_depth: usize,
    pub(crate) list_stack: Vec<ListFrame>,
}

impl RenderContext {
    pub(crate) fn is_top_level(&self) -> bool {
        self.blockquote_depth == 0 && self.list_stack.is_empty()
    }

    pub(crate) fn current_list(&mut self) -> Option<&mut ListFrame> {
        self.list_stack.last_mut()
    }

    /// Prefix for the next content line. Pending item markers are written
    /// (and cleared); otherwise items contribute their offset in spaces.
    pub(crate) fn take_line_prefix(&mut self) -> String {
        let mut prefix = String::new();
        let mut depth = 0;
        for frame in &mut self.list_stack {
            push_quotes(&mut prefix, depth, frame.quote_depth);
            depth = frame.quote_depth;
            if frame.marker_pending {
                let marker = frame.marker_text();
                prefix.push_str(&format!("{marker:<width$}", width = frame.offset));
                frame.marker_pending = false;
            } else {
                prefix.push_str(&" ".repeat(frame.offset));
            }
        }
        push_quotes(&mut prefix, depth, self.blockquote_depth);
        prefix
    }

    /// Prefix for a blank line, with trailing whitespace removed.
    pub(crate) fn blank_line_prefix(&self) -> String {
        let mut prefix = String::new();
        let mut depth = 0;
        for frame in &self.list_stack {
            push_quotes(&mut prefix, depth, frame.quote_depth);
            depth = frame.quote_depth;
            prefix.push_str(&" ".repeat(frame.offset));
        }
        push_quotes(&mut prefix, depth, self.blockquote_depth);
        prefix.trim_end().to_string()
    }
}

fn push_quotes(prefix: &mut String, from: usize, to: usize) {
    for _ in from..to {
        prefix.push_str("> ");
    }
}
