//! Line cursor shared by the block rules.
//!
//! Containers consume their prefix (`>` markers, list indentation) from the
//! front of a line as tokens; whatever remains is handed to the leaf that
//! ends up owning the line.

use crate::syntax::SyntaxKind;

/// A token cut from the source: kind plus the exact source slice.
pub(crate) type Piece<'a> = (SyntaxKind, &'a str);

pub(crate) const TAB_STOP: usize = 4;

/// A line owned by a leaf block: the prefix tokens consumed by its
/// containers, the remaining content, and the original line ending.
#[derive(Debug, Clone)]
pub(crate) struct SourceLine<'a> {
    pub(crate) prefix: Vec<Piece<'a>>,
    pub(crate) content: &'a str,
    pub(crate) newline: &'a str,
}

impl SourceLine<'_> {
    pub(crate) fn is_blank(&self) -> bool {
        is_blank(self.content)
    }
}

#[derive(Debug)]
pub(crate) struct Line<'a> {
    text: &'a str,
    newline: &'a str,
    pos: usize,
    col: usize,
    pub(crate) prefix: Vec<Piece<'a>>,
}

impl<'a> Line<'a> {
    pub(crate) fn new(raw: &'a str) -> Self {
        let (text, newline) = split_newline(raw);
        Self {
            text,
            newline,
            pos: 0,
            col: 0,
            prefix: Vec::new(),
        }
    }

    /// The unconsumed part of the line, without the line ending.
    pub(crate) fn rest(&self) -> &'a str {
        &self.text[self.pos..]
    }

    pub(crate) fn newline(&self) -> &'a str {
        self.newline
    }

    pub(crate) fn is_blank(&self) -> bool {
        is_blank(self.rest())
    }

    /// Columns of leading whitespace in the rest of the line.
    pub(crate) fn indent(&self) -> usize {
        whitespace_columns(self.rest(), self.col).0
    }

    /// The rest of the line after its leading whitespace.
    pub(crate) fn after_indent(&self) -> &'a str {
        let rest = self.rest();
        &rest[whitespace_columns(rest, self.col).1..]
    }

    /// Column at which [`Line::after_indent`] starts.
    pub(crate) fn content_column(&self) -> usize {
        self.col + self.indent()
    }

    /// First byte after the leading whitespace.
    pub(crate) fn peek_byte(&self) -> Option<u8> {
        self.after_indent().bytes().next()
    }

    /// Consumes `len` bytes as a prefix token of `kind`.
    pub(crate) fn consume(&mut self, kind: SyntaxKind, len: usize) {
        if len == 0 {
            return;
        }
        let piece = &self.text[self.pos..self.pos + len];
        self.col = advance_column(piece, self.col);
        self.pos += len;
        self.prefix.push((kind, piece));
    }

    /// Consumes all leading whitespace.
    pub(crate) fn consume_indent(&mut self) {
        let (_, bytes) = whitespace_columns(self.rest(), self.col);
        self.consume(SyntaxKind::WHITESPACE, bytes);
    }

    /// Consumes up to `cols` columns of leading whitespace.
    ///
    /// A tab straddling the target column is consumed whole.
    pub(crate) fn consume_columns(&mut self, cols: usize) {
        let target = self.col + cols;
        let mut col = self.col;
        let mut bytes = 0;
        for b in self.rest().bytes() {
            if col >= target {
                break;
            }
            match b {
                b' ' => col += 1,
                b'\t' => col += TAB_STOP - (col % TAB_STOP),
                _ => break,
            }
            bytes += 1;
        }
        self.consume(SyntaxKind::WHITESPACE, bytes);
    }

    /// Moves the rest of the line, with every pending prefix token, into a
    /// [`SourceLine`].
    pub(crate) fn take_source(&mut self) -> SourceLine<'a> {
        let content = self.rest();
        self.col = advance_column(content, self.col);
        self.pos = self.text.len();
        SourceLine {
            prefix: std::mem::take(&mut self.prefix),
            content,
            newline: self.newline,
        }
    }
}

/// Splits `\n` or `\r\n` off the end of a raw line.
pub(crate) fn split_newline(raw: &str) -> (&str, &str) {
    if let Some(text) = raw.strip_suffix("\r\n") {
        (text, "\r\n")
    } else if let Some(text) = raw.strip_suffix('\n') {
        (text, "\n")
    } else {
        (raw, "")
    }
}

pub(crate) fn is_blank(text: &str) -> bool {
    text.bytes().all(|b| b == b' ' || b == b'\t')
}

/// Expand tabs to columns and return (cols, byte_len) of the leading
/// whitespace of `text`, which starts at column `start_col`.
pub(crate) fn whitespace_columns(text: &str, start_col: usize) -> (usize, usize) {
    let mut col = start_col;
    let mut bytes = 0usize;
    for b in text.bytes() {
        match b {
            b' ' => col += 1,
            b'\t' => col += TAB_STOP - (col % TAB_STOP),
            _ => break,
        }
        bytes += 1;
    }
    (col - start_col, bytes)
}

fn advance_column(text: &str, start_col: usize) -> usize {
    text.chars().fold(start_col, |col, ch| match ch {
        '\t' => col + TAB_STOP - (col % TAB_STOP),
        _ => col + 1,
    })
}

/// Byte index in `text` after stripping up to `cols` columns of leading
/// whitespace (tabs = 4).
pub(crate) fn byte_index_at_column(text: &str, cols: usize) -> usize {
    let mut col = 0usize;
    let mut idx = 0usize;
    for b in text.bytes() {
        if col >= cols {
            break;
        }
        match b {
            b' ' => col += 1,
            b'\t' => col += TAB_STOP - (col % TAB_STOP),
            _ => break,
        }
        idx += 1;
    }
    idx
}
