//! Canonical Markdown output for a parsed tree.
//!
//! The renderer walks the tree once, depth-first. Blockquote depth and the
//! stack of enclosing lists live in a [`RenderContext`] that is built fresh
//! for every call, so a `Renderer` is never shared between documents. Output
//! goes straight to the sink, line by line; the first write error aborts
//! the render.

use std::fmt;
use std::io;

use crate::syntax::SyntaxNode;

mod blocks;
mod context;
mod dispatch;
mod error;
mod inline;
mod options;

use context::RenderContext;

pub use error::RenderError;
pub use options::RenderOptions;

/// Append-only output for the renderer.
pub trait RenderSink {
    fn write_str(&mut self, s: &str) -> Result<(), RenderError>;
}

impl RenderSink for String {
    fn write_str(&mut self, s: &str) -> Result<(), RenderError> {
        self.push_str(s);
        Ok(())
    }
}

/// Adapts an [`io::Write`] as a sink.
pub struct IoSink<W: io::Write>(pub W);

impl<W: io::Write> RenderSink for IoSink<W> {
    fn write_str(&mut self, s: &str) -> Result<(), RenderError> {
        self.0.write_all(s.as_bytes())?;
        Ok(())
    }
}

/// Adapts a [`fmt::Write`] as a sink.
pub struct FmtSink<W: fmt::Write>(pub W);

impl<W: fmt::Write> RenderSink for FmtSink<W> {
    fn write_str(&mut self, s: &str) -> Result<(), RenderError> {
        self.0.write_str(s)?;
        Ok(())
    }
}

pub struct Renderer<'s, S: RenderSink> {
    sink: &'s mut S,
    options: RenderOptions,
    context: RenderContext,
    /// The last line written was a blank separator.
    ended_with_blank: bool,
}

impl<'s, S: RenderSink> Renderer<'s, S> {
    pub fn new(sink: &'s mut S, options: RenderOptions) -> Self {
        Self {
            sink,
            options,
            context: RenderContext::default(),
            ended_with_blank: false,
        }
    }

    pub fn render(mut self, tree: &SyntaxNode) -> Result<(), RenderError> {
        log::debug!("Rendering {:?} with {:?}", tree.kind(), self.options);
        self.visit(tree)
    }

    /// Writes one line: the container prefix, `content`, and `\n`. Empty
    /// content gets the trimmed prefix.
    fn line(&mut self, content: &str) -> Result<(), RenderError> {
        let prefix = self.context.take_line_prefix();
        if content.is_empty() {
            self.sink.write_str(prefix.trim_end())?;
        } else {
            self.sink.write_str(&prefix)?;
            self.sink.write_str(content)?;
        }
        self.sink.write_str("\n")?;
        self.ended_with_blank = false;
        Ok(())
    }

    fn blank_line(&mut self) -> Result<(), RenderError> {
        let prefix = self.context.blank_line_prefix();
        self.sink.write_str(&prefix)?;
        self.sink.write_str("\n")?;
        self.ended_with_blank = true;
        Ok(())
    }
}

/// Renders `tree` into `sink`.
pub fn render<S: RenderSink>(
    tree: &SyntaxNode,
    options: &RenderOptions,
    sink: &mut S,
) -> Result<(), RenderError> {
    Renderer::new(sink, *options).render(tree)
}

pub fn render_to_string(tree: &SyntaxNode, options: &RenderOptions) -> Result<String, RenderError> {
    let mut out = String::with_capacity(tree.text().len().into());
    render(tree, options, &mut out)?;
    Ok(out)
}
